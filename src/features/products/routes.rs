use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Public product routes (no authentication required)
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/productos", get(handlers::list_products))
        .route("/api/productos/{id}", get(handlers::get_product))
        .with_state(service)
}

/// Catalog management routes (staff only)
pub fn admin_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/admin/productos",
            get(handlers::admin_list_products).post(handlers::admin_create_product),
        )
        .route(
            "/api/admin/productos/{id}",
            get(handlers::admin_get_product)
                .patch(handlers::admin_update_product)
                .delete(handlers::admin_delete_product),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::connect_in_memory;
    use crate::modules::catalog_store::{CatalogStore, NewCategory, NewProduct, ProductChanges};
    use crate::shared::test_helpers::{price, with_plain_user_auth, with_staff_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn setup() -> (Arc<dyn CatalogStore>, Arc<ProductService>) {
        let store: Arc<dyn CatalogStore> = connect_in_memory().await;
        let service = Arc::new(ProductService::new(Arc::clone(&store)));
        (store, service)
    }

    async fn category(store: &Arc<dyn CatalogStore>, name: &str) -> i64 {
        store
            .insert_category(&NewCategory {
                name: name.to_string(),
                description: String::new(),
            })
            .await
            .unwrap()
            .id
    }

    async fn product(store: &Arc<dyn CatalogStore>, name: &str, category_id: i64) -> i64 {
        store
            .insert_product(&NewProduct::with_defaults(name, category_id, price(3200), 8))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_public_product_shape() {
        let (store, service) = setup().await;
        let pizzas = category(&store, "Pizzas").await;
        let id = product(&store, "Pizza Margherita", pizzas).await;

        let server = TestServer::new(routes(service)).unwrap();
        let response = server.get(&format!("/api/productos/{}", id)).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(
            body["data"],
            json!({
                "id": id,
                "nombre": "Pizza Margherita",
                "categoria": pizzas,
                "categoria_nombre": "Pizzas",
                "precio": "3200.00",
                "stock": 8
            })
        );
    }

    #[tokio::test]
    async fn test_public_list_newest_first_and_filtered() {
        let (store, service) = setup().await;
        let pizzas = category(&store, "Pizzas").await;
        let bebidas = category(&store, "Bebidas").await;
        let first = product(&store, "Pizza Margherita", pizzas).await;
        let second = product(&store, "Pizza Napolitana", pizzas).await;
        product(&store, "Jugo Natural", bebidas).await;

        let server = TestServer::new(routes(service)).unwrap();

        let all: Value = server.get("/api/productos").await.json();
        assert_eq!(all["meta"]["total"], 3);
        assert_eq!(all["data"][0]["nombre"], "Jugo Natural");

        let filtered: Value = server
            .get("/api/productos")
            .add_query_param("categoria", pizzas)
            .await
            .json();
        let ids: Vec<i64> = filtered["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn test_public_get_unknown_is_404() {
        let (_, service) = setup().await;
        let server = TestServer::new(routes(service)).unwrap();
        server
            .get("/api/productos/12345")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_create_patch_delete() {
        let (store, service) = setup().await;
        let postres = category(&store, "Postres").await;
        let server = TestServer::new(with_staff_auth(admin_routes(service))).unwrap();

        let created = server
            .post("/api/admin/productos")
            .json(&json!({
                "nombre": "Tiramisu",
                "descripcion": "Con mascarpone",
                "categoria": postres,
                "precio": "950",
                "stock": 12,
                "imagen": "https://example.com/tiramisu.jpg"
            }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["precio"], "950.00");
        assert_eq!(body["data"]["activo"], true);
        assert_eq!(body["data"]["categoria_nombre"], "Postres");

        let patched = server
            .patch(&format!("/api/admin/productos/{}", id))
            .json(&json!({ "precio": "990.50", "stock": 4, "activo": false, "imagen": null }))
            .await;
        patched.assert_status_ok();
        let body: Value = patched.json();
        assert_eq!(body["data"]["precio"], "990.50");
        assert_eq!(body["data"]["stock"], 4);
        assert_eq!(body["data"]["activo"], false);
        assert!(body["data"]["imagen"].is_null());
        assert_eq!(body["data"]["descripcion"], "Con mascarpone");

        server
            .delete(&format!("/api/admin/productos/{}", id))
            .await
            .assert_status_ok();
        server
            .get(&format!("/api/admin/productos/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_create_rejects_unknown_category() {
        let (_, service) = setup().await;
        let server = TestServer::new(with_staff_auth(admin_routes(service))).unwrap();

        let response = server
            .post("/api/admin/productos")
            .json(&json!({ "nombre": "Huérfano", "categoria": 999, "precio": "10" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert!(body["errors"][0].as_str().unwrap().starts_with("categoria: "));
    }

    #[tokio::test]
    async fn test_admin_rejects_malformed_json() {
        let (_, service) = setup().await;
        let server = TestServer::new(with_staff_auth(admin_routes(service))).unwrap();

        let response = server
            .post("/api/admin/productos")
            .text("{ not json")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_reports_body_type_errors_per_field() {
        let (store, service) = setup().await;
        let pizzas = category(&store, "Pizzas").await;
        let server = TestServer::new(with_staff_auth(admin_routes(service))).unwrap();

        let response = server
            .post("/api/admin/productos")
            .json(&json!({ "nombre": "Pizza Rúcula", "categoria": pizzas, "precio": "abc" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        let error = body["errors"][0].as_str().unwrap();
        assert!(error.starts_with("precio: "), "{}", error);
        assert!(!error.contains("at line"));

        let response = server
            .post("/api/admin/productos")
            .json(&json!({ "nombre": "Pizza Rúcula", "precio": "1500" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"][0], "categoria: this field is required");
    }

    #[tokio::test]
    async fn test_admin_filters() {
        let (store, service) = setup().await;
        let pizzas = category(&store, "Pizzas").await;
        let bebidas = category(&store, "Bebidas").await;
        product(&store, "Pizza Fugazzeta", pizzas).await;
        let hidden = product(&store, "Cerveza Quilmes", bebidas).await;
        store
            .update_product(
                hidden,
                &ProductChanges {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let server = TestServer::new(with_staff_auth(admin_routes(service))).unwrap();

        let inactive: Value = server
            .get("/api/admin/productos")
            .add_query_param("activo", false)
            .await
            .json();
        assert_eq!(inactive["meta"]["total"], 1);
        assert_eq!(inactive["data"][0]["id"], hidden);

        let searched: Value = server
            .get("/api/admin/productos")
            .add_query_param("search", "fugazz")
            .await
            .json();
        assert_eq!(searched["meta"]["total"], 1);
        assert_eq!(searched["meta"]["page_size"], 20);
    }

    #[tokio::test]
    async fn test_admin_forbidden_for_non_staff() {
        let (_, service) = setup().await;
        let server = TestServer::new(with_plain_user_auth(admin_routes(service))).unwrap();
        server
            .get("/api/admin/productos")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
