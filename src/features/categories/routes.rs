use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Public category routes (no authentication required)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categorias", get(handlers::list_categories))
        .route("/api/categorias/{id}", get(handlers::get_category))
        .with_state(service)
}

/// Catalog management routes (staff only)
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/admin/categorias",
            get(handlers::admin_list_categories).post(handlers::admin_create_category),
        )
        .route(
            "/api/admin/categorias/{id}",
            get(handlers::admin_get_category)
                .put(handlers::admin_update_category)
                .delete(handlers::admin_delete_category),
        )
        .with_state(service)
}
