use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::obtain_token,
        auth::handlers::refresh_token,
        auth::handlers::get_me,
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::get_category,
        // Products (public)
        products_handlers::list_products,
        products_handlers::get_product,
        // Catalog management (staff)
        categories_handlers::admin_list_categories,
        categories_handlers::admin_create_category,
        categories_handlers::admin_get_category,
        categories_handlers::admin_update_category,
        categories_handlers::admin_delete_category,
        products_handlers::admin_list_products,
        products_handlers::admin_create_product,
        products_handlers::admin_get_product,
        products_handlers::admin_update_product,
        products_handlers::admin_delete_product,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::dtos::LoginRequestDto,
            auth::dtos::RefreshTokenRequestDto,
            auth::dtos::TokenPairDto,
            auth::dtos::RefreshTokenResponseDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::TokenPairDto>,
            // Catalog
            categories_dtos::CategoryDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::DeleteCategoryResponseDto,
            products_dtos::ProductDto,
            products_dtos::AdminProductDto,
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            ApiResponse<categories_dtos::CategoryDto>,
            ApiResponse<products_dtos::ProductDto>,
        )
    ),
    tags(
        (name = "auth", description = "Token issuance for catalog operators"),
        (name = "categorias", description = "Menu categories (public)"),
        (name = "productos", description = "Menu products (public)"),
        (name = "admin", description = "Catalog management (staff only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Comida al Paso API",
        version = "0.1.0",
        description = "Restaurant menu catalog",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/categorias",
            "/api/productos/{id}",
            "/api/admin/productos/{id}",
            "/api/token",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_bearer_scheme_added_without_existing_components() {
        let mut doc = utoipa::openapi::OpenApiBuilder::new().build();
        assert!(doc.components.is_none());

        SecurityAddon.modify(&mut doc);

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
