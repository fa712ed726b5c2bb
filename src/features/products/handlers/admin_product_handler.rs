use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireStaff;
use crate::features::products::dtos::{
    AdminProductDto, AdminProductQueryParams, CreateProductDto, UpdateProductDto,
};
use crate::features::products::services::ProductService;
use crate::shared::types::ApiResponse;

/// List products with management filters
#[utoipa::path(
    get,
    path = "/api/admin/productos",
    params(AdminProductQueryParams),
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<AdminProductDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_list_products(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProductService>>,
    Query(params): Query<AdminProductQueryParams>,
) -> Result<Json<ApiResponse<Vec<AdminProductDto>>>> {
    let (products, meta) = service.list_admin(&params).await?;
    Ok(Json(ApiResponse::success(Some(products), None, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/admin/productos",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<AdminProductDto>),
        (status = 400, description = "Validation error or unknown category")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_create_product(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminProductDto>>)> {
    dto.validate().map_err(AppError::from)?;

    let product = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some("Product created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/productos/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<AdminProductDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_get_product(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<AdminProductDto>>> {
    let product = service.get_admin(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Partially update a product; price, stock and active flag are the usual edits
#[utoipa::path(
    patch,
    path = "/api/admin/productos/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<AdminProductDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_update_product(
    RequireStaff(user): RequireStaff,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateProductDto>,
) -> Result<Json<ApiResponse<AdminProductDto>>> {
    dto.validate().map_err(AppError::from)?;

    let product = service.update(id, dto).await?;
    tracing::debug!("Product {} updated by {}", id, user.username);

    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/productos/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_delete_product(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Product deleted successfully".to_string()),
        None,
    )))
}
