use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::products::dtos::{ProductDto, ProductQueryParams};
use crate::features::products::services::ProductService;
use crate::shared::types::ApiResponse;

/// List menu products, newest first
#[utoipa::path(
    get,
    path = "/api/productos",
    params(ProductQueryParams),
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<ProductDto>>),
    ),
    tag = "productos"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    Query(params): Query<ProductQueryParams>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>> {
    let (products, meta) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(Some(products), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/productos/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "productos"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProductDto>>> {
    let product = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}
