use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryDto;
use crate::features::categories::services::CategoryService;
use crate::modules::catalog_store::CategoryFilter;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// List menu categories ordered by name
#[utoipa::path(
    get,
    path = "/api/categorias",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryDto>>),
    ),
    tag = "categorias"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>> {
    let (categories, meta) = service
        .list(&CategoryFilter::default(), query.page())
        .await?;
    Ok(Json(ApiResponse::success(Some(categories), None, Some(meta))))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categorias/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryDto>>> {
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}
