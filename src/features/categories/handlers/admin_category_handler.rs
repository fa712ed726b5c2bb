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
use crate::features::categories::dtos::{
    AdminCategoryQueryParams, CategoryDto, CreateCategoryDto, DeleteCategoryResponseDto,
    UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// List categories for catalog management
#[utoipa::path(
    get,
    path = "/api/admin/categorias",
    params(AdminCategoryQueryParams),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_list_categories(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    Query(params): Query<AdminCategoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>> {
    let (categories, meta) = service.list_admin(&params).await?;
    Ok(Json(ApiResponse::success(Some(categories), None, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/admin/categorias",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Category name already exists")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_create_category(
    RequireStaff(user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryDto>>)> {
    dto.validate().map_err(AppError::from)?;

    let category = service.create(dto).await?;
    tracing::debug!("Category {} created by {}", category.id, user.username);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Category created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/categorias/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_get_category(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryDto>>> {
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/admin/categorias/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already exists")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_update_category(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryDto>>> {
    dto.validate().map_err(AppError::from)?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Category updated successfully".to_string()),
        None,
    )))
}

/// Delete a category and every product in it
#[utoipa::path(
    delete,
    path = "/api/admin/categorias/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<DeleteCategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_delete_category(
    RequireStaff(user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteCategoryResponseDto>>> {
    let deleted = service.delete(id).await?;
    tracing::info!("Category {} deleted by {}", id, user.username);

    Ok(Json(ApiResponse::success(
        Some(deleted),
        Some("Category deleted successfully".to_string()),
        None,
    )))
}
