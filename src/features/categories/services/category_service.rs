use std::sync::Arc;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::categories::dtos::{
    AdminCategoryQueryParams, CategoryDto, CreateCategoryDto, DeleteCategoryResponseDto,
    UpdateCategoryDto,
};
use crate::modules::catalog_store::{CatalogStore, CategoryFilter, Page};
use crate::shared::types::Meta;

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CatalogStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// List categories ordered by name
    pub async fn list(
        &self,
        filter: &CategoryFilter,
        page: Page,
    ) -> Result<(Vec<CategoryDto>, Meta)> {
        let (categories, total) = self
            .store
            .list_categories(filter, page)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((
            categories.into_iter().map(CategoryDto::from).collect(),
            Meta::new(total, page),
        ))
    }

    pub async fn list_admin(
        &self,
        params: &AdminCategoryQueryParams,
    ) -> Result<(Vec<CategoryDto>, Meta)> {
        let filter = CategoryFilter {
            search: params
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        };
        self.list(&filter, params.page()).await
    }

    pub async fn get(&self, id: i64) -> Result<CategoryDto> {
        let category = self.store.get_category(id).await.map_err(|e| {
            tracing::error!("Failed to get category {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        category
            .map(CategoryDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryDto> {
        let category = self
            .store
            .insert_category(&dto.into())
            .await
            .map_err(handle_db_error)?;

        tracing::info!("Created category '{}' ({})", category.name, category.id);
        Ok(category.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateCategoryDto) -> Result<CategoryDto> {
        let category = self
            .store
            .update_category(id, &dto.into())
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        Ok(category.into())
    }

    /// Delete a category together with its products
    pub async fn delete(&self, id: i64) -> Result<DeleteCategoryResponseDto> {
        let removed = self
            .store
            .delete_category(id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        tracing::info!("Deleted category {} and {} products", id, removed);

        Ok(DeleteCategoryResponseDto {
            id,
            productos_eliminados: removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::connect_in_memory;
    use fake::faker::lorem::en::Word;
    use fake::Fake;

    async fn service() -> CategoryService {
        CategoryService::new(connect_in_memory().await)
    }

    fn create(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            nombre: name.to_string(),
            descripcion: String::new(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let service = service().await;
        service.create(create("Bebidas")).await.unwrap();

        let err = service.create(create("Bebidas")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_is_conflict() {
        let service = service().await;
        service.create(create("Bebidas")).await.unwrap();
        let postres = service.create(create("Postres")).await.unwrap();

        let err = service
            .update(
                postres.id,
                UpdateCategoryDto {
                    nombre: Some("Bebidas".to_string()),
                    descripcion: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_pagination_meta() {
        let service = service().await;
        for i in 0..25 {
            let word: String = Word().fake();
            service
                .create(create(&format!("{} {:02}", word, i)))
                .await
                .unwrap();
        }

        let params = AdminCategoryQueryParams {
            page: 2,
            page_size: 20,
            search: None,
        };
        let (categories, meta) = service.list_admin(&params).await.unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(meta.total, 25);
        assert_eq!(meta.page, 2);

        let names: Vec<String> = categories.iter().map(|c| c.nombre.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_missing_category_is_not_found() {
        let service = service().await;
        assert!(matches!(service.get(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(42).await, Err(AppError::NotFound(_))));
    }
}
