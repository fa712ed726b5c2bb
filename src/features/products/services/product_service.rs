use std::sync::Arc;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::products::dtos::{
    AdminProductDto, AdminProductQueryParams, CreateProductDto, ProductDto, ProductQueryParams,
    UpdateProductDto,
};
use crate::features::products::models::Product;
use crate::modules::catalog_store::{CatalogStore, Page, ProductFilter};
use crate::shared::types::Meta;

/// Service for product operations
pub struct ProductService {
    store: Arc<dyn CatalogStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    async fn fetch_page(&self, filter: &ProductFilter, page: Page) -> Result<(Vec<Product>, Meta)> {
        let (products, total) = self
            .store
            .list_products(filter, page)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list products: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((products, Meta::new(total, page)))
    }

    async fn fetch(&self, id: i64) -> Result<Product> {
        self.store
            .get_product(id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get product {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    /// Public listing, newest first
    pub async fn list(&self, params: &ProductQueryParams) -> Result<(Vec<ProductDto>, Meta)> {
        let (products, meta) = self.fetch_page(&params.filter(), params.page()).await?;
        Ok((products.into_iter().map(ProductDto::from).collect(), meta))
    }

    pub async fn get(&self, id: i64) -> Result<ProductDto> {
        self.fetch(id).await.map(ProductDto::from)
    }

    pub async fn list_admin(
        &self,
        params: &AdminProductQueryParams,
    ) -> Result<(Vec<AdminProductDto>, Meta)> {
        let (products, meta) = self.fetch_page(&params.filter(), params.page()).await?;
        Ok((products.into_iter().map(AdminProductDto::from).collect(), meta))
    }

    pub async fn get_admin(&self, id: i64) -> Result<AdminProductDto> {
        self.fetch(id).await.map(AdminProductDto::from)
    }

    pub async fn create(&self, dto: CreateProductDto) -> Result<AdminProductDto> {
        let product = self
            .store
            .insert_product(&dto.into())
            .await
            .map_err(handle_db_error)?;

        tracing::info!(
            "Created product '{}' ({}) in category {}",
            product.name,
            product.id,
            product.category_id
        );
        Ok(product.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateProductDto) -> Result<AdminProductDto> {
        let product = self
            .store
            .update_product(id, &dto.into())
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        Ok(product.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted = self.store.delete_product(id).await.map_err(|e| {
            tracing::error!("Failed to delete product {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        if !deleted {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        tracing::info!("Deleted product {}", id);
        Ok(())
    }
}
