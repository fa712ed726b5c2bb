//! Catalog persistence
//!
//! `CatalogStore` is the seam between the catalog services and the
//! relational backend. Two implementations exist: PostgreSQL for networked
//! deployments and SQLite for the file-based default. Both rely on the
//! schema's unique index on category names and the cascading foreign key
//! from products to categories.

mod postgres;
mod sqlite;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Database, Encode, QueryBuilder, Type};

use crate::features::categories::models::Category;
use crate::features::products::models::Product;

pub use postgres::PgCatalogStore;
pub use sqlite::SqliteCatalogStore;

/// LIMIT/OFFSET window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
impl Page {
    /// Everything, for callers that need the whole table
    pub const ALL: Page = Page {
        limit: i64::MAX,
        offset: 0,
    };
}

#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    /// Substring of the category name
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<i64>,
    pub active: Option<bool>,
    /// Substring of the product name or description
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub price: Decimal,
    pub stock: i32,
    pub image: Option<String>,
    pub active: bool,
}

impl NewProduct {
    /// A product with default description, image and active flag
    pub fn with_defaults(name: &str, category_id: i64, price: Decimal, stock: i32) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            category_id,
            price,
            stock,
            image: None,
            active: true,
        }
    }
}

/// Partial product update. `image: Some(None)` clears the image.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub image: Option<Option<String>>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub categories: u64,
    pub products: u64,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Categories ordered by name, plus the total matching the filter
    async fn list_categories(
        &self,
        filter: &CategoryFilter,
        page: Page,
    ) -> sqlx::Result<(Vec<Category>, i64)>;

    async fn get_category(&self, id: i64) -> sqlx::Result<Option<Category>>;

    async fn find_category_by_name(&self, name: &str) -> sqlx::Result<Option<Category>>;

    async fn insert_category(&self, category: &NewCategory) -> sqlx::Result<Category>;

    async fn update_category(
        &self,
        id: i64,
        changes: &CategoryChanges,
    ) -> sqlx::Result<Option<Category>>;

    /// Deletes the category and, through the cascade, its products.
    /// Returns how many products went with it, or `None` if the category did not exist.
    async fn delete_category(&self, id: i64) -> sqlx::Result<Option<u64>>;

    /// Products newest first, plus the total matching the filter
    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: Page,
    ) -> sqlx::Result<(Vec<Product>, i64)>;

    async fn get_product(&self, id: i64) -> sqlx::Result<Option<Product>>;

    /// First product with this name in this category
    async fn find_product(&self, name: &str, category_id: i64) -> sqlx::Result<Option<Product>>;

    async fn insert_product(&self, product: &NewProduct) -> sqlx::Result<Product>;

    async fn update_product(
        &self,
        id: i64,
        changes: &ProductChanges,
    ) -> sqlx::Result<Option<Product>>;

    async fn delete_product(&self, id: i64) -> sqlx::Result<bool>;

    /// Removes every product and category, returning how many of each were deleted
    async fn clear(&self) -> sqlx::Result<CatalogCounts>;

    async fn counts(&self) -> sqlx::Result<CatalogCounts>;
}

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.description, p.category_id, c.name AS category_name,
           p.price, p.stock, p.image, p.active, p.created_at, p.updated_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

fn like_pattern(search: &str) -> String {
    format!("%{}%", search.trim())
}

fn push_category_filters<'args, DB>(
    qb: &mut QueryBuilder<'args, DB>,
    filter: &CategoryFilter,
    like: &str,
) where
    DB: Database,
    String: 'args + Encode<'args, DB> + Type<DB>,
{
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        qb.push(" WHERE name ")
            .push(like)
            .push(" ")
            .push_bind(like_pattern(search));
    }
}

fn push_product_filters<'args, DB>(qb: &mut QueryBuilder<'args, DB>, filter: &ProductFilter, like: &str)
where
    DB: Database,
    i64: 'args + Encode<'args, DB> + Type<DB>,
    bool: 'args + Encode<'args, DB> + Type<DB>,
    String: 'args + Encode<'args, DB> + Type<DB>,
{
    let mut keyword = " WHERE ";

    if let Some(category_id) = filter.category_id {
        qb.push(keyword)
            .push("p.category_id = ")
            .push_bind(category_id);
        keyword = " AND ";
    }

    if let Some(active) = filter.active {
        qb.push(keyword).push("p.active = ").push_bind(active);
        keyword = " AND ";
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(search);
        qb.push(keyword)
            .push("(p.name ")
            .push(like)
            .push(" ")
            .push_bind(pattern.clone())
            .push(" OR p.description ")
            .push(like)
            .push(" ")
            .push_bind(pattern)
            .push(")");
    }
}
