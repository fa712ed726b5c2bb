use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::{
    push_category_filters, push_product_filters, CatalogCounts, CatalogStore, CategoryChanges,
    CategoryFilter, NewCategory, NewProduct, Page, ProductChanges, ProductFilter, PRODUCT_SELECT,
};
use crate::features::categories::models::Category;
use crate::features::products::models::Product;

/// File-based catalog store. Prices live in a TEXT column as their two-place decimal string.
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    category_id: i64,
    category_name: Option<String>,
    price: String,
    stock: i32,
    image: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = sqlx::Error;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Decimal::from_str(&row.price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            category_name: row.category_name,
            price,
            stock: row.stock,
            image: row.image,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn price_text(price: Decimal) -> String {
    let mut price = price;
    price.rescale(2);
    price.to_string()
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn list_categories(
        &self,
        filter: &CategoryFilter,
        page: Page,
    ) -> sqlx::Result<(Vec<Category>, i64)> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM categories");
        push_category_filters(&mut count, filter, "LIKE");
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Sqlite>::new("SELECT id, name, description FROM categories");
        push_category_filters(&mut query, filter, "LIKE");
        query
            .push(" ORDER BY name ASC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let categories = query
            .build_query_as::<Category>()
            .fetch_all(&self.pool)
            .await?;

        Ok((categories, total))
    }

    async fn get_category(&self, id: i64) -> sqlx::Result<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_category_by_name(&self, name: &str) -> sqlx::Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_category(&self, category: &NewCategory) -> sqlx::Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES (?, ?)
            RETURNING id, name, description
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_category(
        &self,
        id: i64,
        changes: &CategoryChanges,
    ) -> sqlx::Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE(?, name),
                description = COALESCE(?, description)
            WHERE id = ?
            RETURNING id, name, description
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_category(&self, id: i64) -> sqlx::Result<Option<u64>> {
        let mut tx = self.pool.begin().await?;

        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(products as u64))
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: Page,
    ) -> sqlx::Result<(Vec<Product>, i64)> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products p");
        push_product_filters(&mut count, filter, "LIKE");
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Sqlite>::new(PRODUCT_SELECT);
        push_product_filters(&mut query, filter, "LIKE");
        query
            .push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<sqlx::Result<Vec<_>>>()?;

        Ok((products, total))
    }

    async fn get_product(&self, id: i64) -> sqlx::Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{} WHERE p.id = ?", PRODUCT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn find_product(&self, name: &str, category_id: i64) -> sqlx::Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "{} WHERE p.name = ? AND p.category_id = ? ORDER BY p.id LIMIT 1",
            PRODUCT_SELECT
        ))
        .bind(name)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn insert_product(&self, product: &NewProduct) -> sqlx::Result<Product> {
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products
                (name, description, category_id, price, stock, image, active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(price_text(product.price))
        .bind(product.stock)
        .bind(&product.image)
        .bind(product.active)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_product(id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    async fn update_product(
        &self,
        id: i64,
        changes: &ProductChanges,
    ) -> sqlx::Result<Option<Product>> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = COALESCE(?, name),
                description = COALESCE(?, description),
                category_id = COALESCE(?, category_id),
                price = COALESCE(?, price),
                stock = COALESCE(?, stock),
                image = CASE WHEN ? THEN ? ELSE image END,
                active = COALESCE(?, active),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.category_id)
        .bind(changes.price.map(price_text))
        .bind(changes.stock)
        .bind(changes.image.is_some())
        .bind(changes.image.clone().flatten())
        .bind(changes.active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_product(id).await
    }

    async fn delete_product(&self, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> sqlx::Result<CatalogCounts> {
        let mut tx = self.pool.begin().await?;

        let products = sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let categories = sqlx::query("DELETE FROM categories")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(CatalogCounts {
            categories,
            products,
        })
    }

    async fn counts(&self) -> sqlx::Result<CatalogCounts> {
        let (categories, products): (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM categories), (SELECT COUNT(*) FROM products)",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(CatalogCounts {
            categories: categories as u64,
            products: products as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_text_has_two_places() {
        assert_eq!(price_text(Decimal::from(3200)), "3200.00");
        assert_eq!(price_text(Decimal::new(1999, 1)), "199.90");
    }
}
