use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{
    push_category_filters, push_product_filters, CatalogCounts, CatalogStore, CategoryChanges,
    CategoryFilter, NewCategory, NewProduct, Page, ProductChanges, ProductFilter, PRODUCT_SELECT,
};
use crate::features::categories::models::Category;
use crate::features::products::models::Product;

pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_categories(
        &self,
        filter: &CategoryFilter,
        page: Page,
    ) -> sqlx::Result<(Vec<Category>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM categories");
        push_category_filters(&mut count, filter, "ILIKE");
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query =
            QueryBuilder::<Postgres>::new("SELECT id, name, description FROM categories");
        push_category_filters(&mut query, filter, "ILIKE");
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
        sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_category_by_name(&self, name: &str) -> sqlx::Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_category(&self, category: &NewCategory) -> sqlx::Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
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
            SET name = COALESCE($1, name),
                description = COALESCE($2, description)
            WHERE id = $3
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

        let products: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
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
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p");
        push_product_filters(&mut count, filter, "ILIKE");
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new(PRODUCT_SELECT);
        push_product_filters(&mut query, filter, "ILIKE");
        query
            .push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok((products, total))
    }

    async fn get_product(&self, id: i64) -> sqlx::Result<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!("{} WHERE p.id = $1", PRODUCT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_product(&self, name: &str, category_id: i64) -> sqlx::Result<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!(
            "{} WHERE p.name = $1 AND p.category_id = $2 ORDER BY p.id LIMIT 1",
            PRODUCT_SELECT
        ))
        .bind(name)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_product(&self, product: &NewProduct) -> sqlx::Result<Product> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, category_id, price, stock, image, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image)
        .bind(product.active)
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
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                category_id = COALESCE($3, category_id),
                price = COALESCE($4, price),
                stock = COALESCE($5, stock),
                image = CASE WHEN $6 THEN $7 ELSE image END,
                active = COALESCE($8, active),
                updated_at = NOW()
            WHERE id = $9
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.category_id)
        .bind(changes.price)
        .bind(changes.stock)
        .bind(changes.image.is_some())
        .bind(changes.image.clone().flatten())
        .bind(changes.active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_product(id).await
    }

    async fn delete_product(&self, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
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
