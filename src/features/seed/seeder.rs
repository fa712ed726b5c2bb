use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::features::categories::models::Category;
use crate::features::seed::dataset::{CategorySeed, ProductSeed, MENU_CATEGORIES, MENU_PRODUCTS};
use crate::modules::catalog_store::{CatalogStore, NewCategory, NewProduct};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("product '{product}' references unknown category '{category}'")]
    UnknownCategory { product: String, category: String },

    #[error("database error while seeding: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of one seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Categories in the dataset, created or reused
    pub categories: usize,
    pub products_created: usize,
    pub categories_removed: u64,
    pub products_removed: u64,
}

/// Writes the baseline menu into the catalog
pub struct MenuSeeder {
    store: Arc<dyn CatalogStore>,
    categories: &'static [CategorySeed],
    products: &'static [ProductSeed],
}

impl MenuSeeder {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_dataset(store, MENU_CATEGORIES, MENU_PRODUCTS)
    }

    pub fn with_dataset(
        store: Arc<dyn CatalogStore>,
        categories: &'static [CategorySeed],
        products: &'static [ProductSeed],
    ) -> Self {
        Self {
            store,
            categories,
            products,
        }
    }

    /// Load the menu. Unless `keep_existing` is set, every product and
    /// category is deleted first, so the catalog ends up exactly as the dataset.
    pub async fn run(&self, keep_existing: bool) -> Result<SeedReport, SeedError> {
        tracing::info!("Loading menu data...");
        let mut report = SeedReport::default();

        if !keep_existing {
            let removed = self.store.clear().await?;
            report.categories_removed = removed.categories;
            report.products_removed = removed.products;
            tracing::warn!(
                "Removed existing data: {} categories, {} products",
                removed.categories,
                removed.products
            );
        }

        let categories = self.upsert_categories().await?;
        report.categories = categories.len();

        for (name, category_name, units, stock) in self.products {
            let category =
                categories
                    .get(category_name)
                    .ok_or_else(|| SeedError::UnknownCategory {
                        product: name.to_string(),
                        category: category_name.to_string(),
                    })?;

            if self.store.find_product(name, category.id).await?.is_some() {
                continue;
            }

            let product =
                NewProduct::with_defaults(name, category.id, Decimal::from(*units), *stock);
            self.store.insert_product(&product).await?;
            report.products_created += 1;
        }

        tracing::info!("Menu loaded successfully");
        tracing::info!("  {} categories", report.categories);
        tracing::info!("  {} new products", report.products_created);

        Ok(report)
    }

    async fn upsert_categories(&self) -> Result<HashMap<&'static str, Category>, SeedError> {
        let mut categories = HashMap::with_capacity(self.categories.len());

        for (name, description) in self.categories {
            let category = match self.store.find_category_by_name(name).await? {
                Some(existing) => existing,
                None => {
                    let created = self
                        .store
                        .insert_category(&NewCategory {
                            name: name.to_string(),
                            description: description.to_string(),
                        })
                        .await?;
                    tracing::info!("  Created category: {}", name);
                    created
                }
            };
            categories.insert(*name, category);
        }

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::connect_in_memory;
    use crate::features::products::dtos::ProductDto;
    use crate::modules::catalog_store::{Page, ProductFilter};
    use crate::shared::test_helpers::price;

    async fn store() -> Arc<dyn CatalogStore> {
        connect_in_memory().await
    }

    #[tokio::test]
    async fn test_seeding_twice_yields_same_counts() {
        let store = store().await;
        let seeder = MenuSeeder::new(Arc::clone(&store));

        let first = seeder.run(false).await.unwrap();
        assert_eq!(first.categories, 8);
        assert_eq!(first.products_created, 25);
        let after_first = store.counts().await.unwrap();

        let second = seeder.run(false).await.unwrap();
        assert_eq!(second.categories_removed, 8);
        assert_eq!(second.products_removed, 25);
        assert_eq!(store.counts().await.unwrap(), after_first);
        assert_eq!(after_first.categories, 8);
        assert_eq!(after_first.products, 25);
    }

    #[tokio::test]
    async fn test_reset_discards_foreign_rows() {
        let store = store().await;
        let extra = store
            .insert_category(&NewCategory {
                name: "Cafetería".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        store
            .insert_product(&NewProduct::with_defaults("Cortado", extra.id, price(500), 3))
            .await
            .unwrap();

        let report = MenuSeeder::new(Arc::clone(&store)).run(false).await.unwrap();
        assert_eq!(report.categories_removed, 1);
        assert_eq!(report.products_removed, 1);
        assert!(store.find_category_by_name("Cafetería").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_keep_existing_reuses_and_preserves() {
        let store = store().await;
        let pizzas = store
            .insert_category(&NewCategory {
                name: "Pizzas".to_string(),
                description: "Descripción propia".to_string(),
            })
            .await
            .unwrap();
        let mut margherita = NewProduct::with_defaults("Pizza Margherita", pizzas.id, price(9999), 1);
        margherita.active = false;
        store.insert_product(&margherita).await.unwrap();

        let report = MenuSeeder::new(Arc::clone(&store)).run(true).await.unwrap();
        assert_eq!(report.categories_removed, 0);
        assert_eq!(report.products_created, 24);

        let reused = store.find_category_by_name("Pizzas").await.unwrap().unwrap();
        assert_eq!(reused.id, pizzas.id);
        assert_eq!(reused.description, "Descripción propia");

        let kept = store
            .find_product("Pizza Margherita", pizzas.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.price, price(9999));
        assert!(!kept.active);

        let counts = store.counts().await.unwrap();
        assert_eq!(counts.categories, 8);
        assert_eq!(counts.products, 25);
    }

    #[tokio::test]
    async fn test_unknown_category_aborts() {
        const CATEGORIES: &[CategorySeed] = &[("Pizzas", "")];
        const PRODUCTS: &[ProductSeed] = &[
            ("Pizza Margherita", "Pizzas", 3200, 8),
            ("Milanesa", "Minutas", 2900, 4),
        ];

        let store = store().await;
        let err = MenuSeeder::with_dataset(Arc::clone(&store), CATEGORIES, PRODUCTS)
            .run(false)
            .await
            .unwrap_err();

        match err {
            SeedError::UnknownCategory { product, category } => {
                assert_eq!(product, "Milanesa");
                assert_eq!(category, "Minutas");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_pizza_serializes_as_expected() {
        const CATEGORIES: &[CategorySeed] = &[("Pizzas", "")];
        const PRODUCTS: &[ProductSeed] = &[("Pizza Margherita", "Pizzas", 3200, 8)];

        let store = store().await;
        MenuSeeder::with_dataset(Arc::clone(&store), CATEGORIES, PRODUCTS)
            .run(false)
            .await
            .unwrap();

        let (products, total) = store
            .list_products(&ProductFilter::default(), Page::ALL)
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(store.counts().await.unwrap().categories, 1);

        let value = serde_json::to_value(ProductDto::from(products[0].clone())).unwrap();
        assert_eq!(value["nombre"], "Pizza Margherita");
        assert_eq!(value["categoria_nombre"], "Pizzas");
        assert_eq!(value["precio"], "3200.00");
        assert_eq!(value["stock"], 8);
    }
}
