use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::products::models::Product;
use crate::modules::catalog_store::{NewProduct, Page, ProductChanges, ProductFilter};
use crate::shared::constants::{ADMIN_PAGE_SIZE, DEFAULT_PAGE_SIZE};
use crate::shared::types::{default_page, page_window};

/// Two decimal places, the way prices are stored
fn money(price: Decimal) -> Decimal {
    let mut price = price;
    price.rescale(2);
    price
}

/// Public product representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i64,
    pub nombre: String,
    /// Category id
    pub categoria: i64,
    pub categoria_nombre: Option<String>,
    #[schema(value_type = String, example = "3200.00")]
    pub precio: Decimal,
    pub stock: i32,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            nombre: p.name,
            categoria: p.category_id,
            categoria_nombre: p.category_name,
            precio: money(p.price),
            stock: p.stock,
        }
    }
}

/// Full product record for catalog management
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminProductDto {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub categoria: i64,
    pub categoria_nombre: Option<String>,
    #[schema(value_type = String, example = "3200.00")]
    pub precio: Decimal,
    pub stock: i32,
    pub imagen: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

impl From<Product> for AdminProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            nombre: p.name,
            descripcion: p.description,
            categoria: p.category_id,
            categoria_nombre: p.category_name,
            precio: money(p.price),
            stock: p.stock,
            imagen: p.image,
            activo: p.active,
            fecha_creacion: p.created_at,
            fecha_actualizacion: p.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub nombre: String,

    #[serde(default)]
    pub descripcion: String,

    /// Category id
    pub categoria: i64,

    #[validate(custom(function = "crate::shared::validation::price_fits"))]
    #[schema(value_type = String, example = "3200.00")]
    pub precio: Decimal,

    #[serde(default)]
    pub stock: i32,

    #[validate(url(message = "Image must be a valid URL"))]
    #[serde(default)]
    pub imagen: Option<String>,

    #[serde(default = "default_active")]
    pub activo: bool,
}

impl From<CreateProductDto> for NewProduct {
    fn from(dto: CreateProductDto) -> Self {
        Self {
            name: dto.nombre.trim().to_string(),
            description: dto.descripcion,
            category_id: dto.categoria,
            price: dto.precio,
            stock: dto.stock,
            image: dto.imagen.filter(|url| !url.is_empty()),
            active: dto.activo,
        }
    }
}

/// Distinguishes an explicit `null` from an absent field
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Partial product update. Omitted fields are left unchanged; `"imagen": null` clears the image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<i64>,

    #[validate(custom(function = "crate::shared::validation::price_fits"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "3500.00")]
    pub precio: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,

    #[validate(url(message = "Image must be a valid URL"))]
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub imagen: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}

impl From<UpdateProductDto> for ProductChanges {
    fn from(dto: UpdateProductDto) -> Self {
        Self {
            name: dto.nombre.map(|n| n.trim().to_string()),
            description: dto.descripcion,
            category_id: dto.categoria,
            price: dto.precio,
            stock: dto.stock,
            image: dto.imagen.map(|url| url.filter(|u| !u.is_empty())),
            active: dto.activo,
        }
    }
}

/// Query params for the public product listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProductQueryParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Number of items per page (default: 100, max: 100)
    #[serde(default = "default_public_page_size")]
    pub page_size: i64,

    /// Only products in this category
    pub categoria: Option<i64>,
}

fn default_public_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl ProductQueryParams {
    pub fn page(&self) -> Page {
        page_window(self.page, self.page_size)
    }

    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category_id: self.categoria,
            ..Default::default()
        }
    }
}

/// Query params for the admin product listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminProductQueryParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Number of items per page (default: 20, max: 100)
    #[serde(default = "default_admin_page_size")]
    pub page_size: i64,

    /// Only products in this category
    pub categoria: Option<i64>,

    /// Filter by active flag
    pub activo: Option<bool>,

    /// Substring of the product name or description
    pub search: Option<String>,
}

fn default_admin_page_size() -> i64 {
    ADMIN_PAGE_SIZE
}

impl AdminProductQueryParams {
    pub fn page(&self) -> Page {
        page_window(self.page, self.page_size)
    }

    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category_id: self.categoria,
            active: self.activo,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn margherita() -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: "Pizza Margherita".to_string(),
            description: String::new(),
            category_id: 2,
            category_name: Some("Pizzas".to_string()),
            price: Decimal::from(3200),
            stock: 8,
            image: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_public_shape() {
        let value = serde_json::to_value(ProductDto::from(margherita())).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "nombre": "Pizza Margherita",
                "categoria": 2,
                "categoria_nombre": "Pizzas",
                "precio": "3200.00",
                "stock": 8
            })
        );
    }

    #[test]
    fn test_missing_category_name_is_null() {
        let mut product = margherita();
        product.category_name = None;

        let value = serde_json::to_value(ProductDto::from(product)).unwrap();
        assert!(value["categoria_nombre"].is_null());
    }

    #[test]
    fn test_admin_shape_has_every_field() {
        let value = serde_json::to_value(AdminProductDto::from(margherita())).unwrap();

        for field in [
            "descripcion",
            "imagen",
            "activo",
            "fecha_creacion",
            "fecha_actualizacion",
        ] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(value["precio"], "3200.00");
    }

    #[test]
    fn test_create_defaults() {
        let dto: CreateProductDto = serde_json::from_value(json!({
            "nombre": "Flan Casero",
            "categoria": 8,
            "precio": "800"
        }))
        .unwrap();

        assert!(dto.validate().is_ok());
        let product = NewProduct::from(dto);
        assert_eq!(product.stock, 0);
        assert!(product.active);
        assert_eq!(product.description, "");
        assert!(product.image.is_none());
    }

    #[test]
    fn test_create_rejects_bad_price_and_image() {
        let dto: CreateProductDto = serde_json::from_value(json!({
            "nombre": "Tiramisu",
            "categoria": 8,
            "precio": "9.999",
            "imagen": "not a url"
        }))
        .unwrap();

        let err = dto.validate().unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("precio"));
        assert!(fields.contains_key("imagen"));
    }

    #[test]
    fn test_update_distinguishes_null_image() {
        let cleared: UpdateProductDto =
            serde_json::from_value(json!({ "imagen": null })).unwrap();
        assert_eq!(cleared.imagen, Some(None));

        let untouched: UpdateProductDto = serde_json::from_value(json!({ "stock": 3 })).unwrap();
        assert_eq!(untouched.imagen, None);

        let changes = ProductChanges::from(cleared);
        assert_eq!(changes.image, Some(None));
    }
}
