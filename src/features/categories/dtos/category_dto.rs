use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::Category;
use crate::modules::catalog_store::{CategoryChanges, NewCategory, Page};
use crate::shared::constants::ADMIN_PAGE_SIZE;
use crate::shared::types::{default_page, page_window};

/// Category as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            nombre: c.name,
            descripcion: c.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub nombre: String,

    #[serde(default)]
    pub descripcion: String,
}

impl From<CreateCategoryDto> for NewCategory {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.nombre.trim().to_string(),
            description: dto.descripcion,
        }
    }
}

/// Request DTO for updating a category. Omitted fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

impl From<UpdateCategoryDto> for CategoryChanges {
    fn from(dto: UpdateCategoryDto) -> Self {
        Self {
            name: dto.nombre.map(|n| n.trim().to_string()),
            description: dto.descripcion,
        }
    }
}

/// Query params for the admin category listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminCategoryQueryParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Number of items per page (default: 20, max: 100)
    #[serde(default = "default_admin_page_size")]
    pub page_size: i64,

    /// Substring of the category name
    pub search: Option<String>,
}

fn default_admin_page_size() -> i64 {
    ADMIN_PAGE_SIZE
}

impl AdminCategoryQueryParams {
    pub fn page(&self) -> Page {
        page_window(self.page, self.page_size)
    }
}

/// Result of deleting a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteCategoryResponseDto {
    pub id: i64,
    /// Products removed along with the category
    pub productos_eliminados: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_serializes_with_wire_names() {
        let dto = CategoryDto::from(Category {
            id: 3,
            name: "Pizzas".to_string(),
            description: "Pizzas al horno de barro".to_string(),
        });

        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            json!({ "id": 3, "nombre": "Pizzas", "descripcion": "Pizzas al horno de barro" })
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let dto = CreateCategoryDto {
            nombre: String::new(),
            descripcion: String::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let dto = CreateCategoryDto {
            nombre: "   ".to_string(),
            descripcion: String::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let dto: CreateCategoryDto = serde_json::from_value(json!({ "nombre": "Postres" })).unwrap();
        assert_eq!(dto.descripcion, "");
    }
}
