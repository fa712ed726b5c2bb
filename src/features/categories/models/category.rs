use sqlx::FromRow;

/// Database model for a menu category
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}
