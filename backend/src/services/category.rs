//! Service category lookup

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::ServiceCategory;

/// Category service for the marketplace's reference categories
#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    icon: Option<String>,
    color: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for ServiceCategory {
    fn from(row: CategoryRow) -> Self {
        ServiceCategory {
            id: row.id,
            name: row.name,
            description: row.description,
            icon: row.icon,
            color: row.color,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl CategoryService {
    /// Create a new CategoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all service categories, name-ordered
    pub async fn list_categories(&self) -> AppResult<Vec<ServiceCategory>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, icon, color, created_at, updated_at
            FROM service_categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ServiceCategory::from).collect())
    }

    /// Get a single category by id
    pub async fn get_category(&self, category_id: Uuid) -> AppResult<ServiceCategory> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, icon, color, created_at, updated_at
            FROM service_categories
            WHERE id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Service category".to_string()))?;

        Ok(row.into())
    }
}
