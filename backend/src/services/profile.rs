//! User display profile service
//!
//! Profiles hold the display name and avatar for an auth user id; the
//! auth provider owns the account itself.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Profile;
use shared::validation;

/// Profile service for display-name/avatar lookups and edits
#[derive(Clone)]
pub struct ProfileService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    full_name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for updating the actor's own profile
#[derive(Debug, Deserialize)]
pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileService {
    /// Create a new ProfileService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get a profile by user id
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, full_name, email, avatar_url, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;

        Ok(row.into())
    }

    /// Create or update the actor's own profile row
    pub async fn upsert_profile(
        &self,
        actor_id: Uuid,
        input: UpdateProfileInput,
    ) -> AppResult<Profile> {
        if let Some(email) = &input.email {
            if let Err(msg) = validation::validate_email(email) {
                return Err(AppError::validation("email", msg));
            }
        }

        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, full_name, email, avatar_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id)
            DO UPDATE SET full_name = COALESCE(EXCLUDED.full_name, profiles.full_name),
                          email = COALESCE(EXCLUDED.email, profiles.email),
                          avatar_url = COALESCE(EXCLUDED.avatar_url, profiles.avatar_url),
                          updated_at = NOW()
            RETURNING id, full_name, email, avatar_url, created_at, updated_at
            "#,
        )
        .bind(actor_id)
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(&input.avatar_url)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }
}
