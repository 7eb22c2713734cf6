//! Business listing service
//!
//! Registration and owner edits for business listings, plus the
//! filterable marketplace query the category pages run.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Business;
use shared::types::PriceTier;
use shared::validation;

/// Business service for listings and the filter query layer
#[derive(Clone)]
pub struct BusinessService {
    db: PgPool,
}

/// Database row for a business joined with its category name
#[derive(Debug, sqlx::FromRow)]
struct BusinessRow {
    id: Uuid,
    owner_id: Uuid,
    category_id: Option<Uuid>,
    name: String,
    description: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    website: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
    profile_image: Option<String>,
    cover_image: Option<String>,
    is_featured: bool,
    rating: Decimal,
    price_range: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: Option<String>,
}

impl BusinessRow {
    fn into_listing(self) -> AppResult<BusinessListing> {
        let price_range = match self.price_range.as_deref() {
            Some(s) => Some(PriceTier::from_str(s).ok_or_else(|| {
                AppError::Internal(format!("Unknown price tier in store: {}", s))
            })?),
            None => None,
        };
        let category_name = self.category_name.clone();
        Ok(BusinessListing {
            business: Business {
                id: self.id,
                owner_id: self.owner_id,
                category_id: self.category_id,
                name: self.name,
                description: self.description,
                contact_email: self.contact_email,
                contact_phone: self.contact_phone,
                website: self.website,
                address: self.address,
                city: self.city,
                state: self.state,
                zip: self.zip,
                profile_image: self.profile_image,
                cover_image: self.cover_image,
                is_featured: self.is_featured,
                rating: self.rating,
                price_range,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            category_name,
        })
    }
}

/// Business with its category name for display
#[derive(Debug, Clone, Serialize)]
pub struct BusinessListing {
    #[serde(flatten)]
    pub business: Business,
    pub category_name: Option<String>,
}

/// Requested result ordering for the listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Descending by rating, ties broken by earliest creation
    Rating,
}

/// Filter selections from the listings UI. Absent filters impose no
/// constraint; supplied filters combine with AND semantics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessFilter {
    pub category: Option<String>,
    pub price_range: Option<PriceTier>,
    pub min_rating: Option<Decimal>,
    pub search: Option<String>,
    pub sort: Option<SortBy>,
}

/// Input for registering a business
#[derive(Debug, Deserialize)]
pub struct RegisterBusinessInput {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub price_range: Option<String>,
}

/// Input for updating a business (owner only, partial)
///
/// `rating` is derived from reviews and `is_featured` is editorial, so
/// neither is writable here.
#[derive(Debug, Deserialize)]
pub struct UpdateBusinessInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub price_range: Option<String>,
}

const SELECT_WITH_CATEGORY: &str = r#"
    SELECT b.id, b.owner_id, b.category_id, b.name, b.description,
           b.contact_email, b.contact_phone, b.website, b.address, b.city,
           b.state, b.zip, b.profile_image, b.cover_image, b.is_featured,
           b.rating, b.price_range, b.created_at, b.updated_at,
           c.name AS category_name
    FROM businesses b
    LEFT JOIN service_categories c ON c.id = b.category_id
"#;

impl BusinessService {
    /// Create a new BusinessService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Run the marketplace listing query
    ///
    /// Filters combine conjunctively; an empty result set is a normal
    /// outcome. Results come back unordered unless a rating sort was
    /// requested.
    pub async fn search(&self, filter: BusinessFilter) -> AppResult<Vec<BusinessListing>> {
        let mut query = QueryBuilder::<sqlx::Postgres>::new(SELECT_WITH_CATEGORY);
        query.push(" WHERE 1 = 1");

        if let Some(category) = &filter.category {
            query.push(" AND c.name = ");
            query.push_bind(category.clone());
        }
        if let Some(tier) = filter.price_range {
            query.push(" AND b.price_range = ");
            query.push_bind(tier.as_str());
        }
        if let Some(min_rating) = filter.min_rating {
            query.push(" AND b.rating >= ");
            query.push_bind(min_rating);
        }
        if let Some(term) = &filter.search {
            query.push(" AND b.name ILIKE ");
            query.push_bind(format!("%{}%", term));
        }
        if let Some(SortBy::Rating) = filter.sort {
            query.push(" ORDER BY b.rating DESC, b.created_at ASC");
        }

        let rows = query
            .build_query_as::<BusinessRow>()
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(BusinessRow::into_listing).collect()
    }

    /// Featured businesses for the home page rail
    pub async fn featured(&self, limit: i64) -> AppResult<Vec<BusinessListing>> {
        let rows = sqlx::query_as::<_, BusinessRow>(&format!(
            "{} WHERE b.is_featured = TRUE ORDER BY b.rating DESC, b.created_at ASC LIMIT $1",
            SELECT_WITH_CATEGORY
        ))
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(BusinessRow::into_listing).collect()
    }

    /// Get a single business with its category
    pub async fn get_business(&self, business_id: Uuid) -> AppResult<BusinessListing> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "{} WHERE b.id = $1",
            SELECT_WITH_CATEGORY
        ))
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        row.into_listing()
    }

    /// Businesses owned by the acting user (dashboard)
    pub async fn list_owned(&self, actor_id: Uuid) -> AppResult<Vec<BusinessListing>> {
        let rows = sqlx::query_as::<_, BusinessRow>(&format!(
            "{} WHERE b.owner_id = $1 ORDER BY b.created_at",
            SELECT_WITH_CATEGORY
        ))
        .bind(actor_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(BusinessRow::into_listing).collect()
    }

    /// Register a business owned by the acting user
    ///
    /// New listings start unreviewed (rating 0.0) and unfeatured.
    pub async fn register(
        &self,
        actor_id: Uuid,
        input: RegisterBusinessInput,
    ) -> AppResult<BusinessListing> {
        if let Err(msg) = validation::validate_business_name(&input.name) {
            return Err(AppError::validation("name", msg));
        }
        if let Some(email) = &input.contact_email {
            if let Err(msg) = validation::validate_email(email) {
                return Err(AppError::validation("contact_email", msg));
            }
        }
        let price_range = match input.price_range.as_deref() {
            Some(s) => Some(
                validation::validate_price_tier(s)
                    .map_err(|msg| AppError::validation("price_range", msg))?,
            ),
            None => None,
        };

        if let Some(category_id) = input.category_id {
            let category =
                sqlx::query_scalar::<_, Uuid>("SELECT id FROM service_categories WHERE id = $1")
                    .bind(category_id)
                    .fetch_optional(&self.db)
                    .await?;
            if category.is_none() {
                return Err(AppError::NotFound("Service category".to_string()));
            }
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO businesses
                (owner_id, category_id, name, description, contact_email,
                 contact_phone, website, address, city, state, zip,
                 profile_image, cover_image, price_range)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(actor_id)
        .bind(input.category_id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(&input.contact_email)
        .bind(&input.contact_phone)
        .bind(&input.website)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.zip)
        .bind(&input.profile_image)
        .bind(&input.cover_image)
        .bind(price_range.map(|t| t.as_str()))
        .fetch_one(&self.db)
        .await?;

        tracing::info!(business_id = %id, owner_id = %actor_id, "business registered");

        self.get_business(id).await
    }

    /// Update a business (owner only)
    pub async fn update(
        &self,
        actor_id: Uuid,
        business_id: Uuid,
        input: UpdateBusinessInput,
    ) -> AppResult<BusinessListing> {
        let existing = self.get_business(business_id).await?.business;

        if existing.owner_id != actor_id {
            return Err(AppError::Forbidden);
        }

        // Merge partial input with stored values
        let name = input.name.unwrap_or(existing.name);
        let description = input.description.or(existing.description);
        let category_id = input.category_id.or(existing.category_id);
        let contact_email = input.contact_email.or(existing.contact_email);
        let contact_phone = input.contact_phone.or(existing.contact_phone);
        let website = input.website.or(existing.website);
        let address = input.address.or(existing.address);
        let city = input.city.or(existing.city);
        let state = input.state.or(existing.state);
        let zip = input.zip.or(existing.zip);
        let profile_image = input.profile_image.or(existing.profile_image);
        let cover_image = input.cover_image.or(existing.cover_image);
        let price_range = match input.price_range.as_deref() {
            Some(s) => Some(
                validation::validate_price_tier(s)
                    .map_err(|msg| AppError::validation("price_range", msg))?,
            ),
            None => existing.price_range,
        };

        if let Err(msg) = validation::validate_business_name(&name) {
            return Err(AppError::validation("name", msg));
        }
        if let Some(email) = &contact_email {
            if let Err(msg) = validation::validate_email(email) {
                return Err(AppError::validation("contact_email", msg));
            }
        }

        sqlx::query(
            r#"
            UPDATE businesses
            SET name = $1, description = $2, category_id = $3, contact_email = $4,
                contact_phone = $5, website = $6, address = $7, city = $8,
                state = $9, zip = $10, profile_image = $11, cover_image = $12,
                price_range = $13, updated_at = NOW()
            WHERE id = $14
            "#,
        )
        .bind(name.trim())
        .bind(&description)
        .bind(category_id)
        .bind(&contact_email)
        .bind(&contact_phone)
        .bind(&website)
        .bind(&address)
        .bind(&city)
        .bind(&state)
        .bind(&zip)
        .bind(&profile_image)
        .bind(&cover_image)
        .bind(price_range.map(|t| t.as_str()))
        .bind(business_id)
        .execute(&self.db)
        .await?;

        self.get_business(business_id).await
    }
}
