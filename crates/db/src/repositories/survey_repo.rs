//! Repository for the `surveys` table.

use encuesta_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::survey::{CreateSurvey, Survey, UpdateSurvey};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, owner_id, title, description, created_on, is_active, created_at, updated_at";

/// Provides CRUD operations for surveys. Deletion is out of scope.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert a new survey on a caller-owned connection, returning the row.
    ///
    /// Takes `&mut PgConnection` so the insert can share a transaction with
    /// the stats seed.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateSurvey,
    ) -> Result<Survey, sqlx::Error> {
        let query = format!(
            "INSERT INTO surveys (owner_id, title, description, created_on, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.created_on)
            .bind(input.is_active)
            .fetch_one(conn)
            .await
    }

    /// Find a survey by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List surveys owned by a user, most recently created first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Survey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM surveys WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a survey. Only non-`None` fields in `input` are applied;
    /// the owner reference never changes.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSurvey,
    ) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!(
            "UPDATE surveys SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
