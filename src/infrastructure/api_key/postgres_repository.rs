//! PostgreSQL record store implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::api_key::{ApiKeyId, ApiKeyRecord, NewApiKeyRecord, RecordStore, StoreError};
use crate::domain::identity::PrincipalId;

const RECORD_COLUMNS: &str =
    "id, description, key, user_id, created_by, created_at, revoked_at";

/// PostgreSQL implementation of RecordStore over the `api_keys` table
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn list(&self, owner: &PrincipalId) -> Result<Vec<ApiKeyRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM api_keys WHERE user_id = $1 ORDER BY created_at DESC",
            RECORD_COLUMNS
        ))
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to list API keys"))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKeyRecord>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM api_keys WHERE id = $1",
            RECORD_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to get API key"))?;

        match row {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, record: NewApiKeyRecord) -> Result<ApiKeyRecord, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO api_keys (description, key, user_id, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            RECORD_COLUMNS
        ))
        .bind(&record.description)
        .bind(&record.key)
        .bind(record.user_id.as_str())
        .bind(record.created_by.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to insert API key"))?;

        row_to_record(&row)
    }

    async fn revoke(
        &self,
        id: &ApiKeyId,
        owner: &PrincipalId,
        revoked_at: DateTime<Utc>,
    ) -> Result<ApiKeyRecord, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE api_keys
            SET revoked_at = $2, user_id = $3
            WHERE id = $1 AND user_id = $3 AND revoked_at IS NULL
            RETURNING {}
            "#,
            RECORD_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(revoked_at)
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to revoke API key"))?;

        match row {
            Some(row) => row_to_record(&row),
            None => Err(StoreError::not_found(format!("active API key '{}'", id))),
        }
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to delete API key"))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Keep the SQLSTATE of constraint violations, flatten everything else
fn map_sqlx_error(e: sqlx::Error, context: &str) -> StoreError {
    if let Some(db_error) = e.as_database_error() {
        if let Some(code) = db_error.code() {
            let detail = db_error
                .constraint()
                .map(str::to_string)
                .unwrap_or_else(|| db_error.message().to_string());

            return StoreError::from_sqlstate(&code, detail);
        }
    }

    StoreError::backend(format!("{}: {}", context, e))
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<ApiKeyRecord, StoreError> {
    let column_error = |e: sqlx::Error| StoreError::backend(format!("Malformed api_keys row: {}", e));

    let id: Uuid = row.try_get("id").map_err(column_error)?;
    let description: String = row.try_get("description").map_err(column_error)?;
    let key: String = row.try_get("key").map_err(column_error)?;
    let user_id: String = row.try_get("user_id").map_err(column_error)?;
    let created_by: String = row.try_get("created_by").map_err(column_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column_error)?;
    let revoked_at: Option<DateTime<Utc>> = row.try_get("revoked_at").map_err(column_error)?;

    let principal = |value: String| {
        PrincipalId::new(value)
            .map_err(|e| StoreError::backend(format!("Invalid principal in database: {}", e)))
    };

    let record = ApiKeyRecord::new(
        ApiKeyId::from(id),
        NewApiKeyRecord {
            description,
            key,
            user_id: principal(user_id)?,
            created_by: principal(created_by)?,
        },
        created_at,
    );

    Ok(record.with_revoked_at(revoked_at))
}
