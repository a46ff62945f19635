//! MySQL-backed OTP store
//!
//! Table `otp_codes`, keyed by identifier. See `migrations/` for the schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, error};

use dl_core::domain::entities::OtpRecord;
use dl_core::domain::value_objects::Purpose;
use dl_core::errors::DomainError;
use dl_core::repositories::otp::OtpStore;
use dl_shared::utils::identifier::mask_identifier;

const UPSERT_SQL: &str = r#"
    INSERT INTO otp_codes (identifier, code, purpose, expires_at, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?)
    ON DUPLICATE KEY UPDATE
        code = VALUES(code),
        purpose = VALUES(purpose),
        expires_at = VALUES(expires_at),
        updated_at = VALUES(updated_at)
"#;

const SELECT_SQL: &str = r#"
    SELECT identifier, code, purpose, expires_at, created_at, updated_at
    FROM otp_codes
    WHERE identifier = ?
"#;

/// OTP store over a MySQL pool
#[derive(Clone)]
pub struct MySqlOtpStore {
    pool: MySqlPool,
}

impl MySqlOtpStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn db_error(action: &str, identifier: &str, e: sqlx::Error) -> DomainError {
        error!(
            identifier = %mask_identifier(identifier),
            error = %e,
            "Failed to {} OTP record",
            action
        );
        DomainError::storage(format!("failed to {} OTP record: {}", action, e))
    }

    fn map_row(row: &MySqlRow) -> Result<OtpRecord, DomainError> {
        let get_err = |column: &str, e: sqlx::Error| {
            DomainError::storage(format!("failed to read column {}: {}", column, e))
        };

        let purpose: Option<String> = row.try_get("purpose").map_err(|e| get_err("purpose", e))?;
        let purpose = match purpose.as_deref() {
            None | Some("") => None,
            Some(value) => Some(value.parse::<Purpose>()?),
        };

        Ok(OtpRecord {
            identifier: row.try_get("identifier").map_err(|e| get_err("identifier", e))?,
            code: row.try_get("code").map_err(|e| get_err("code", e))?,
            purpose,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| get_err("expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get_err("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| get_err("updated_at", e))?,
        })
    }
}

#[async_trait]
impl OtpStore for MySqlOtpStore {
    async fn upsert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        sqlx::query(UPSERT_SQL)
            .bind(&record.identifier)
            .bind(&record.code)
            .bind(record.purpose.map(|p| p.as_str()))
            .bind(record.expires_at)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_error("store", &record.identifier, e))?;

        // Re-read so the returned timestamps carry the column precision
        let stored = self.find(&record.identifier).await?.ok_or_else(|| {
            DomainError::storage("OTP record vanished immediately after upsert")
        })?;

        debug!(identifier = %mask_identifier(&stored.identifier), "OTP record written to MySQL");
        Ok(stored)
    }

    async fn find(&self, identifier: &str) -> Result<Option<OtpRecord>, DomainError> {
        let row = sqlx::query(SELECT_SQL)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_error("read", identifier, e))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, record: &OtpRecord) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM otp_codes WHERE identifier = ?")
            .bind(&record.identifier)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_error("delete", &record.identifier, e))?;
        Ok(())
    }

    async fn delete_if_matches(&self, expected: &OtpRecord) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM otp_codes WHERE identifier = ? AND code = ? AND updated_at = ?",
        )
        .bind(&expected.identifier)
        .bind(&expected.code)
        .bind(expected.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_error("consume", &expected.identifier, e))?;

        Ok(result.rows_affected() == 1)
    }
}
