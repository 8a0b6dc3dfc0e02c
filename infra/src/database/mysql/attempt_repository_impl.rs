//! MySQL implementation of the delivery status store

use async_trait::async_trait;
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error};

use od_core::domain::entities::otp_attempt::{OtpAttempt, OtpStatus};
use od_core::errors::DomainError;
use od_core::repositories::AttemptRepository;
use od_shared::phone::mask_phone;

/// MySQL-backed attempt repository
///
/// Rows in `otp_attempts` are append-only; status updates are guarded so
/// only monotonic, non-terminal transitions ever hit the table.
pub struct MySqlAttemptRepository {
    pool: Pool<MySql>,
}

impl MySqlAttemptRepository {
    /// Create a new attempt repository
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn map_row(row: &sqlx::mysql::MySqlRow) -> Result<OtpAttempt, DomainError> {
        let status: String = row.try_get("status").map_err(internal)?;
        Ok(OtpAttempt {
            id: row.try_get("id").map_err(internal)?,
            provider: row.try_get("provider").map_err(internal)?,
            phone_number: row.try_get("phone_number").map_err(internal)?,
            payload: row.try_get("payload").map_err(internal)?,
            status: status.parse()?,
            created_at: row.try_get("created_at").map_err(internal)?,
        })
    }
}

fn internal(e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("database error: {}", e),
    }
}

/// Statuses an attempt may currently hold for the requested transition to
/// be a legal monotonic step
fn allowed_predecessors(new_status: OtpStatus) -> &'static [&'static str] {
    match new_status {
        OtpStatus::Pending => &[],
        OtpStatus::Sent => &["pending"],
        OtpStatus::Delivered => &["sent"],
        OtpStatus::Failed => &["pending", "sent"],
    }
}

#[async_trait]
impl AttemptRepository for MySqlAttemptRepository {
    async fn create(&self, mut attempt: OtpAttempt) -> Result<OtpAttempt, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO otp_attempts (provider, phone_number, payload, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&attempt.provider)
        .bind(&attempt.phone_number)
        .bind(&attempt.payload)
        .bind(attempt.status.as_str())
        .bind(attempt.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                provider = %attempt.provider,
                phone = %mask_phone(&attempt.phone_number),
                error = %e,
                "failed to insert otp attempt"
            );
            internal(e)
        })?;

        attempt.id = result.last_insert_id() as i64;

        debug!(
            attempt_id = attempt.id,
            provider = %attempt.provider,
            "inserted otp attempt"
        );

        Ok(attempt)
    }

    async fn update_status(&self, id: i64, new_status: OtpStatus) -> Result<(), DomainError> {
        let predecessors = allowed_predecessors(new_status);

        // Guarded update: the row only changes when its current status is
        // a legal predecessor, which also shuts out terminal records.
        let mut query = String::from("UPDATE otp_attempts SET status = ? WHERE id = ?");
        if !predecessors.is_empty() {
            let placeholders = vec!["?"; predecessors.len()].join(", ");
            query.push_str(&format!(" AND status IN ({})", placeholders));
        } else {
            query.push_str(" AND 1 = 0");
        }

        let mut update = sqlx::query(&query).bind(new_status.as_str()).bind(id);
        for predecessor in predecessors {
            update = update.bind(*predecessor);
        }

        let result = update.execute(&self.pool).await.map_err(internal)?;
        if result.rows_affected() > 0 {
            debug!(attempt_id = id, status = %new_status, "updated attempt status");
            return Ok(());
        }

        // Nothing changed: distinguish a missing row, a terminal record,
        // and an otherwise illegal jump.
        let current: Option<String> =
            sqlx::query_scalar("SELECT status FROM otp_attempts WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(internal)?;

        match current {
            None => Err(DomainError::NotFound {
                resource: format!("attempt {}", id),
            }),
            Some(status_str) => {
                let status: OtpStatus = status_str.parse()?;
                if status.is_terminal() {
                    Err(DomainError::TerminalStatus {
                        id,
                        status: status.to_string(),
                    })
                } else {
                    Err(DomainError::Validation {
                        message: format!(
                            "illegal status transition {} -> {} for attempt {}",
                            status, new_status, id
                        ),
                    })
                }
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<OtpAttempt>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, provider, phone_number, payload, status, created_at
            FROM otp_attempts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<OtpAttempt>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, provider, phone_number, payload, status, created_at
            FROM otp_attempts
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        rows.iter().map(Self::map_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_predecessors_follow_lifecycle() {
        assert!(allowed_predecessors(OtpStatus::Pending).is_empty());
        assert_eq!(allowed_predecessors(OtpStatus::Sent), &["pending"]);
        assert_eq!(allowed_predecessors(OtpStatus::Delivered), &["sent"]);
        assert_eq!(allowed_predecessors(OtpStatus::Failed), &["pending", "sent"]);
    }
}
