//! MySQL implementation of the backend config registry

use async_trait::async_trait;
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error};

use od_core::domain::entities::backend_config::BackendConfig;
use od_core::errors::DomainError;
use od_core::repositories::BackendConfigRepository;

/// MySQL-backed backend config repository
pub struct MySqlBackendConfigRepository {
    pool: Pool<MySql>,
}

impl MySqlBackendConfigRepository {
    /// Create a new backend config repository
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn map_row(row: &sqlx::mysql::MySqlRow) -> Result<BackendConfig, DomainError> {
        let kind: String = row.try_get("kind").map_err(internal)?;
        Ok(BackendConfig {
            name: row.try_get("name").map_err(internal)?,
            kind: kind.parse()?,
            host: row.try_get("host").map_err(internal)?,
            port: row.try_get("port").map_err(internal)?,
            username: row.try_get("username").map_err(internal)?,
            password: row.try_get("password").map_err(internal)?,
            sender_id: row.try_get("sender_id").map_err(internal)?,
            provisioned: row.try_get("provisioned").map_err(internal)?,
            created_at: row.try_get("created_at").map_err(internal)?,
        })
    }
}

fn internal(e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("database error: {}", e),
    }
}

#[async_trait]
impl BackendConfigRepository for MySqlBackendConfigRepository {
    async fn create(&self, config: BackendConfig) -> Result<BackendConfig, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO backend_configs
                (name, kind, host, port, username, password, sender_id, provisioned, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&config.name)
        .bind(config.kind.as_str())
        .bind(&config.host)
        .bind(config.port)
        .bind(&config.username)
        .bind(&config.password)
        .bind(&config.sender_id)
        .bind(config.provisioned)
        .bind(config.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                DomainError::Validation {
                    message: format!("backend '{}' is already registered", config.name),
                }
            }
            _ => {
                error!(backend = %config.name, error = %e, "failed to insert backend config");
                internal(e)
            }
        })?;

        debug!(backend = %config.name, kind = %config.kind, "inserted backend config");
        Ok(config)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<BackendConfig>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT name, kind, host, port, username, password, sender_id, provisioned, created_at
            FROM backend_configs
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<BackendConfig>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT name, kind, host, port, username, password, sender_id, provisioned, created_at
            FROM backend_configs
            ORDER BY created_at ASC, name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn set_provisioned(&self, name: &str, provisioned: bool) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE backend_configs SET provisioned = ? WHERE name = ?")
            .bind(provisioned)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        // MySQL reports zero affected rows both for a missing name and for
        // an update that left the value unchanged (an idempotent
        // re-provision), so only the former is an error.
        if result.rows_affected() == 0 {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT 1 FROM backend_configs WHERE name = ?")
                    .bind(name)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(internal)?;
            if exists.is_none() {
                return Err(DomainError::NotFound {
                    resource: format!("backend {}", name),
                });
            }
        }

        debug!(backend = %name, provisioned = provisioned, "recorded provisioning outcome");
        Ok(())
    }
}
