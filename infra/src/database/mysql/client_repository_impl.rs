//! MySQL implementation of the client/allowed-sender registry
//!
//! A client and its allowed senders form one aggregate: both the create
//! and the cascade delete run inside a single transaction, so no partial
//! state can be observed.

use async_trait::async_trait;
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error};

use od_core::domain::entities::client::Client;
use od_core::errors::DomainError;
use od_core::repositories::ClientRepository;

/// MySQL-backed client repository
pub struct MySqlClientRepository {
    pool: Pool<MySql>,
}

impl MySqlClientRepository {
    /// Create a new client repository
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    async fn senders_for(&self, client_id: i64) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            "SELECT sender_id FROM allowed_senders WHERE client_id = ? ORDER BY id ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("sender_id").map_err(internal))
            .collect()
    }
}

fn internal(e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("database error: {}", e),
    }
}

#[async_trait]
impl ClientRepository for MySqlClientRepository {
    async fn create(&self, mut client: Client) -> Result<Client, DomainError> {
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let result = sqlx::query("INSERT INTO clients (name, created_at) VALUES (?, ?)")
            .bind(&client.name)
            .bind(client.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db)
                    if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
                {
                    DomainError::Validation {
                        message: format!("client '{}' is already registered", client.name),
                    }
                }
                _ => {
                    error!(client = %client.name, error = %e, "failed to insert client");
                    internal(e)
                }
            })?;

        client.id = result.last_insert_id() as i64;

        for sender_id in &client.allowed_senders {
            sqlx::query("INSERT INTO allowed_senders (client_id, sender_id) VALUES (?, ?)")
                .bind(client.id)
                .bind(sender_id)
                .execute(&mut *tx)
                .await
                .map_err(internal)?;
        }

        tx.commit().await.map_err(internal)?;

        debug!(
            client = %client.name,
            senders = client.allowed_senders.len(),
            "inserted client with allowed senders"
        );

        Ok(client)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Client>, DomainError> {
        let row = sqlx::query("SELECT id, name, created_at FROM clients WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: i64 = row.try_get("id").map_err(internal)?;
        Ok(Some(Client {
            id,
            name: row.try_get("name").map_err(internal)?,
            allowed_senders: self.senders_for(id).await?,
            created_at: row.try_get("created_at").map_err(internal)?,
        }))
    }

    async fn list_all(&self) -> Result<Vec<Client>, DomainError> {
        let rows = sqlx::query("SELECT id, name, created_at FROM clients ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(internal)?;

        let mut clients = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row.try_get("id").map_err(internal)?;
            clients.push(Client {
                id,
                name: row.try_get("name").map_err(internal)?,
                allowed_senders: self.senders_for(id).await?,
                created_at: row.try_get("created_at").map_err(internal)?,
            });
        }

        Ok(clients)
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let row = sqlx::query("SELECT id FROM clients WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *tx)
            .await
            .map_err(internal)?;

        let Some(row) = row else {
            return Ok(false);
        };
        let id: i64 = row.try_get("id").map_err(internal)?;

        sqlx::query("DELETE FROM allowed_senders WHERE client_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(internal)?;
        sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(internal)?;

        tx.commit().await.map_err(internal)?;

        debug!(client = %name, "deleted client and its allowed senders");
        Ok(true)
    }
}
