//! The subscriber registry, backed by the `subscribers` table.

use sqlx::SqlitePool;

use crate::domain::SubscriberEmail;

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("subscriber already exists")]
    Conflict,
    #[error("failed to store subscriber: {0}")]
    Internal(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RegisterError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                RegisterError::Conflict
            }
            _ => RegisterError::Internal(error),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberStore {
    pool: SqlitePool,
}

impl SubscriberStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert `email` unless an identical address is already registered.
    ///
    /// The existence check and the insert run as a single statement, so the
    /// transaction takes the write lock before reading and a concurrent
    /// registration waits for it instead of racing on a stale snapshot. The
    /// unique index still backs the invariant: a violation is reported as
    /// [`RegisterError::Conflict`] as well.
    #[tracing::instrument(
        name = "inserting new subscriber in the database",
        skip(self, email),
        fields(email = %email.as_ref())
    )]
    pub async fn register(&self, email: &SubscriberEmail) -> Result<(), RegisterError> {
        let mut transaction = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO subscribers (email)
            SELECT ?1
            WHERE NOT EXISTS (SELECT 1 FROM subscribers WHERE email = ?1)
            "#,
        )
        .bind(email.as_ref())
        .execute(&mut *transaction)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?
        .rows_affected();

        if inserted == 0 {
            transaction.rollback().await?;
            tracing::info!("Subscriber already exists");
            return Err(RegisterError::Conflict);
        }

        transaction.commit().await?;
        tracing::info!("Subscriber inserted");
        Ok(())
    }

    #[tracing::instrument(name = "listing subscriber emails", skip(self))]
    pub async fn list_emails(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT email FROM subscribers ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }
}
