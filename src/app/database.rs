use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::app::configuration::DatabaseSettings;

/// Schema steps, applied in order. Append only: a step that has shipped is never edited.
pub const MIGRATIONS: &[&str] = &[r#"
    CREATE TABLE subscribers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE
    );
    "#];

/// Applies the schema steps a database has not seen yet.
///
/// Progress is kept in the `migrations` ledger: one row per applied step,
/// keyed by its 1-based position in the step list.
#[derive(Clone, Copy, Debug)]
pub struct Migrator {
    steps: &'static [&'static str],
}

impl Migrator {
    pub fn new(steps: &'static [&'static str]) -> Self {
        Self { steps }
    }

    /// Apply every pending step, each in its own transaction.
    ///
    /// Returns the number of steps applied by this call.
    #[tracing::instrument(name = "migrating the database", skip(self, pool))]
    pub async fn run(&self, pool: &SqlitePool) -> Result<usize, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS migrations (
                migration_order INTEGER NOT NULL,
                applied_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        let applied: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(migration_order), 0) FROM migrations")
                .fetch_one(pool)
                .await?;
        let applied = usize::try_from(applied).unwrap_or_default();

        if applied >= self.steps.len() {
            tracing::debug!("Database is up to date (version {})", applied);
            return Ok(0);
        }

        for (index, step) in self.steps.iter().enumerate().skip(applied) {
            let order = index as i64 + 1;
            let mut transaction = pool.begin().await?;
            sqlx::raw_sql(step).execute(&mut *transaction).await?;
            sqlx::query("INSERT INTO migrations (migration_order, applied_at) VALUES (?, ?)")
                .bind(order)
                .bind(Utc::now().timestamp())
                .execute(&mut *transaction)
                .await?;
            transaction.commit().await?;
            tracing::info!("Migration {} applied", order);
        }

        Ok(self.steps.len() - applied)
    }
}

/// Open the connection pool described by `settings` and bring its schema up to date.
pub async fn open_database(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_db_connections)
        .connect_with(settings.connect_options()?)
        .await?;
    Migrator::new(MIGRATIONS).run(&pool).await?;
    Ok(pool)
}
