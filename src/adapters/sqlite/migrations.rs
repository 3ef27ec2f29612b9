//! Embedded schema migrations for the credential table.

use std::collections::HashSet;

use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Failed to read migration ledger: {0}")]
    Ledger(#[source] sqlx::Error),
    #[error("Migration {version} ({description}) failed: {source}")]
    Apply {
        version: i64,
        description: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// One SQL script, compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub sql: &'static str,
}

/// Every migration the store knows about, in apply order.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "create exact_online and seed recognized keys",
    sql: include_str!("../../../migrations/001_initial_schema.sql"),
}];

/// Applies [`MIGRATIONS`] and records each version in `schema_migrations`.
pub struct Migrator {
    pool: SqlitePool,
}

impl Migrator {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply every embedded migration not yet recorded. Returns how many ran.
    pub async fn run(&self) -> Result<usize, MigrationError> {
        self.run_migrations(MIGRATIONS).await
    }

    /// Apply each migration in `migrations` whose version is not recorded.
    ///
    /// Pending versions are picked by set membership rather than by the
    /// highest version, so a script added below an applied one still runs.
    pub async fn run_migrations(&self, migrations: &[Migration]) -> Result<usize, MigrationError> {
        self.ensure_ledger().await?;
        let applied: HashSet<i64> = self.applied_versions().await?.into_iter().collect();

        let mut count = 0;
        for migration in migrations.iter().filter(|m| !applied.contains(&m.version)) {
            self.apply(migration).await?;
            tracing::info!(
                version = migration.version,
                description = migration.description,
                "migration applied"
            );
            count += 1;
        }
        Ok(count)
    }

    /// Recorded versions, ascending.
    pub async fn applied_versions(&self) -> Result<Vec<i64>, MigrationError> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT version FROM schema_migrations ORDER BY version")
                .fetch_all(&self.pool)
                .await
                .map_err(MigrationError::Ledger)?;
        Ok(rows.into_iter().map(|(v,)| v).collect())
    }

    async fn ensure_ledger(&self) -> Result<(), MigrationError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(MigrationError::Ledger)?;
        Ok(())
    }

    /// Script and ledger row commit together, so a failed script leaves no record.
    async fn apply(&self, migration: &Migration) -> Result<(), MigrationError> {
        let failed = |source| MigrationError::Apply {
            version: migration.version,
            description: migration.description,
            source,
        };

        let mut tx = self.pool.begin().await.map_err(failed)?;
        sqlx::raw_sql(migration.sql)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;
        sqlx::query("INSERT INTO schema_migrations (version, description) VALUES (?1, ?2)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;
        tx.commit().await.map_err(failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_test_pool;
    use crate::domain::models::CredentialKey;

    #[tokio::test]
    async fn test_migrations_seed_every_key() {
        let pool = create_test_pool().await.unwrap();

        let applied = Migrator::new(pool.clone())
            .run()
            .await
            .expect("migrations should apply");
        assert_eq!(applied, MIGRATIONS.len());

        let keys: Vec<(String,)> = sqlx::query_as("SELECT key FROM exact_online")
            .fetch_all(&pool)
            .await
            .unwrap();
        let keys: Vec<String> = keys.into_iter().map(|(k,)| k).collect();
        for key in CredentialKey::ALL {
            assert!(keys.contains(&key.as_str().to_string()), "missing {key}");
        }
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_test_pool().await.unwrap();
        let migrator = Migrator::new(pool);

        migrator.run().await.unwrap();
        assert_eq!(migrator.run().await.unwrap(), 0);
        assert_eq!(migrator.applied_versions().await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_gap_in_versions_is_filled() {
        let pool = create_test_pool().await.unwrap();
        let migrator = Migrator::new(pool.clone());
        let v1 = MIGRATIONS[0];
        let v2 = Migration {
            version: 2,
            description: "add notes table",
            sql: "CREATE TABLE notes (body TEXT);",
        };
        let v3 = Migration {
            version: 3,
            description: "add audit table",
            sql: "CREATE TABLE audit (entry TEXT);",
        };

        assert_eq!(migrator.run_migrations(&[v1, v3]).await.unwrap(), 2);
        assert_eq!(migrator.run_migrations(&[v1, v2, v3]).await.unwrap(), 1);
        assert_eq!(migrator.applied_versions().await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failed_script_is_not_recorded() {
        let pool = create_test_pool().await.unwrap();
        let migrator = Migrator::new(pool);
        let broken = Migration {
            version: 7,
            description: "broken",
            sql: "CREATE TABLE;",
        };

        let err = migrator.run_migrations(&[broken]).await.unwrap_err();
        assert!(matches!(err, MigrationError::Apply { version: 7, .. }));
        assert!(migrator.applied_versions().await.unwrap().is_empty());
    }
}
