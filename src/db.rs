use anyhow::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const MIGRATIONS_DIR: &str = "migrations";

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    run_migrations_from(conn, MIGRATIONS_DIR).await
}

/// Executes the `.sql` files in `dir` in filename order. Every statement uses
/// `IF NOT EXISTS`, so re-running is harmless.
pub async fn run_migrations_from(conn: &DatabaseConnection, dir: impl AsRef<Path>) -> Result<()> {
    let mut entries = fs::read_dir(dir.as_ref()).await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    let backend = conn.get_database_backend();
    for file in files {
        tracing::debug!(file = %file.display(), "applying migration");
        let sql = fs::read_to_string(&file).await?;
        // Postgres prepared statements cannot contain multiple commands.
        for stmt in sql.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            conn.execute(Statement::from_string(backend, format!("{stmt};")))
                .await?;
        }
    }

    Ok(())
}
