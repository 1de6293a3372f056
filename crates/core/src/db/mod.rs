use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;

pub type DbPool = SqlitePool;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    // Ensure the data directory exists
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    // Run migrations
    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}

/// Deletes every actor and movie, then inserts one sample row of each.
pub async fn reset_and_seed(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM actors").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM movies").execute(&mut *tx).await?;

    sqlx::query("INSERT INTO actors (name, age, gender) VALUES (?, ?, ?)")
        .bind("Shahruk")
        .bind(49)
        .bind("Male")
        .execute(&mut *tx)
        .await?;

    sqlx::query("INSERT INTO movies (title, release_date) VALUES (?, ?)")
        .bind("DDLJ")
        .bind(Utc::now().date_naive())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!("Database reset with sample records");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_db;

    #[tokio::test]
    async fn test_reset_and_seed_replaces_existing_rows() {
        let pool = create_test_db().await;

        sqlx::query("INSERT INTO actors (name, age, gender) VALUES ('Old', 70, 'F')")
            .execute(&pool)
            .await
            .unwrap();

        reset_and_seed(&pool).await.unwrap();
        reset_and_seed(&pool).await.unwrap();

        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM actors")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(names, vec!["Shahruk".to_string()]);

        let titles: Vec<String> = sqlx::query_scalar("SELECT title FROM movies")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(titles, vec!["DDLJ".to_string()]);
    }
}
