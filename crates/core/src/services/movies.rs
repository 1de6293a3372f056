use crate::db::DbPool;
use crate::error::{Error, Result};
use crate::models::{CreateMovie, Movie, UpdateMovie};

pub struct MovieService {
    pool: DbPool,
}

impl MovieService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>("SELECT * FROM movies ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(movies)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Movie> {
        sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFound)
    }

    pub async fn create(&self, input: CreateMovie) -> Result<Movie> {
        input.validate()?;

        let result = sqlx::query("INSERT INTO movies (title, release_date) VALUES (?, ?)")
            .bind(input.title.trim())
            .bind(input.release_date)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        tracing::info!(movie_id = id, "Movie created");

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, input: UpdateMovie) -> Result<Movie> {
        input.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = ?, release_date = ?
            WHERE id = ?
            "#,
        )
        .bind(input.title.trim())
        .bind(input.release_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }
        tracing::info!(movie_id = id, "Movie updated");

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }
        tracing::info!(movie_id = id, "Movie deleted");

        Ok(())
    }
}
