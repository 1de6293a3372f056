use crate::db::DbPool;
use crate::error::{Error, Result};
use crate::models::{Actor, CreateActor, UpdateActor};

pub struct ActorService {
    pool: DbPool,
}

impl ActorService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Actor>> {
        let actors = sqlx::query_as::<_, Actor>("SELECT * FROM actors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(actors)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Actor> {
        sqlx::query_as::<_, Actor>("SELECT * FROM actors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFound)
    }

    pub async fn create(&self, input: CreateActor) -> Result<Actor> {
        input.validate()?;

        let result = sqlx::query("INSERT INTO actors (name, age, gender) VALUES (?, ?, ?)")
            .bind(input.name.trim())
            .bind(input.age)
            .bind(input.gender.trim())
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        tracing::info!(actor_id = id, "Actor created");

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, input: UpdateActor) -> Result<Actor> {
        input.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE actors
            SET name = ?, age = ?, gender = ?
            WHERE id = ?
            "#,
        )
        .bind(input.name.trim())
        .bind(input.age)
        .bind(input.gender.trim())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }
        tracing::info!(actor_id = id, "Actor updated");

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM actors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }
        tracing::info!(actor_id = id, "Actor deleted");

        Ok(())
    }
}
