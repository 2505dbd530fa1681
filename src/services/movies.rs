use sqlx::PgPool;

use crate::models::{
    movie::{Movie, MovieFields},
    pagination::Page,
};

pub struct MovieService;

impl MovieService {
    pub async fn list_all(pool: &PgPool) -> anyhow::Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT id, title, genres, year FROM movies ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        Ok(movies)
    }

    pub async fn list_page(pool: &PgPool, page: Page) -> anyhow::Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT id, title, genres, year FROM movies
             ORDER BY id
             LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(movies)
    }

    pub async fn create(pool: &PgPool, fields: &MovieFields) -> anyhow::Result<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (title, genres, year)
             VALUES ($1, $2, $3)
             RETURNING id, title, genres, year",
        )
        .bind(&fields.title)
        .bind(&fields.genres)
        .bind(fields.year)
        .fetch_one(pool)
        .await?;
        Ok(movie)
    }

    /// Returns `false` when no movie has this id.
    pub async fn update(pool: &PgPool, id: i32, fields: &MovieFields) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE movies SET title = $1, genres = $2, year = $3 WHERE id = $4",
        )
        .bind(&fields.title)
        .bind(&fields.genres)
        .bind(fields.year)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no movie has this id.
    pub async fn delete(pool: &PgPool, id: i32) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
