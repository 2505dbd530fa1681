use sqlx::PgPool;

use crate::models::{pagination::Page, user::UserSummary};

pub struct UserService;

impl UserService {
    pub async fn list_all(pool: &PgPool) -> anyhow::Result<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, email, gender, role FROM users ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        Ok(users)
    }

    pub async fn list_page(pool: &PgPool, page: Page) -> anyhow::Result<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, email, gender, role FROM users
             ORDER BY id
             LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(users)
    }
}
