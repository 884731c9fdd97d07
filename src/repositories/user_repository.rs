use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::store::PgFleetTx;
use crate::models::{NewUser, User};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait UserRepository: Send {
    async fn insert_user(&mut self, input: &NewUser) -> AppResult<User>;
    async fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>>;
}

#[async_trait]
impl UserRepository for PgFleetTx {
    async fn insert_user(&mut self, input: &NewUser) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(Utc::now())
        .fetch_one(self.conn()?)
        .await?;

        Ok(user)
    }

    async fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;

        Ok(user)
    }

    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.conn()?)
            .await?;

        Ok(user)
    }
}
