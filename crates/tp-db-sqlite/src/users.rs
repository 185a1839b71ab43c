//! `UserRepo` implementation: account rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use tp_core::error::{AppError, Result};
use tp_core::models::{NewUser, User};
use tp_core::traits::UserRepo;

use crate::{db_err, is_unique_violation, SqliteStore};

fn user_from_row(row: &SqliteRow) -> User {
    User {
        user_id: row.get("user_id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        is_admin: row.get("is_admin"),
        last_login: row.get::<Option<DateTime<Utc>>, _>("last_login"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl UserRepo for SqliteStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, is_admin, created_at) VALUES (?, ?, 0, ?)",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("username '{}' is already taken", user.username))
            } else {
                db_err(e)
            }
        })?;

        Ok(User {
            user_id: result.last_insert_rowid(),
            username: user.username,
            password_hash: user.password_hash,
            is_admin: false,
            last_login: None,
            created_at: now,
        })
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT user_id, username, password_hash, is_admin, last_login, created_at \
             FROM users WHERE user_id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT user_id, username, password_hash, is_admin, last_login, created_at \
             FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn touch_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = ? WHERE user_id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }
}
