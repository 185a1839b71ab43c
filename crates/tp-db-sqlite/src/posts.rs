//! `PostRepo` implementation: posts, stars, ratings, comments.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use tp_core::error::{AppError, Result};
use tp_core::models::{
    Comment, NewPost, Post, PostDetail, PostPatch, PostSummary, StarredPost,
};
use tp_core::traits::PostRepo;

use crate::{db_err, is_unique_violation, SqliteStore};

const POST_COLUMNS: &str = "post_id, title, description, user_id, images, created_at, updated_at";

fn post_from_row(row: &SqliteRow) -> Post {
    Post {
        post_id: row.get("post_id"),
        title: row.get("title"),
        description: row.get("description"),
        user_id: row.get("user_id"),
        images: row.get("images"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn comment_from_row(row: &SqliteRow) -> Comment {
    Comment {
        comment_id: row.get("comment_id"),
        post_id: row.get("post_id"),
        user_id: row.get("user_id"),
        username: row.get("username"),
        body: row.get("body"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl PostRepo for SqliteStore {
    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO posts (title, description, user_id, images, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&post.title)
        .bind(&post.description)
        .bind(post.user_id)
        .bind(&post.images)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(db_err)?;

        Ok(Post {
            post_id: result.last_insert_rowid(),
            title: post.title,
            description: post.description,
            user_id: post.user_id,
            images: post.images,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM posts WHERE post_id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(post_from_row))
    }

    async fn get_post_detail(&self, id: i64, viewer: i64) -> Result<Option<PostDetail>> {
        let post = match self.get_post(id).await? {
            Some(post) => post,
            None => return Ok(None),
        };

        let starred = sqlx::query(
            "SELECT 1 FROM starred_posts WHERE user_id = ? AND post_id = ?",
        )
        .bind(viewer)
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;

        let avg_row = sqlx::query("SELECT AVG(rating) AS average_rating FROM ratings WHERE post_id = ?")
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map_err(db_err)?;

        let comments = self.list_comments(id).await?;

        Ok(Some(PostDetail {
            post,
            is_starred: starred.is_some(),
            average_rating: avg_row.get("average_rating"),
            comments,
        }))
    }

    async fn list_posts(&self) -> Result<Vec<PostSummary>> {
        let rows = sqlx::query(
            "SELECT p.post_id, p.title, p.description, p.user_id, p.images, \
                    p.created_at, p.updated_at, \
                    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.post_id) AS comment_count, \
                    (SELECT AVG(r.rating) FROM ratings r WHERE r.post_id = p.post_id) AS average_rating \
             FROM posts p \
             ORDER BY p.created_at DESC, p.post_id DESC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;

        Ok(rows
            .iter()
            .map(|row| PostSummary {
                post: post_from_row(row),
                comment_count: row.get("comment_count"),
                average_rating: row.get("average_rating"),
            })
            .collect())
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Post> {
        let mut post = self
            .get_post(id)
            .await?
            .ok_or(AppError::NotFound("post", id))?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(description) = patch.description {
            post.description = description;
        }
        if let Some(images) = patch.images {
            post.images = Some(images);
        }
        post.updated_at = Utc::now();

        sqlx::query(
            "UPDATE posts SET title = ?, description = ?, images = ?, updated_at = ? \
             WHERE post_id = ?",
        )
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.images)
        .bind(post.updated_at)
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(db_err)?;

        Ok(post)
    }

    async fn delete_post(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE post_id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn star_post(&self, user_id: i64, post_id: i64) -> Result<StarredPost> {
        if !self.post_exists(post_id).await? {
            return Err(AppError::NotFound("post", post_id));
        }

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO starred_posts (user_id, post_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(post_id)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("post is already starred".to_string())
            } else {
                db_err(e)
            }
        })?;

        Ok(StarredPost {
            star_id: result.last_insert_rowid(),
            user_id,
            post_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn unstar_post(&self, user_id: i64, post_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM starred_posts WHERE user_id = ? AND post_id = ?")
            .bind(user_id)
            .bind(post_id)
            .execute(self.pool())
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_starred(&self, user_id: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            "SELECT p.post_id, p.title, p.description, p.user_id, p.images, \
                    p.created_at, p.updated_at \
             FROM posts p \
             JOIN starred_posts s ON s.post_id = p.post_id \
             WHERE s.user_id = ? \
             ORDER BY s.created_at DESC, s.star_id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;

        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn rate_post(&self, user_id: i64, post_id: i64, rating: i32) -> Result<()> {
        if !self.post_exists(post_id).await? {
            return Err(AppError::NotFound("post", post_id));
        }

        let now = Utc::now();
        sqlx::query(
            "INSERT INTO ratings (user_id, post_id, rating, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT (user_id, post_id) \
             DO UPDATE SET rating = excluded.rating, updated_at = excluded.updated_at",
        )
        .bind(user_id)
        .bind(post_id)
        .bind(rating)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn delete_rating(&self, user_id: i64, post_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ratings WHERE user_id = ? AND post_id = ?")
            .bind(user_id)
            .bind(post_id)
            .execute(self.pool())
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_comment(&self, post_id: i64, user_id: i64, body: &str) -> Result<Comment> {
        if !self.post_exists(post_id).await? {
            return Err(AppError::NotFound("post", post_id));
        }

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO comments (post_id, user_id, body, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(body)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(db_err)?;

        let username = sqlx::query("SELECT username FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(self.pool())
            .await
            .map_err(db_err)?
            .map(|row| row.get("username"));

        Ok(Comment {
            comment_id: result.last_insert_rowid(),
            post_id,
            user_id: Some(user_id),
            username,
            body: body.to_string(),
            created_at: now,
        })
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        if !self.post_exists(post_id).await? {
            return Err(AppError::NotFound("post", post_id));
        }

        let rows = sqlx::query(
            "SELECT c.comment_id, c.post_id, c.user_id, u.username, c.body, c.created_at \
             FROM comments c \
             LEFT JOIN users u ON u.user_id = c.user_id \
             WHERE c.post_id = ? \
             ORDER BY c.created_at DESC, c.comment_id DESC",
        )
        .bind(post_id)
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;

        Ok(rows.iter().map(comment_from_row).collect())
    }
}
