use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    models::{BlogPost, NewBlogPost},
    Error, Result,
};

/// Persistence for blog posts, keyed by `id`. Titles are unique.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts in insertion order.
    async fn list_all(&self) -> Result<Vec<BlogPost>>;

    async fn get(&self, id: i64) -> Result<BlogPost>;

    async fn create(&self, post: &NewBlogPost) -> Result<BlogPost>;

    /// Overwrites every column but `id`. Last write wins.
    async fn update(&self, id: i64, post: &NewBlogPost) -> Result<BlogPost>;

    async fn delete(&self, id: i64) -> Result<()>;
}

#[derive(Clone)]
pub struct SqlitePostStore {
    pool: SqlitePool,
}

impl SqlitePostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, title: &str) -> Error {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return Error::UniqueConstraintViolation(format!(
                "A post titled \"{}\" already exists",
                title
            ));
        }
    }
    Error::from(e)
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn list_all(&self) -> Result<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_post ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn get(&self, id: i64) -> Result<BlogPost> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_post WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFound)
    }

    async fn create(&self, post: &NewBlogPost) -> Result<BlogPost> {
        let created = sqlx::query_as::<_, BlogPost>(
            "INSERT INTO blog_post (title, subtitle, date, body, author, img_url) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&post.title)
        .bind(&post.subtitle)
        .bind(&post.date)
        .bind(&post.body)
        .bind(&post.author)
        .bind(&post.img_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &post.title))?;

        tracing::info!(id = created.id, title = %created.title, "Created post");
        Ok(created)
    }

    async fn update(&self, id: i64, post: &NewBlogPost) -> Result<BlogPost> {
        let updated = sqlx::query_as::<_, BlogPost>(
            "UPDATE blog_post SET title = ?, subtitle = ?, date = ?, body = ?, author = ?, img_url = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(&post.title)
        .bind(&post.subtitle)
        .bind(&post.date)
        .bind(&post.body)
        .bind(&post.author)
        .bind(&post.img_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &post.title))?
        .ok_or(Error::NotFound)?;

        tracing::info!(id, "Updated post");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM blog_post WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        tracing::info!(id, "Deleted post");
        Ok(())
    }
}
