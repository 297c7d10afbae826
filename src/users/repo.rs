use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::pagination::{Page, PageRequest};
use crate::users::repo_types::{NewUser, User, UserChanges};

/// Persistence for user records, shared by every handler through `AppState`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, new: &NewUser) -> anyhow::Result<User>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    /// Rows in insertion order.
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<User>>;
    async fn count(&self) -> anyhow::Result<i64>;
    /// Returns the number of rows affected.
    async fn update(&self, id: i64, changes: &UserChanges) -> anyhow::Result<u64>;
    /// Returns the number of rows affected.
    async fn delete(&self, id: i64) -> anyhow::Result<u64>;

    async fn page(&self, req: PageRequest) -> anyhow::Result<Page<User>> {
        let total = self.count().await?;
        let items = self.list(req.size(), req.offset()).await?;
        Ok(Page::new(req, items, total))
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new: &NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, date, company)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password, date, company
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password)
        .bind(new.date)
        .bind(&new.company)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, date, company
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, date, company
            FROM users
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list users")?;
        Ok(rows)
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await
            .context("count users")?;
        Ok(total)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET name = COALESCE($2, name),
                   email = COALESCE($3, email)
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.email.as_deref())
        .execute(&self.db)
        .await
        .context("update user")?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete user")?;
        Ok(res.rows_affected())
    }
}
