use sqlx::PgPool;
use uuid::Uuid;

use crate::tasks::repo_types::{Task, TaskStatus};

impl Task {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        title: &str,
        status: TaskStatus,
    ) -> anyhow::Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, status, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, status, user_id, created_at
            "#,
        )
        .bind(title)
        .bind(status)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(task)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, status, user_id, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(task)
    }

    /// Partial update; untouched columns keep their value. Last write wins on
    /// concurrent updates to the same task.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        title: Option<&str>,
        status: Option<TaskStatus>,
    ) -> anyhow::Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                status = COALESCE($3, status)
            WHERE id = $1
            RETURNING id, title, status, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(status)
        .fetch_one(db)
        .await?;
        Ok(task)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM tasks WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// One page of tasks, newest first. `owner` of `None` means no scope
    /// filter (admin view).
    pub async fn page(
        db: &PgPool,
        owner: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, status, user_id, created_at
            FROM tasks
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: &PgPool, owner: Option<Uuid>) -> anyhow::Result<i64> {
        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM tasks
            WHERE ($1::uuid IS NULL OR user_id = $1)
            "#,
        )
        .bind(owner)
        .fetch_one(db)
        .await?;
        Ok(total.0)
    }
}
