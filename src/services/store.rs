use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;

use crate::models::{NewTask, Priority, Task, TaskStatus, User};

/// Thin data-access layer over the relational store. Every method is a single
/// parameterized statement; callers that need more than one get no atomicity
/// beyond what each statement provides on its own.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                name     TEXT NOT NULL,
                email    TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL,
                title       TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                due_date    TEXT NOT NULL,
                priority    TEXT NOT NULL DEFAULT 'Medium',
                status      TEXT NOT NULL DEFAULT 'pending'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, name, email, password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO users (name, email, password) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(password)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn all_tasks(&self) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn tasks_for_user(&self, user_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Inserts a task and returns the generated row id. Status is left to the
    /// column default ('pending').
    pub async fn insert_task(&self, task: &NewTask) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO tasks (user_id, title, description, due_date, priority) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(task.user_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.priority)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Returns the number of rows removed (0 means the id did not exist).
    pub async fn delete_task(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn set_task_status(
        &self,
        id: i64,
        status: TaskStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Overwrites the four editable fields; status and owner are untouched.
    pub async fn update_task(
        &self,
        id: i64,
        title: &str,
        description: &str,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, due_date = ?, priority = ? \
             WHERE id = ?",
        )
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(priority)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
