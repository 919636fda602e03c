use chrono::NaiveDate;
use serde::Deserialize;

use super::task::Priority;

#[derive(Debug, Deserialize)]
pub struct SignupPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

// Everything but the title is optional; defaults are filled in by the handler.
#[derive(Debug, Deserialize)]
pub struct CreateTaskPayload {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionPayload {
    pub completed: bool,
}
