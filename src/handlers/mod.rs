mod auth;
mod task;

#[cfg(test)]
mod tests;

pub use auth::{login, signup};
pub use task::{
    create_task, delete_task, list_all_tasks, list_user_tasks, set_task_completion, update_task,
};
