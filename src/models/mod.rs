mod payloads;
mod task;
mod user;

pub use payloads::{CompletionPayload, CreateTaskPayload, LoginPayload, SignupPayload, UpdateTaskPayload};
pub use task::{NewTask, Priority, Task, TaskStatus};
pub use user::User;
