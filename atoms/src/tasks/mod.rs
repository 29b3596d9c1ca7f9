
// Re-export model types and service functions
pub mod http;
pub mod model;
pub mod service;

pub use model::{CreateTaskPayload, Task, TaskPriority, TaskStatus, UpdateTaskPayload};
pub use service::{DynamoTaskStore, PendingTask, TaskStore};
