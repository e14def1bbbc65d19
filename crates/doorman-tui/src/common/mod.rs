//! Shared building blocks for the TUI (tasks, text fields, status messages).

pub mod field;
pub mod status;
pub mod task;

pub use field::Field;
pub use status::{StatusKind, StatusMessage, flow_error_message};
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
