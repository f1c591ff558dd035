//! Database repositories for the brass-lantern server.

pub mod task;

pub use task::{Task, TaskRepository};
