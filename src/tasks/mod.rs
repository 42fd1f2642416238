// src/tasks/mod.rs

//! The task table: what each task name runs, in which order, and what it
//! watches.
//!
//! - [`table`] holds the immutable name -> definition mapping.
//! - [`plan`] resolves an invocation into the ordered list of tasks to run.

pub mod plan;
pub mod table;

pub use plan::plan;
pub use table::{TaskDef, TaskTable};
