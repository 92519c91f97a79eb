//! Task service module
//!
//! Owner-scoped CRUD over the Task entity. All operations take the
//! authenticated user id derived from the request context, never a
//! client-supplied owner.

mod service;

#[cfg(test)]
mod tests;

pub use service::{NewTask, TaskChanges, TaskService};
