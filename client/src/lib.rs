//! # TaskBoard Client
//!
//! Session-aware HTTP client library for the TaskBoard API.
//!
//! The client caches the current access/refresh token pair (durably, via a
//! pluggable [`storage::TokenStore`]), attaches the access token to every
//! protected call, and on a single authentication failure per call performs
//! one silent refresh and replay. Concurrent failures coalesce into a
//! single in-flight refresh.

pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;

pub use client::ApiClient;
pub use error::ClientError;
pub use models::{AuthPayload, NewTaskPayload, Task, TaskStatus, UpdateTaskPayload, UserProfile};
pub use storage::{FileTokenStore, MemoryTokenStore, StoredTokens, TokenStore};
