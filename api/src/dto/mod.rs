//! Request and response DTOs for the HTTP surface.
//!
//! Wire field names are camelCase; the error body shape lives in
//! `tb_shared::types::response`.

pub mod auth;
pub mod task;
