//! Task route handlers
//!
//! All endpoints here sit behind the JWT middleware; the owning user id is
//! always taken from the authenticated context, never from the payload.

pub mod handlers;
