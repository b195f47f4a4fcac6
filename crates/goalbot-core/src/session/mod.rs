//! Per-user conversation sessions.

pub mod store;

pub use store::{SessionStore, UserId};
