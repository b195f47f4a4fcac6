//! Shared domain types for GoalBot.
//!
//! This crate contains the domain types used across the GoalBot workspace:
//! chat messages and completion shapes, goal-page types, and configuration.
//!
//! Zero infrastructure dependencies -- only serde, thiserror, secrecy.

pub mod config;
pub mod llm;
pub mod page;
