//! Business logic for GoalBot.
//!
//! This crate owns the conversation session store, the provider traits for
//! the two external adapters (completion API, document store), and the
//! orchestrator that wires a user turn through them. Concrete adapter
//! implementations live in goalbot-infra.

pub mod llm;
pub mod orchestrator;
pub mod page;
pub mod prompt;
pub mod reply;
pub mod session;
