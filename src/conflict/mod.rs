// src/conflict/mod.rs

//! Conflict arbitration and user confirmation.
//!
//! Turns a plan's conflicts and removals into a decision: interactively
//! via risk-tiered confirmation prompts, or automatically via safe and
//! forced resolution plans. Anything the safety policy forbids is blocked
//! unconditionally, whatever the user answers.

mod handler;
mod prompt;

pub use handler::{display_operation_result, ConflictHandler};
pub use prompt::{AutoConfirm, Confirmation, ConsolePrompt};
