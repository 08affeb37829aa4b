//! Observable ordered collections and derived views.
//!
//! # Responsibility
//! - Provide an ordered list that reports every structural mutation.
//! - Keep bounded prefix windows in step with their source list.
//!
//! # Invariants
//! - Every successful mutation emits exactly one `ListChange`.
//! - Out-of-range indices fail fast and leave the list untouched.

pub mod change;
pub mod observable_list;
pub mod window;
