//! Domain model for the hub's group → item hierarchy.
//!
//! # Responsibility
//! - Define item and group records with typed change notification.
//! - Keep each group's top-items window consistent with its full item list.
//!
//! # Invariants
//! - Records are shared `Rc` handles; the model is single-threaded.
//! - Items reference their group by id, never by ownership.

mod common;
pub mod field;
pub mod group;
pub mod image;
pub mod item;
pub mod validation;
