//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate data source calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from record handles.

pub mod catalog_service;
pub mod preview;
