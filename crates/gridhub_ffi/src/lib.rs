//! Flutter bridge for the hub catalog.

pub mod api;
