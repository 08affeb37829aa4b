//! Core data model for the GridHub tips catalog.
//! This crate is the single source of truth for the group/item model and
//! the top-items window invariant.

pub mod collection;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod source;

pub use collection::change::{ChangeKind, ListChange};
pub use collection::observable_list::{ListError, ListResult, ListView, ObservableList};
pub use collection::window::{TopWindow, DEFAULT_TOP_ITEMS_CAPACITY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::field::Field;
pub use model::group::{Group, GroupConfig, GroupFields, GroupId, GroupSnapshot};
pub use model::image::{resolve_asset_uri, ImageHandle, ImageRef, ASSET_BASE_URI};
pub use model::item::{generate_item_id, DisplaySpan, Item, ItemFields, ItemId, ItemSnapshot};
pub use model::validation::ValidationError;
pub use notify::{Notifier, Subscription};
pub use service::catalog_service::{
    CatalogError, CatalogResult, CatalogService, GroupSection, ItemRequest, ItemTile,
};
pub use service::preview::derive_content_preview;
pub use source::data_source::{DataSource, LookupError, RecordKind, ALL_GROUPS_KEY};
pub use source::sample::sample_data_source;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
