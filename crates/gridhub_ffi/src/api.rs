//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level catalog functions to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + `message`.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The catalog lives on the calling (UI) thread; it is built lazily on the
//!   first call and never shared across threads.

use gridhub_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    sample_data_source, CatalogService, GroupConfig, GroupSection, ItemTile,
};
use log::{info, warn};
use std::cell::RefCell;

const TOP_ITEMS_ENV: &str = "GRIDHUB_TOP_ITEMS";

thread_local! {
    static CATALOG: RefCell<Option<CatalogService>> = const { RefCell::new(None) };
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Tile-level view of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub item_id: String,
    /// `None` when the owning group no longer exists.
    pub group_id: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub content: String,
    /// Whitespace-normalized content excerpt for tiles.
    pub preview: Option<String>,
    pub col_span: u32,
    pub row_span: u32,
    pub image_uri: Option<String>,
}

/// Hub section view of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub group_id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_uri: Option<String>,
    pub item_count: u32,
    /// Items previewed in the hub section, in display order.
    pub top_items: Vec<ItemView>,
}

/// Response envelope for group listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupListResponse {
    pub ok: bool,
    pub groups: Vec<GroupView>,
    pub message: String,
}

/// Generic action response envelope for catalog mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub item_id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, item_id: Option<String>) -> Self {
        Self {
            ok: true,
            item_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// Lists every group under the collection `key` (only `AllGroups`).
#[flutter_rust_bridge::frb(sync)]
pub fn list_groups(key: String) -> GroupListResponse {
    let result = with_catalog(|catalog| {
        let sections = catalog
            .sections(key.trim())
            .map_err(|err| err.to_string())?;
        Ok(sections.into_iter().map(to_group_view).collect::<Vec<_>>())
    });
    match result {
        Ok(groups) => {
            let message = format!("Found {} group(s).", groups.len());
            GroupListResponse {
                ok: true,
                groups,
                message,
            }
        }
        Err(message) => GroupListResponse {
            ok: false,
            groups: Vec::new(),
            message: format!("list_groups failed: {message}"),
        },
    }
}

/// Returns one group, or `None` when absent or ambiguous.
#[flutter_rust_bridge::frb(sync)]
pub fn get_group(group_id: String) -> Option<GroupView> {
    with_catalog(|catalog| {
        catalog
            .section(group_id.trim())
            .map(to_group_view)
            .map_err(|err| err.to_string())
    })
    .ok()
}

/// Returns one item, or `None` when absent or ambiguous.
#[flutter_rust_bridge::frb(sync)]
pub fn get_item(item_id: String) -> Option<ItemView> {
    with_catalog(|catalog| {
        catalog
            .tile(item_id.trim())
            .map(to_item_view)
            .map_err(|err| err.to_string())
    })
    .ok()
}

/// Points an item at a new image asset path.
#[flutter_rust_bridge::frb(sync)]
pub fn set_item_image(item_id: String, path: String) -> ActionResponse {
    let item_id = item_id.trim().to_string();
    match with_catalog(|catalog| {
        catalog
            .set_item_image(&item_id, path.trim())
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => ActionResponse::success("Image updated.", Some(item_id)),
        Err(err) => ActionResponse::failure(format!("set_item_image failed: {err}")),
    }
}

/// Moves an item within its group.
#[flutter_rust_bridge::frb(sync)]
pub fn move_item(group_id: String, from: u32, to: u32) -> ActionResponse {
    match with_catalog(|catalog| {
        catalog
            .move_item(group_id.trim(), from as usize, to as usize)
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => ActionResponse::success("Item moved.", None),
        Err(err) => ActionResponse::failure(format!("move_item failed: {err}")),
    }
}

/// Removes the item at `index` from its group.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_item(group_id: String, index: u32) -> ActionResponse {
    match with_catalog(|catalog| {
        catalog
            .remove_item(group_id.trim(), index as usize)
            .map_err(|err| err.to_string())
    }) {
        Ok(item_id) => ActionResponse::success("Item removed.", Some(item_id)),
        Err(err) => ActionResponse::failure(format!("remove_item failed: {err}")),
    }
}

fn with_catalog<T>(f: impl FnOnce(&CatalogService) -> Result<T, String>) -> Result<T, String> {
    CATALOG.with(|cell| {
        let mut slot = cell
            .try_borrow_mut()
            .map_err(|_| "catalog is busy on this thread".to_string())?;
        if slot.is_none() {
            let config = resolve_group_config().inspect_err(|err| {
                warn!("event=catalog_init module=ffi status=error error={err}");
            })?;
            let source = sample_data_source(config)
                .map_err(|err| format!("catalog init failed: {err}"))?;
            info!(
                "event=catalog_init module=ffi status=ok capacity={}",
                config.top_items_capacity
            );
            *slot = Some(CatalogService::new(source));
        }
        match slot.as_ref() {
            Some(catalog) => f(catalog),
            None => Err("catalog unavailable".to_string()),
        }
    })
}

fn resolve_group_config() -> Result<GroupConfig, String> {
    let Ok(raw) = std::env::var(TOP_ITEMS_ENV) else {
        return Ok(GroupConfig::default());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(GroupConfig::default());
    }
    let capacity = trimmed
        .parse::<usize>()
        .map_err(|err| format!("{TOP_ITEMS_ENV} must be a positive integer: {err}"))?;
    GroupConfig::with_capacity(capacity).map_err(|err| format!("{TOP_ITEMS_ENV}: {err}"))
}

fn to_group_view(section: GroupSection) -> GroupView {
    let GroupSection { group, top_items } = section;
    GroupView {
        group_id: group.unique_id,
        title: group.title,
        subtitle: group.subtitle,
        description: group.description,
        image_uri: group.image_uri,
        item_count: u32::try_from(group.item_ids.len()).unwrap_or(u32::MAX),
        top_items: top_items.into_iter().map(to_item_view).collect(),
    }
}

fn to_item_view(tile: ItemTile) -> ItemView {
    let ItemTile { item, preview } = tile;
    ItemView {
        item_id: item.unique_id,
        group_id: item.group_id,
        title: item.title,
        subtitle: item.subtitle,
        description: item.description,
        content: item.content,
        preview,
        col_span: item.col_span,
        row_span: item.row_span,
        image_uri: item.image_uri,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, get_group, get_item, init_logging, list_groups, move_item, ping,
        remove_item, set_item_image,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn list_groups_accepts_only_all_groups() {
        let response = list_groups("AllGroups".to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.groups.len(), 4);
        assert_eq!(response.groups[0].item_count, 5);
        assert_eq!(response.groups[0].top_items.len(), 5);
        let first_tile = &response.groups[0].top_items[0];
        assert_eq!(first_tile.item_id, "Small-Group-1-Item1");
        assert_eq!(first_tile.group_id.as_deref(), Some("Group-1"));
        assert!(first_tile.preview.is_some());

        let rejected = list_groups("Favorites".to_string());
        assert!(!rejected.ok);
        assert!(rejected.message.contains("AllGroups"));
    }

    #[test]
    fn get_item_returns_preview_and_resolved_image() {
        let item = get_item(" Small-Group-1-Item2 ".to_string()).expect("item exists");
        assert_eq!(item.group_id.as_deref(), Some("Group-1"));
        assert_eq!(
            item.image_uri.as_deref(),
            Some("ms-appx:///Assets/HubPage/HubpageImage3.png")
        );
        assert!(item
            .preview
            .as_deref()
            .is_some_and(|text| text.starts_with("Love Detox")));
        assert!(get_item("missing".to_string()).is_none());
    }

    #[test]
    fn mutations_are_reflected_in_group_views() {
        let moved = move_item("Group-3".to_string(), 0, 3);
        assert!(moved.ok, "{}", moved.message);
        let group = get_group("Group-3".to_string()).expect("group exists");
        assert_eq!(group.top_items[3].item_id, "Big-Group-3-Item1");

        let removed = remove_item("Group-3".to_string(), 3);
        assert!(removed.ok, "{}", removed.message);
        assert_eq!(removed.item_id.as_deref(), Some("Big-Group-3-Item1"));

        let out_of_range = remove_item("Group-3".to_string(), 10);
        assert!(!out_of_range.ok);
        assert!(out_of_range.message.contains("out of range"));
    }

    #[test]
    fn set_item_image_updates_uri() {
        let response = set_item_image(
            "Medium-Group-4-Item1".to_string(),
            "Assets/HubPage/HubpageImage1.png".to_string(),
        );
        assert!(response.ok, "{}", response.message);
        let item = get_item("Medium-Group-4-Item1".to_string()).expect("item exists");
        assert_eq!(
            item.image_uri.as_deref(),
            Some("ms-appx:///Assets/HubPage/HubpageImage1.png")
        );

        let missing = set_item_image("nope".to_string(), "x.png".to_string());
        assert!(!missing.ok);
    }
}
