//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide stable query and mutation entry points for UI/FFI callers.
//! - Translate records into serializable snapshots at the boundary.
//! - Build hub sections straight from each group's top window.
//!
//! # Invariants
//! - Mutations resolve their target group strictly: ambiguous ids fail.
//! - Items created here always point back at the group they were added to.
//! - Every mutation goes through the group's item list, so top windows stay
//!   in sync without extra work here.

use crate::collection::observable_list::ListError;
use crate::model::group::{Group, GroupSnapshot};
use crate::model::item::{generate_item_id, DisplaySpan, Item, ItemFields, ItemId, ItemSnapshot};
use crate::model::validation::ValidationError;
use crate::service::preview::derive_content_preview;
use crate::source::data_source::{DataSource, LookupError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from catalog service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Lookup(LookupError),
    List(ListError),
    Validation(ValidationError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lookup(err) => write!(f, "{err}"),
            Self::List(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lookup(err) => Some(err),
            Self::List(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<LookupError> for CatalogError {
    fn from(value: LookupError) -> Self {
        Self::Lookup(value)
    }
}

impl From<ListError> for CatalogError {
    fn from(value: ListError) -> Self {
        Self::List(value)
    }
}

impl From<ValidationError> for CatalogError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Request model for creating an item at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemRequest {
    /// Generated when `None`.
    pub unique_id: Option<ItemId>,
    pub title: String,
    pub subtitle: String,
    pub image_path: Option<String>,
    pub description: String,
    pub content: String,
    pub span: DisplaySpan,
}

/// One item as rendered in a hub tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTile {
    pub item: ItemSnapshot,
    pub preview: Option<String>,
}

/// One group as rendered in the hub: its snapshot plus the windowed tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSection {
    pub group: GroupSnapshot,
    /// Tiles for `group.top_item_ids`, in the same order.
    pub top_items: Vec<ItemTile>,
}

/// Use-case facade over a [`DataSource`].
pub struct CatalogService {
    source: DataSource,
}

impl CatalogService {
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }

    /// Snapshots every group under the collection `key`.
    pub fn all_groups(&self, key: &str) -> CatalogResult<Vec<GroupSnapshot>> {
        let groups = self
            .source
            .get_groups(key)
            .inspect_err(|err| log_rejected("all_groups", err))?;
        Ok(groups.iter().map(Group::snapshot).collect())
    }

    pub fn group(&self, group_id: &str) -> CatalogResult<GroupSnapshot> {
        Ok(self.source.lookup_group(group_id)?.snapshot())
    }

    pub fn item(&self, item_id: &str) -> CatalogResult<ItemSnapshot> {
        Ok(self.source.lookup_item(item_id)?.snapshot())
    }

    /// Hub sections for every group under the collection `key`.
    pub fn sections(&self, key: &str) -> CatalogResult<Vec<GroupSection>> {
        let groups = self
            .source
            .get_groups(key)
            .inspect_err(|err| log_rejected("sections", err))?;
        Ok(groups.iter().map(section_of).collect())
    }

    pub fn section(&self, group_id: &str) -> CatalogResult<GroupSection> {
        Ok(section_of(&self.source.lookup_group(group_id)?))
    }

    /// Snapshot plus single-line content preview for one item.
    pub fn tile(&self, item_id: &str) -> CatalogResult<ItemTile> {
        Ok(tile_of(&self.source.lookup_item(item_id)?))
    }

    /// Appends a new item to the end of a group.
    pub fn add_item(&self, group_id: &str, request: ItemRequest) -> CatalogResult<ItemId> {
        let group = self.target_group("add_item", group_id)?;
        let item = build_item(request, &group)?;
        let item_id = item.id();
        group.items().push(item);
        log_mutation("add_item", &group);
        Ok(item_id)
    }

    /// Inserts a new item at `index` (`index == len` appends).
    pub fn insert_item(
        &self,
        group_id: &str,
        index: usize,
        request: ItemRequest,
    ) -> CatalogResult<ItemId> {
        let group = self.target_group("insert_item", group_id)?;
        let item = build_item(request, &group)?;
        let item_id = item.id();
        group
            .items()
            .insert(index, item)
            .inspect_err(|err| log_rejected("insert_item", err))?;
        log_mutation("insert_item", &group);
        Ok(item_id)
    }

    pub fn move_item(&self, group_id: &str, from: usize, to: usize) -> CatalogResult<()> {
        let group = self.target_group("move_item", group_id)?;
        group
            .items()
            .move_item(from, to)
            .inspect_err(|err| log_rejected("move_item", err))?;
        log_mutation("move_item", &group);
        Ok(())
    }

    /// Removes the item at `index` and returns its id.
    pub fn remove_item(&self, group_id: &str, index: usize) -> CatalogResult<ItemId> {
        let group = self.target_group("remove_item", group_id)?;
        let removed = group
            .items()
            .remove(index)
            .inspect_err(|err| log_rejected("remove_item", err))?;
        log_mutation("remove_item", &group);
        Ok(removed.id())
    }

    /// Replaces the item at `index` with a new one and returns the new id.
    pub fn replace_item(
        &self,
        group_id: &str,
        index: usize,
        request: ItemRequest,
    ) -> CatalogResult<ItemId> {
        let group = self.target_group("replace_item", group_id)?;
        let item = build_item(request, &group)?;
        let item_id = item.id();
        group
            .items()
            .replace(index, item)
            .inspect_err(|err| log_rejected("replace_item", err))?;
        log_mutation("replace_item", &group);
        Ok(item_id)
    }

    /// Replaces a group's whole item list.
    ///
    /// Requests are validated up front; on error the group is untouched.
    pub fn reset_items(
        &self,
        group_id: &str,
        requests: Vec<ItemRequest>,
    ) -> CatalogResult<Vec<ItemId>> {
        let group = self.target_group("reset_items", group_id)?;
        let items = requests
            .into_iter()
            .map(|request| build_item(request, &group))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| log_rejected("reset_items", err))?;
        let item_ids = items.iter().map(Item::id).collect();
        group.items().reset(items);
        log_mutation("reset_items", &group);
        Ok(item_ids)
    }

    /// Points an item at a new image path; resolution happens on next read.
    pub fn set_item_image(&self, item_id: &str, path: &str) -> CatalogResult<()> {
        let item = self
            .source
            .lookup_item(item_id)
            .inspect_err(|err| log_rejected("set_item_image", err))?;
        item.set_image_path(path);
        debug!("event=item_image_set module=service status=ok");
        Ok(())
    }

    fn target_group(&self, operation: &str, group_id: &str) -> CatalogResult<Group> {
        self.source
            .lookup_group(group_id)
            .inspect_err(|err| log_rejected(operation, err))
            .map_err(CatalogError::from)
    }
}

fn section_of(group: &Group) -> GroupSection {
    GroupSection {
        group: group.snapshot(),
        top_items: group
            .top_items()
            .with(|items| items.iter().map(tile_of).collect()),
    }
}

fn tile_of(item: &Item) -> ItemTile {
    let item = item.snapshot();
    let preview = derive_content_preview(&item.content);
    ItemTile { item, preview }
}

fn build_item(request: ItemRequest, group: &Group) -> Result<Item, ValidationError> {
    let unique_id = request.unique_id.unwrap_or_else(generate_item_id);
    Item::new(
        ItemFields {
            unique_id,
            title: request.title,
            subtitle: request.subtitle,
            image_path: request.image_path,
            description: request.description,
            content: request.content,
            span: request.span,
        },
        group,
    )
}

fn log_mutation(operation: &str, group: &Group) {
    debug!(
        "event=catalog_mutation module=service status=ok op={} items={} top_items={}",
        operation,
        group.items().len(),
        group.top_items().len()
    );
}

fn log_rejected(operation: &str, err: &dyn Display) {
    warn!(
        "event=catalog_rejected module=service status=error op={} error={}",
        operation, err
    );
}
