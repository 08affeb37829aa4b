//! Group domain model.
//!
//! # Responsibility
//! - Own a group's full ordered item list and its bounded top-items window.
//! - Notify observers with a typed [`Field`] on property changes.
//!
//! # Invariants
//! - `top_items()` always equals `items()[0 .. min(len, capacity)]`.
//! - The window is synchronized inline with every `items()` mutation.
//! - `Group` is a shared handle; clones refer to the same group.
//! - Items point back at their group through a [`WeakGroup`], so the link
//!   survives renames and never keeps a group alive.

use crate::collection::observable_list::{ListView, ObservableList};
use crate::collection::window::{TopWindow, DEFAULT_TOP_ITEMS_CAPACITY};
use crate::model::common::{set_if_changed, CommonFields};
use crate::model::field::Field;
use crate::model::image::{ImageHandle, ImageRef};
use crate::model::item::{Item, ItemId};
use crate::model::validation::{normalize_id, ValidationError};
use crate::notify::{Notifier, Subscription};
use log::trace;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::{Debug, Display, Formatter};
use std::rc::{Rc, Weak};

/// Dataset-wide group identifier.
pub type GroupId = String;

/// Per-group tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupConfig {
    /// Maximum number of items mirrored into `top_items()`.
    pub top_items_capacity: usize,
}

impl GroupConfig {
    pub fn with_capacity(top_items_capacity: usize) -> Result<Self, ValidationError> {
        let config = Self { top_items_capacity };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.top_items_capacity == 0 {
            return Err(ValidationError::InvalidCapacity(self.top_items_capacity));
        }
        Ok(())
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            top_items_capacity: DEFAULT_TOP_ITEMS_CAPACITY,
        }
    }
}

/// Construction input for [`Group::new`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupFields {
    pub unique_id: GroupId,
    pub title: String,
    pub subtitle: String,
    pub image_path: Option<String>,
    pub description: String,
}

/// Serializable point-in-time copy of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub unique_id: GroupId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_uri: Option<String>,
    pub item_ids: Vec<ItemId>,
    pub top_item_ids: Vec<ItemId>,
}

struct GroupInner {
    data: RefCell<CommonFields>,
    items: ObservableList<Item>,
    top_items: TopWindow<Item>,
    changes: Notifier<Field>,
}

/// Shared handle to one group record.
#[derive(Clone)]
pub struct Group {
    inner: Rc<GroupInner>,
}

/// Non-owning link from an item to its group.
#[derive(Clone)]
pub(crate) struct WeakGroup {
    inner: Weak<GroupInner>,
}

impl WeakGroup {
    pub(crate) fn upgrade(&self) -> Option<Group> {
        self.inner.upgrade().map(|inner| Group { inner })
    }

    pub(crate) fn points_to(&self, group: &Group) -> bool {
        std::ptr::eq(self.inner.as_ptr(), Rc::as_ptr(&group.inner))
    }
}

impl Group {
    /// Creates an empty group with the default 12-item window.
    pub fn new(fields: GroupFields) -> Result<Self, ValidationError> {
        Self::with_config(fields, GroupConfig::default())
    }

    pub fn with_config(fields: GroupFields, config: GroupConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let unique_id = normalize_id(fields.unique_id)?;

        let items = ObservableList::new();
        let top_items = TopWindow::attach(&items, config.top_items_capacity);
        Ok(Self {
            inner: Rc::new(GroupInner {
                data: RefCell::new(CommonFields::new(
                    unique_id,
                    fields.title,
                    fields.subtitle,
                    fields.description,
                    fields.image_path,
                )),
                items,
                top_items,
                changes: Notifier::new(),
            }),
        })
    }

    pub fn id(&self) -> GroupId {
        self.inner.data.borrow().unique_id.clone()
    }

    pub fn title(&self) -> String {
        self.inner.data.borrow().title.clone()
    }

    pub fn subtitle(&self) -> String {
        self.inner.data.borrow().subtitle.clone()
    }

    pub fn description(&self) -> String {
        self.inner.data.borrow().description.clone()
    }

    pub fn image(&self) -> Option<ImageHandle> {
        self.inner.data.borrow_mut().image.resolve()
    }

    pub fn has_group_id(&self, unique_id: &str) -> bool {
        self.inner.data.borrow().unique_id == unique_id
    }

    /// Full membership in display order. Mutations here drive `top_items()`.
    pub fn items(&self) -> &ObservableList<Item> {
        &self.inner.items
    }

    /// Bounded prefix of `items()` for hub previews.
    pub fn top_items(&self) -> ListView<Item> {
        self.inner.top_items.items()
    }

    pub fn top_items_capacity(&self) -> usize {
        self.inner.top_items.capacity()
    }

    pub fn set_unique_id(&self, value: impl Into<GroupId>) -> Result<(), ValidationError> {
        let value = normalize_id(value.into())?;
        self.update(Field::UniqueId, |data| set_if_changed(&mut data.unique_id, value));
        Ok(())
    }

    pub fn set_title(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(Field::Title, |data| set_if_changed(&mut data.title, value));
    }

    pub fn set_subtitle(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(Field::Subtitle, |data| set_if_changed(&mut data.subtitle, value));
    }

    pub fn set_description(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(Field::Description, |data| {
            set_if_changed(&mut data.description, value)
        });
    }

    pub fn set_image_path(&self, path: impl Into<String>) {
        let image = ImageRef::from_path(path);
        self.update(Field::Image, |data| {
            data.image = image;
            true
        });
    }

    pub fn set_image(&self, handle: Option<ImageHandle>) {
        self.update(Field::Image, |data| data.set_image_handle(handle));
    }

    pub fn subscribe(&self, callback: impl Fn(&Field) + 'static) -> Subscription {
        self.inner.changes.subscribe(callback)
    }

    pub fn snapshot(&self) -> GroupSnapshot {
        let image_uri = self.image().map(|handle| handle.uri().to_string());
        let item_ids = self.items().with(|items| items.iter().map(Item::id).collect());
        let top_item_ids = self
            .top_items()
            .with(|items| items.iter().map(Item::id).collect());
        let data = self.inner.data.borrow();
        GroupSnapshot {
            unique_id: data.unique_id.clone(),
            title: data.title.clone(),
            subtitle: data.subtitle.clone(),
            description: data.description.clone(),
            image_uri,
            item_ids,
            top_item_ids,
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> WeakGroup {
        WeakGroup {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn update(&self, field: Field, apply: impl FnOnce(&mut CommonFields) -> bool) {
        let changed = apply(&mut self.inner.data.borrow_mut());
        if changed {
            trace!(
                "event=field_changed module=model record=group field={}",
                field.as_str()
            );
            self.inner.changes.emit(&field);
        }
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Group {}

impl Debug for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let data = self.inner.data.borrow();
        f.debug_struct("Group")
            .field("unique_id", &data.unique_id)
            .field("title", &data.title)
            .field("item_count", &self.inner.items.len())
            .finish()
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.data.borrow().title)
    }
}

#[cfg(test)]
mod tests {
    use super::{Group, GroupConfig, GroupFields};
    use crate::model::field::Field;
    use crate::model::item::{Item, ItemFields};
    use crate::model::validation::ValidationError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn group(capacity: usize) -> Group {
        Group::with_config(
            GroupFields {
                unique_id: "Group-1".to_string(),
                title: "Get Ex-Boy Friend Back".to_string(),
                image_path: Some("Assets/DarkGray.png".to_string()),
                ..GroupFields::default()
            },
            GroupConfig::with_capacity(capacity).expect("valid capacity"),
        )
        .expect("valid group")
    }

    fn item(group: &Group, id: &str) -> Item {
        Item::new(
            ItemFields {
                unique_id: id.to_string(),
                title: id.to_string(),
                ..ItemFields::default()
            },
            group,
        )
        .expect("valid item")
    }

    fn top_ids(group: &Group) -> Vec<String> {
        group.top_items().with(|items| items.iter().map(Item::id).collect())
    }

    #[test]
    fn rejects_zero_capacity_and_blank_id() {
        assert_eq!(
            GroupConfig::with_capacity(0),
            Err(ValidationError::InvalidCapacity(0))
        );
        assert_eq!(
            Group::new(GroupFields::default()).unwrap_err(),
            ValidationError::BlankId
        );
    }

    #[test]
    fn top_items_follow_item_mutations() {
        let group = group(3);
        for id in ["A", "B", "C", "D"] {
            group.items().push(item(&group, id));
        }
        assert_eq!(top_ids(&group), vec!["A", "B", "C"]);

        group.items().remove(1).expect("remove B");
        assert_eq!(top_ids(&group), vec!["A", "C", "D"]);

        group.items().move_item(2, 0).expect("move D to head");
        assert_eq!(top_ids(&group), vec!["D", "A", "C"]);
    }

    #[test]
    fn window_shares_item_records_with_full_list() {
        let group = group(12);
        let tip = item(&group, "Small-Group-1-Item1");
        group.items().push(tip.clone());

        tip.set_title("renamed");
        let top = group.top_items().get(0).expect("top item");
        assert!(top.ptr_eq(&tip));
        assert_eq!(top.title(), "renamed");
    }

    #[test]
    fn snapshot_lists_both_sequences() {
        let group = group(2);
        for id in ["A", "B", "C"] {
            group.items().push(item(&group, id));
        }

        let snapshot = group.snapshot();
        assert_eq!(snapshot.item_ids, vec!["A", "B", "C"]);
        assert_eq!(snapshot.top_item_ids, vec!["A", "B"]);
        assert_eq!(
            snapshot.image_uri.as_deref(),
            Some("ms-appx:///Assets/DarkGray.png")
        );
    }

    #[test]
    fn group_setters_notify_typed_fields() {
        let group = group(12);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _guard = group.subscribe(move |field| sink.borrow_mut().push(*field));

        group.set_title("General");
        group.set_title("General");
        group.set_image_path("Assets/LightGray.png");

        assert_eq!(*seen.borrow(), vec![Field::Title, Field::Image]);
        assert_eq!(group.to_string(), "General");
    }

    #[test]
    fn renaming_group_keeps_item_links() {
        let group = group(12);
        let tip = item(&group, "Small-Group-1-Item1");
        group.items().push(tip.clone());

        group.set_unique_id("Group-1-renamed").expect("valid id");
        assert_eq!(tip.group(), Some(group.clone()));
        assert_eq!(tip.group_id().as_deref(), Some("Group-1-renamed"));
    }
}
