//! Item domain model.
//!
//! # Responsibility
//! - Define the leaf record rendered as one tile of the hub grid.
//! - Notify observers with a typed [`Field`] whenever a property changes.
//!
//! # Invariants
//! - `Item` is a shared handle: clones observe and mutate the same record,
//!   so one item can sit in a group's full list and its top window at once.
//! - The owning group is held through a non-owning handle; items never keep
//!   their group alive, and the link changes only through `set_group`.
//! - Display spans are at least one cell in each direction.
//! - Setters notify only when the stored value actually changes, except
//!   `set_image_path`, which always notifies because it invalidates the
//!   cached handle.

use crate::model::common::{set_if_changed, CommonFields};
use crate::model::field::Field;
use crate::model::group::{Group, GroupId, WeakGroup};
use crate::model::image::{ImageHandle, ImageRef};
use crate::model::validation::{normalize_id, ValidationError};
use crate::notify::{Notifier, Subscription};
use log::trace;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;
use uuid::Uuid;

/// Dataset-wide item identifier. Uniqueness is assumed, not enforced.
pub type ItemId = String;

/// Generates a fresh identifier for items created at runtime.
pub fn generate_item_id() -> ItemId {
    format!("item-{}", Uuid::new_v4())
}

/// Grid cells occupied by an item tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySpan {
    pub col_span: u32,
    pub row_span: u32,
}

impl DisplaySpan {
    pub const SINGLE: Self = Self {
        col_span: 1,
        row_span: 1,
    };

    pub fn new(col_span: u32, row_span: u32) -> Result<Self, ValidationError> {
        let span = Self { col_span, row_span };
        span.validate()?;
        Ok(span)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.col_span == 0 || self.row_span == 0 {
            return Err(ValidationError::ZeroSpan {
                col_span: self.col_span,
                row_span: self.row_span,
            });
        }
        Ok(())
    }
}

impl Default for DisplaySpan {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Construction input for [`Item::new`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemFields {
    pub unique_id: ItemId,
    pub title: String,
    pub subtitle: String,
    /// Asset path resolved lazily on first image read.
    pub image_path: Option<String>,
    pub description: String,
    pub content: String,
    pub span: DisplaySpan,
}

/// Serializable point-in-time copy of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub unique_id: ItemId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub content: String,
    pub col_span: u32,
    pub row_span: u32,
    /// `None` once the owning group has been dropped.
    pub group_id: Option<GroupId>,
    pub image_uri: Option<String>,
}

struct ItemData {
    common: CommonFields,
    content: String,
    span: DisplaySpan,
    group: WeakGroup,
}

struct ItemInner {
    data: RefCell<ItemData>,
    changes: Notifier<Field>,
}

/// Shared handle to one item record.
#[derive(Clone)]
pub struct Item {
    inner: Rc<ItemInner>,
}

impl Item {
    /// Creates an item that belongs to `group`.
    ///
    /// The item is not added to `group.items()`; callers insert it where
    /// they want it.
    ///
    /// # Errors
    /// - `BlankId` when `fields.unique_id` is blank.
    /// - `ZeroSpan` when either span is zero.
    pub fn new(fields: ItemFields, group: &Group) -> Result<Self, ValidationError> {
        let unique_id = normalize_id(fields.unique_id)?;
        fields.span.validate()?;

        Ok(Self {
            inner: Rc::new(ItemInner {
                data: RefCell::new(ItemData {
                    common: CommonFields::new(
                        unique_id,
                        fields.title,
                        fields.subtitle,
                        fields.description,
                        fields.image_path,
                    ),
                    content: fields.content,
                    span: fields.span,
                    group: group.downgrade(),
                }),
                changes: Notifier::new(),
            }),
        })
    }

    pub fn id(&self) -> ItemId {
        self.inner.data.borrow().common.unique_id.clone()
    }

    pub fn title(&self) -> String {
        self.inner.data.borrow().common.title.clone()
    }

    pub fn subtitle(&self) -> String {
        self.inner.data.borrow().common.subtitle.clone()
    }

    pub fn description(&self) -> String {
        self.inner.data.borrow().common.description.clone()
    }

    pub fn content(&self) -> String {
        self.inner.data.borrow().content.clone()
    }

    pub fn span(&self) -> DisplaySpan {
        self.inner.data.borrow().span
    }

    /// The owning group, or `None` once it has been dropped.
    pub fn group(&self) -> Option<Group> {
        self.inner.data.borrow().group.upgrade()
    }

    /// Current identifier of the owning group.
    pub fn group_id(&self) -> Option<GroupId> {
        self.group().map(|group| group.id())
    }

    pub fn belongs_to(&self, group: &Group) -> bool {
        self.inner.data.borrow().group.points_to(group)
    }

    /// Returns the image handle, resolving a pending asset path on first read.
    pub fn image(&self) -> Option<ImageHandle> {
        self.inner.data.borrow_mut().common.image.resolve()
    }

    /// Asset path still waiting to be resolved, if any.
    pub fn pending_image_path(&self) -> Option<String> {
        self.inner
            .data
            .borrow()
            .common
            .image
            .pending_path()
            .map(str::to_string)
    }

    pub fn has_item_id(&self, unique_id: &str) -> bool {
        self.inner.data.borrow().common.unique_id == unique_id
    }

    pub fn set_unique_id(&self, value: impl Into<ItemId>) -> Result<(), ValidationError> {
        let value = normalize_id(value.into())?;
        self.update(Field::UniqueId, |data| {
            set_if_changed(&mut data.common.unique_id, value)
        });
        Ok(())
    }

    pub fn set_title(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(Field::Title, |data| set_if_changed(&mut data.common.title, value));
    }

    pub fn set_subtitle(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(Field::Subtitle, |data| {
            set_if_changed(&mut data.common.subtitle, value)
        });
    }

    pub fn set_description(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(Field::Description, |data| {
            set_if_changed(&mut data.common.description, value)
        });
    }

    pub fn set_content(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(Field::Content, |data| set_if_changed(&mut data.content, value));
    }

    /// Updates the tile span; column and row changes notify separately.
    pub fn set_span(&self, span: DisplaySpan) -> Result<(), ValidationError> {
        span.validate()?;
        self.update(Field::ColSpan, |data| {
            set_if_changed(&mut data.span.col_span, span.col_span)
        });
        self.update(Field::RowSpan, |data| {
            set_if_changed(&mut data.span.row_span, span.row_span)
        });
        Ok(())
    }

    /// Re-points the back-reference at another group.
    ///
    /// List membership is left alone; moving the item between group lists
    /// is the caller's job.
    pub fn set_group(&self, group: &Group) {
        self.update(Field::Group, |data| {
            if data.group.points_to(group) {
                return false;
            }
            data.group = group.downgrade();
            true
        });
    }

    /// Stores an asset path for lazy resolution, dropping any cached handle.
    pub fn set_image_path(&self, path: impl Into<String>) {
        let image = ImageRef::from_path(path);
        self.update(Field::Image, |data| {
            data.common.image = image;
            true
        });
    }

    /// Stores an already resolved handle (or clears the image).
    pub fn set_image(&self, handle: Option<ImageHandle>) {
        self.update(Field::Image, |data| data.common.set_image_handle(handle));
    }

    pub fn subscribe(&self, callback: impl Fn(&Field) + 'static) -> Subscription {
        self.inner.changes.subscribe(callback)
    }

    pub fn snapshot(&self) -> ItemSnapshot {
        let image_uri = self.image().map(|handle| handle.uri().to_string());
        let group_id = self.group_id();
        let data = self.inner.data.borrow();
        ItemSnapshot {
            unique_id: data.common.unique_id.clone(),
            title: data.common.title.clone(),
            subtitle: data.common.subtitle.clone(),
            description: data.common.description.clone(),
            content: data.content.clone(),
            col_span: data.span.col_span,
            row_span: data.span.row_span,
            group_id,
            image_uri,
        }
    }

    /// Whether both handles point at the same record.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn update(&self, field: Field, apply: impl FnOnce(&mut ItemData) -> bool) {
        let changed = apply(&mut self.inner.data.borrow_mut());
        if changed {
            trace!(
                "event=field_changed module=model record=item field={}",
                field.as_str()
            );
            self.inner.changes.emit(&field);
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Item {}

impl Debug for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let group_id = self.group_id();
        let data = self.inner.data.borrow();
        f.debug_struct("Item")
            .field("unique_id", &data.common.unique_id)
            .field("title", &data.common.title)
            .field("group_id", &group_id)
            .finish()
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.data.borrow().common.title)
    }
}
