//! Fields and update helpers shared by items and groups.

use crate::model::image::{ImageHandle, ImageRef};

/// Properties common to every record shown in the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommonFields {
    pub unique_id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image: ImageRef,
}

impl CommonFields {
    pub fn new(
        unique_id: String,
        title: String,
        subtitle: String,
        description: String,
        image_path: Option<String>,
    ) -> Self {
        Self {
            unique_id,
            title,
            subtitle,
            description,
            image: image_path.map(ImageRef::from_path).unwrap_or_default(),
        }
    }

    /// Replaces a resolved or pending image with `handle`.
    pub fn set_image_handle(&mut self, handle: Option<ImageHandle>) -> bool {
        let next = handle.map(ImageRef::Resolved).unwrap_or_default();
        set_if_changed(&mut self.image, next)
    }
}

/// Writes `value` into `slot` and reports whether it differed.
pub(crate) fn set_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
