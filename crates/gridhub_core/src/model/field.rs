//! Strongly-typed property identifiers for change notification.

use serde::{Deserialize, Serialize};

/// Names one observable property of an item or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    UniqueId,
    Title,
    Subtitle,
    Description,
    Image,
    /// Item only.
    Content,
    /// Item only.
    ColSpan,
    /// Item only.
    RowSpan,
    /// Item only: the owning-group back-reference.
    Group,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UniqueId => "unique_id",
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Description => "description",
            Self::Image => "image",
            Self::Content => "content",
            Self::ColSpan => "col_span",
            Self::RowSpan => "row_span",
            Self::Group => "group",
        }
    }
}
