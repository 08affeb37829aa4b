//! Mutation events emitted by observable lists.

/// One structural change applied to an ordered list.
///
/// Indices refer to positions in the list as observed right after the
/// change was applied, except `Remove::index` and `Move::from` which name
/// the position the element occupied before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange<T> {
    /// `value` now sits at `index`; later elements shifted right.
    Insert { index: usize, value: T },
    /// `value` moved from `from` to `to`.
    Move { from: usize, to: usize, value: T },
    /// `value` was removed from `index`; later elements shifted left.
    Remove { index: usize, value: T },
    /// The element at `index` was overwritten.
    Replace { index: usize, old: T, new: T },
    /// Bulk clear or replacement; observers must re-read the list.
    Reset,
}

/// Payload-free discriminant of [`ListChange`], used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Insert,
    Move,
    Remove,
    Replace,
    Reset,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Move => "move",
            Self::Remove => "remove",
            Self::Replace => "replace",
            Self::Reset => "reset",
        }
    }
}

impl<T> ListChange<T> {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Insert { .. } => ChangeKind::Insert,
            Self::Move { .. } => ChangeKind::Move,
            Self::Remove { .. } => ChangeKind::Remove,
            Self::Replace { .. } => ChangeKind::Replace,
            Self::Reset => ChangeKind::Reset,
        }
    }
}
