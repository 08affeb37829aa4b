//! Group registry and identifier lookups.
//!
//! # Responsibility
//! - Hold every group of the catalog in display order.
//! - Answer "all groups", "group by id" and "item by id" queries.
//!
//! # Invariants
//! - Only [`ALL_GROUPS_KEY`] names a group collection.
//! - Lookups return a record only on a unique match; duplicate identifiers
//!   never resolve to an arbitrary candidate.
//! - The registry is an explicitly constructed value, not a process global.

use crate::collection::observable_list::ObservableList;
use crate::model::group::Group;
use crate::model::item::Item;
use log::trace;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The single supported group-collection key.
pub const ALL_GROUPS_KEY: &str = "AllGroups";

/// Which record family a lookup targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Group,
    Item,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Item => "item",
        }
    }
}

/// Lookup failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Group collection requested under a key other than `AllGroups`.
    UnsupportedKey(String),
    NotFound {
        kind: RecordKind,
        id: String,
    },
    /// More than one record carries the identifier.
    Ambiguous {
        kind: RecordKind,
        id: String,
        count: usize,
    },
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedKey(key) => write!(
                f,
                "only `{ALL_GROUPS_KEY}` is supported as a collection of groups, got `{key}`"
            ),
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.as_str()),
            Self::Ambiguous { kind, id, count } => write!(
                f,
                "{} id is ambiguous: {id} matches {count} records",
                kind.as_str()
            ),
        }
    }
}

impl Error for LookupError {}

/// In-memory catalog of groups.
#[derive(Debug, Default)]
pub struct DataSource {
    groups: ObservableList<Group>,
}

impl DataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every group in display order, as an observable list.
    pub fn all_groups(&self) -> &ObservableList<Group> {
        &self.groups
    }

    pub fn add_group(&self, group: Group) {
        self.groups.push(group);
    }

    /// Returns the group collection named by `key`.
    ///
    /// # Errors
    /// - `UnsupportedKey` for any key other than [`ALL_GROUPS_KEY`].
    pub fn get_groups(&self, key: &str) -> Result<Vec<Group>, LookupError> {
        if key != ALL_GROUPS_KEY {
            return Err(LookupError::UnsupportedKey(key.to_string()));
        }
        Ok(self.groups.snapshot())
    }

    /// Returns the group with `unique_id`, or `None` when absent or ambiguous.
    pub fn get_group(&self, unique_id: &str) -> Option<Group> {
        self.lookup_group(unique_id).ok()
    }

    /// Returns the item with `unique_id`, or `None` when absent or ambiguous.
    pub fn get_item(&self, unique_id: &str) -> Option<Item> {
        self.lookup_item(unique_id).ok()
    }

    /// Like [`Self::get_group`] but tells "absent" and "ambiguous" apart.
    pub fn lookup_group(&self, unique_id: &str) -> Result<Group, LookupError> {
        let matches = self.groups.with(|groups| {
            groups
                .iter()
                .filter(|group| group.has_group_id(unique_id))
                .cloned()
                .collect::<Vec<_>>()
        });
        unique_match(RecordKind::Group, unique_id, matches)
    }

    /// Like [`Self::get_item`] but tells "absent" and "ambiguous" apart.
    ///
    /// Scans every group's full item list, not just the top window.
    pub fn lookup_item(&self, unique_id: &str) -> Result<Item, LookupError> {
        let matches = self.groups.with(|groups| {
            groups
                .iter()
                .flat_map(|group| group.items().snapshot())
                .filter(|item| item.has_item_id(unique_id))
                .collect::<Vec<_>>()
        });
        unique_match(RecordKind::Item, unique_id, matches)
    }

    /// Resolves an item's back-reference, provided that group is registered
    /// in this source. Follows the link itself, so renamed or duplicate group
    /// ids do not matter.
    pub fn group_of(&self, item: &Item) -> Option<Group> {
        let group = item.group()?;
        let registered = self
            .groups
            .with(|groups| groups.iter().any(|candidate| candidate.ptr_eq(&group)));
        registered.then_some(group)
    }

    /// Total number of items across all groups.
    pub fn item_count(&self) -> usize {
        self.groups
            .with(|groups| groups.iter().map(|group| group.items().len()).sum())
    }
}

fn unique_match<T>(kind: RecordKind, id: &str, mut matches: Vec<T>) -> Result<T, LookupError> {
    trace!(
        "event=lookup module=source kind={} matches={}",
        kind.as_str(),
        matches.len()
    );
    match matches.len() {
        0 => Err(LookupError::NotFound {
            kind,
            id: id.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        count => Err(LookupError::Ambiguous {
            kind,
            id: id.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSource, LookupError, RecordKind, ALL_GROUPS_KEY};
    use crate::model::group::{Group, GroupFields};
    use crate::model::item::{Item, ItemFields};

    fn group(id: &str) -> Group {
        Group::new(GroupFields {
            unique_id: id.to_string(),
            title: id.to_string(),
            ..GroupFields::default()
        })
        .expect("valid group")
    }

    fn add_item(group: &Group, id: &str) -> Item {
        let item = Item::new(
            ItemFields {
                unique_id: id.to_string(),
                ..ItemFields::default()
            },
            group,
        )
        .expect("valid item");
        group.items().push(item.clone());
        item
    }

    #[test]
    fn get_groups_returns_insertion_order_for_supported_key_only() {
        let source = DataSource::new();
        let first = group("Group-1");
        let second = group("Group-2");
        source.add_group(first.clone());
        source.add_group(second.clone());

        let groups = source.get_groups(ALL_GROUPS_KEY).expect("supported key");
        assert_eq!(groups, vec![first, second]);

        let err = source.get_groups("TopGroups").unwrap_err();
        assert_eq!(err, LookupError::UnsupportedKey("TopGroups".to_string()));
    }

    #[test]
    fn duplicate_group_ids_resolve_to_none() {
        let source = DataSource::new();
        source.add_group(group("Group-1"));
        source.add_group(group("Group-1"));

        assert!(source.get_group("Group-1").is_none());
        assert_eq!(
            source.lookup_group("Group-1").unwrap_err(),
            LookupError::Ambiguous {
                kind: RecordKind::Group,
                id: "Group-1".to_string(),
                count: 2,
            }
        );
    }

    #[test]
    fn item_lookup_scans_every_group() {
        let source = DataSource::new();
        let first = group("Group-1");
        let second = group("Group-2");
        add_item(&first, "Small-Group-1-Item1");
        let wanted = add_item(&second, "Big-Group-2-Item1");
        source.add_group(first);
        source.add_group(second.clone());

        let found = source.get_item("Big-Group-2-Item1").expect("unique item");
        assert_eq!(found, wanted);
        assert_eq!(source.group_of(&found), Some(second));
        assert_eq!(source.item_count(), 2);

        let stray = group("Group-3");
        let unregistered = add_item(&stray, "Medium-Group-3-Item1");
        assert_eq!(source.group_of(&unregistered), None);
        assert_eq!(
            source.lookup_item("missing").unwrap_err(),
            LookupError::NotFound {
                kind: RecordKind::Item,
                id: "missing".to_string(),
            }
        );
    }
}
