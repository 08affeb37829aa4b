use gridhub_core::{
    sample_data_source, DataSource, Field, Group, GroupConfig, GroupFields, Item, ItemFields,
};
use std::cell::RefCell;
use std::rc::Rc;

fn group(id: &str) -> Group {
    Group::new(GroupFields {
        unique_id: id.to_string(),
        title: id.to_string(),
        ..GroupFields::default()
    })
    .unwrap()
}

fn push_item(group: &Group, id: &str) -> Item {
    let item = Item::new(
        ItemFields {
            unique_id: id.to_string(),
            ..ItemFields::default()
        },
        group,
    )
    .unwrap();
    group.items().push(item.clone());
    item
}

#[test]
fn renamed_group_still_owns_its_items() {
    let source = sample_data_source(GroupConfig::default()).unwrap();
    let group = source.get_group("Group-1").unwrap();
    let item = source.get_item("Small-Group-1-Item1").unwrap();

    group.set_unique_id("Group-1-renamed").unwrap();

    assert_eq!(source.group_of(&item), Some(group.clone()));
    assert_eq!(item.group_id().as_deref(), Some("Group-1-renamed"));
    assert_eq!(
        item.snapshot().group_id.as_deref(),
        Some("Group-1-renamed")
    );
}

#[test]
fn duplicate_group_ids_resolve_to_the_owning_group() {
    let source = DataSource::new();
    let first = group("G");
    let second = group("G");
    push_item(&first, "Tip-01");
    let item = push_item(&second, "Tip-02");
    source.add_group(first.clone());
    source.add_group(second.clone());

    assert!(source.get_group("G").is_none());
    let owner = source.group_of(&item).unwrap();
    assert!(owner.ptr_eq(&second));
    assert!(!owner.ptr_eq(&first));
}

#[test]
fn set_group_moves_the_back_reference_explicitly() {
    let source = DataSource::new();
    let from = group("Group-1");
    let to = group("Group-2");
    source.add_group(from.clone());
    source.add_group(to.clone());
    let item = push_item(&from, "Small-Group-1-Item1");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _guard = item.subscribe(move |field| sink.borrow_mut().push(*field));

    from.items().remove(0).unwrap();
    assert_eq!(source.group_of(&item), Some(from.clone()));

    to.items().push(item.clone());
    item.set_group(&to);
    item.set_group(&to);

    assert_eq!(*seen.borrow(), vec![Field::Group]);
    assert_eq!(source.group_of(&item), Some(to.clone()));
    assert_eq!(item.group_id().as_deref(), Some("Group-2"));
    assert!(from.items().is_empty());
}

#[test]
fn group_of_ignores_groups_outside_the_source() {
    let source = sample_data_source(GroupConfig::default()).unwrap();
    let stray = group("Group-1");
    let item = push_item(&stray, "Small-Group-1-Item1");

    assert_eq!(item.group(), Some(stray));
    assert_eq!(source.group_of(&item), None);
}
