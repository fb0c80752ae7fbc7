//! Integration tests for the folder hierarchy.

mod helpers;

use std::collections::HashSet;

use kbase_core::error::ErrorKind;
use kbase_core::types::FolderId;

#[test]
fn test_root_folders_append_in_order() {
    let mut store = helpers::empty_store();
    let names = ["Product Documentation", "FAQs", "Support Articles", "Billing"];

    for (i, name) in names.iter().enumerate() {
        store.create_folder(name, None).unwrap();
        assert_eq!(store.forest().len(), i + 1);
    }

    let roots: Vec<String> = store.forest().into_iter().map(|n| n.name).collect();
    assert_eq!(roots, names);
}

#[test]
fn test_child_is_appended_after_existing_siblings() {
    let mut store = helpers::seeded_store();
    let parent: FolderId = "1".into();

    let child = store.create_folder("Tutorials", Some(&parent)).unwrap();
    assert_eq!(child.file_count, 0);

    let root = store.forest().into_iter().next().unwrap();
    let children: Vec<&str> = root.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(children, vec!["1-1", "1-2", child.id.as_str()]);
}

#[test]
fn test_flatten_labels_in_pre_order() {
    let mut store = helpers::empty_store();
    let faqs = store.create_folder("FAQs", None).unwrap();
    store.create_folder("Support Articles", None).unwrap();

    let options = store.folder_options();
    assert_eq!(options[0].label, "FAQs");
    assert_eq!(options[0].id, faqs.id);

    let billing = store.create_folder("Billing", Some(&faqs.id)).unwrap();
    let labels: Vec<String> = store.folder_options().into_iter().map(|o| o.label).collect();
    assert_eq!(labels, vec!["FAQs", "FAQs / Billing", "Support Articles"]);
    assert_eq!(store.folder_options()[1].id, billing.id);
}

#[test]
fn test_delete_removes_exactly_the_subtree() {
    let mut store = helpers::seeded_store();
    let api = store.create_folder("v2", Some(&"1-2".into())).unwrap();
    let before: HashSet<FolderId> = helpers::flattened_ids(&store).into_iter().collect();

    let removed = store.delete_folder(&"1".into()).unwrap().removed_folders;
    assert_eq!(removed[0].as_str(), "1");

    let expected: HashSet<FolderId> = before
        .difference(&["1", "1-1", "1-2", api.id.as_str()].into_iter().map(FolderId::from).collect())
        .cloned()
        .collect();
    let after: HashSet<FolderId> = helpers::flattened_ids(&store).into_iter().collect();
    assert_eq!(after, expected);
    assert_eq!(removed.len(), 4);
}

#[test]
fn test_create_under_missing_parent_is_an_error() {
    let mut store = helpers::seeded_store();
    let err = store
        .create_folder("Orphan", Some(&"does-not-exist".into()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParentNotFound);
    assert_eq!(store.folder_options().len(), 5);
}

#[test]
fn test_blank_folder_name_rejected() {
    let mut store = helpers::empty_store();
    assert_eq!(
        store.create_folder("   ", None).unwrap_err().kind,
        ErrorKind::Validation
    );
}

#[test]
fn test_delete_unknown_folder() {
    let mut store = helpers::seeded_store();
    assert_eq!(
        store.delete_folder(&"42".into()).unwrap_err().kind,
        ErrorKind::NotFound
    );
}

/// Deleting a parent folder removes its subfolders but only cascades sources
/// filed directly under the deleted id; sources in the removed subfolders
/// remain with a dangling folder id.
#[test]
fn test_cascade_does_not_reach_descendant_sources() {
    let mut store = helpers::seeded_store();
    let deletion = store.delete_folder(&"1".into()).unwrap();

    assert!(deletion.removed_sources.is_empty());
    let orphans = store
        .sources()
        .iter()
        .filter(|item| item.folder_id.as_ref().is_some_and(|f| !store.folders().contains(f)))
        .count();
    assert_eq!(orphans, 3);
}
