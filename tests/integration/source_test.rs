//! Integration tests for the source registry, intake and filtering.

mod helpers;

use kbase_core::error::ErrorKind;
use kbase_core::types::{FolderId, SourceFilter};
use kbase_entity::file::{SourceKind, SyncStatus};
use kbase_service::{RegistryStats, SourceInput, SyncProgress};

#[test]
fn test_filter_by_folder_is_exact_subset() {
    let store = helpers::seeded_store();

    for folder in ["1", "1-1", "1-2", "2", "3"] {
        let folder_id = FolderId::from(folder);
        let filtered = store.filter(&SourceFilter::new(Some(folder_id.clone()), ""));
        let expected: Vec<_> = store
            .sources()
            .iter()
            .filter(|item| item.folder_id.as_ref() == Some(&folder_id))
            .cloned()
            .collect();
        assert_eq!(filtered, expected, "folder {folder}");
    }

    let all = store.filter(&SourceFilter::default());
    let ids: Vec<&str> = all.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn test_search_is_case_insensitive() {
    let store = helpers::seeded_store();
    let hits = store.filter(&SourceFilter::new(None, "faq"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Pricing FAQ");

    assert_eq!(store.filter(&SourceFilter::new(None, "PDF")).len(), 3);
}

#[test]
fn test_new_source_is_first_and_syncing() {
    let mut store = helpers::seeded_store();
    let item = store.add_source(helpers::text("Return Policy")).unwrap();

    let first = store.sources().iter().next().unwrap();
    assert_eq!(first.id, item.id);
    assert_eq!(first.status, SyncStatus::Syncing);
    assert_eq!(first.progress, Some(0));
    assert_eq!(first.folder_id, None);
}

#[test]
fn test_added_source_is_cascaded_with_its_folder() {
    let mut store = helpers::seeded_store();
    store.select_folder(Some("2".into())).unwrap();
    let item = store.add_source(helpers::text("Pricing FAQ")).unwrap();
    assert_eq!(item.kind, SourceKind::Text);
    assert_eq!(item.folder_id, Some("2".into()));

    let deletion = store.delete_folder(&"2".into()).unwrap();
    assert!(deletion.removed_sources.iter().any(|s| s.id == item.id));
    assert!(store.source(&item.id).is_none());
    assert!(store.filter(&SourceFilter::new(None, "pricing")).is_empty());
}

#[test]
fn test_url_source_named_after_host() {
    let mut store = helpers::seeded_store();
    let item = store
        .add_source(SourceInput::Url {
            url: "https://help.example.com/articles/42".into(),
        })
        .unwrap();
    assert_eq!(item.kind, SourceKind::Url);
    assert_eq!(item.name, "help.example.com");
}

#[test]
fn test_rejected_inputs_leave_registry_unchanged() {
    let mut store = helpers::seeded_store();

    let bad_url = store
        .add_source(SourceInput::Url {
            url: "help.example.com".into(),
        })
        .unwrap_err();
    assert_eq!(bad_url.kind, ErrorKind::InvalidUrl);

    let bad_file = store
        .add_source(SourceInput::File {
            file_name: "deck.pptx".into(),
        })
        .unwrap_err();
    assert_eq!(bad_file.kind, ErrorKind::Validation);

    assert_eq!(store.sources().len(), 6);
}

#[test]
fn test_delete_and_resync_unknown_source() {
    let mut store = helpers::seeded_store();
    assert_eq!(
        store.delete_source(&"missing".into()).unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert_eq!(
        store.resync_source(&"missing".into()).unwrap_err().kind,
        ErrorKind::NotFound
    );
}

#[test]
fn test_stats_follow_mutations() {
    let mut store = helpers::seeded_store();
    assert_eq!(
        store.stats(),
        RegistryStats { total: 6, synced: 4, syncing: 1, error: 1 }
    );

    store.resync_source(&"6".into()).unwrap();
    store.delete_source(&"1".into()).unwrap();
    assert_eq!(
        store.stats(),
        RegistryStats { total: 5, synced: 3, syncing: 2, error: 0 }
    );
}

#[test]
fn test_every_step_terminates_on_the_expected_tick() {
    for step in 1..=100u32 {
        let expected_ticks = 100u32.div_ceil(step);
        let mut progress = SyncProgress::new(step);

        for n in 1..=expected_ticks {
            let tick = progress.tick();
            if n < expected_ticks {
                assert_eq!(tick.status, SyncStatus::Syncing, "step {step}, tick {n}");
                assert!(tick.progress < 100);
            } else {
                assert_eq!(tick.status, SyncStatus::Synced, "step {step}, tick {n}");
                assert!(tick.progress >= 100);
            }
        }
    }
}
