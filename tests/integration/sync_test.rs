//! Integration tests for the simulated sync drivers.

mod helpers;

use std::time::Duration;

use tokio::time::{Instant, sleep, sleep_until};

use kbase_core::events::KnowledgeEvent;
use kbase_entity::file::SyncStatus;
use kbase_service::SourceInput;
use kbase_worker::{ScriptAction, run_script};

#[tokio::test(start_paused = true)]
async fn test_upload_syncs_on_tenth_tick_without_overshoot() {
    let session = helpers::seeded_session();
    let item = session.add_source(helpers::text("Shipping Times")).await.unwrap();

    let start = Instant::now();
    let mut seen = Vec::new();
    for n in 1..=10u64 {
        // Just after the n-th tick
        sleep_until(start + Duration::from_millis(n * 300 + 1)).await;
        seen.push(helpers::progress_of(&session, &item.id).await);
    }

    let (statuses, values): (Vec<_>, Vec<_>) = seen.into_iter().unzip();
    assert_eq!(values, (1..=10).map(|n| Some(n * 10)).collect::<Vec<_>>());
    assert!(statuses[..9].iter().all(|s| *s == SyncStatus::Syncing));
    assert_eq!(statuses[9], SyncStatus::Synced);
}

/// Resync while the upload driver is still running replaces it. The old
/// driver must not keep adding its own step to the reset progress.
#[tokio::test(start_paused = true)]
async fn test_resync_cancels_running_driver() {
    let session = helpers::seeded_session();
    let item = session.add_source(helpers::text("Warranty")).await.unwrap();

    sleep(Duration::from_millis(650)).await;
    assert_eq!(helpers::progress_of(&session, &item.id).await.1, Some(20));

    let resynced_at = Instant::now();
    session.resync_source(&item.id).await.unwrap();
    assert_eq!(session.driver().active_count(), 1);

    // Upload would tick at 900ms; only the 200ms resync ticks may land
    sleep(Duration::from_millis(300)).await;
    assert_eq!(helpers::progress_of(&session, &item.id).await.1, Some(15));

    session.wait_idle().await;
    assert_eq!(resynced_at.elapsed(), Duration::from_millis(1400));
    assert_eq!(
        helpers::progress_of(&session, &item.id).await,
        (SyncStatus::Synced, Some(105))
    );
}

#[tokio::test(start_paused = true)]
async fn test_deleted_source_never_reports_synced() {
    let session = helpers::seeded_session();
    let mut rx = session.subscribe();
    let item = session.add_source(helpers::text("Draft")).await.unwrap();

    sleep(Duration::from_millis(400)).await;
    session.delete_source(&item.id).await.unwrap();
    assert!(!session.driver().is_running(&item.id));
    session.wait_idle().await;

    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        kinds.push(event.payload.title());
    }
    assert_eq!(kinds, vec!["Source added", "Source deleted"]);
}

#[tokio::test(start_paused = true)]
async fn test_folder_delete_stops_cascaded_drivers_only() {
    let session = helpers::seeded_session();
    session.select_folder(Some("3".into())).await.unwrap();
    let doomed = session.add_source(helpers::text("Old Article")).await.unwrap();
    session.select_folder(None).await.unwrap();
    let kept = session
        .add_source(SourceInput::File {
            file_name: "Onboarding.docx".into(),
        })
        .await
        .unwrap();

    session.delete_folder(&"3".into()).await.unwrap();
    assert!(!session.driver().is_running(&doomed.id));
    assert!(session.driver().is_running(&kept.id));

    session.wait_idle().await;
    assert_eq!(
        helpers::progress_of(&session, &kept.id).await.0,
        SyncStatus::Synced
    );
    let stats = session.stats().await;
    assert_eq!(stats.total, 5);
    assert_eq!(stats.error, 0);
}

#[tokio::test(start_paused = true)]
async fn test_replayed_session_end_state() {
    let session = helpers::seeded_session();
    let actions = vec![
        ScriptAction::CreateFolder {
            name: "Billing".into(),
            parent: Some("FAQs".into()),
        },
        ScriptAction::SelectFolder {
            folder: Some("FAQs / Billing".into()),
        },
        ScriptAction::AddSource {
            source: SourceInput::Url {
                url: "https://billing.example.com/invoices".into(),
            },
        },
        ScriptAction::Sleep { ms: 450 },
        ScriptAction::ResyncSource {
            source: "billing.example.com".into(),
        },
        ScriptAction::DeleteFolder {
            folder: "Support Articles".into(),
        },
        ScriptAction::WaitForSync,
    ];

    let report = run_script(&session, &actions, false).await;
    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert_eq!(report.applied, actions.len());

    let synced: Vec<_> = report
        .events
        .iter()
        .filter(|e| matches!(e.payload, KnowledgeEvent::SourceSynced { .. }))
        .collect();
    assert_eq!(synced.len(), 1);

    let visible = session.visible_sources().await;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "billing.example.com");
    assert_eq!(visible[0].status, SyncStatus::Synced);

    let labels: Vec<String> = session
        .folder_options()
        .await
        .into_iter()
        .map(|o| o.label)
        .collect();
    assert!(labels.contains(&"FAQs / Billing".to_string()));
    assert!(!labels.contains(&"Support Articles".to_string()));
}
