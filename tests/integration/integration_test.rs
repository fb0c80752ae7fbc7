//! Integration tests for connecting external integrations.

mod helpers;

use std::time::Duration;

use tokio::time::{Instant, sleep};

use kbase_core::config::AppConfig;
use kbase_core::error::ErrorKind;
use kbase_core::events::KnowledgeEvent;
use kbase_core::types::IntegrationId;
use kbase_entity::integration::IntegrationStatus;
use kbase_worker::KnowledgeSession;

async fn status_of(session: &KnowledgeSession, id: &str) -> IntegrationStatus {
    let id = IntegrationId::new(id);
    session
        .snapshot(|s| s.integrations().get(&id).map(|item| item.status))
        .await
        .expect("Integration not found")
}

#[tokio::test(start_paused = true)]
async fn test_connect_becomes_active_after_two_seconds() {
    let session = helpers::seeded_session();
    let start = Instant::now();

    session.connect_integration(&"zoho".into()).await.unwrap();
    sleep(Duration::from_millis(1990)).await;
    assert_eq!(status_of(&session, "zoho").await, IntegrationStatus::Syncing);

    session.wait_idle().await;
    assert_eq!(start.elapsed(), Duration::from_millis(2000));
    assert_eq!(status_of(&session, "zoho").await, IntegrationStatus::Connected);
}

/// A connect started while another is pending must not undo it when it
/// completes, and vice versa.
#[tokio::test(start_paused = true)]
async fn test_overlapping_connects_both_end_connected() {
    let session = helpers::seeded_session();
    let mut rx = session.subscribe();

    session.connect_integration(&"slack".into()).await.unwrap();
    sleep(Duration::from_millis(700)).await;
    session.connect_integration(&"confluence".into()).await.unwrap();

    session.wait_idle().await;
    assert_eq!(status_of(&session, "slack").await, IntegrationStatus::Connected);
    assert_eq!(status_of(&session, "confluence").await, IntegrationStatus::Connected);
    // Seeded "syncing" integrations are untouched
    assert_eq!(status_of(&session, "notion").await, IntegrationStatus::Syncing);

    let mut connected = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let KnowledgeEvent::IntegrationConnected { integration_id } = event.payload {
            connected.push(integration_id.into_inner());
        }
    }
    assert_eq!(connected, ["slack", "confluence"]);

    let stats = session.integration_stats().await;
    assert_eq!((stats.connected, stats.syncing, stats.auto_learn), (4, 1, 1));
}

#[tokio::test(start_paused = true)]
async fn test_connect_rejected_while_connected_or_syncing() {
    let session = helpers::seeded_session();
    for id in ["zendesk", "notion"] {
        let err = session.connect_integration(&id.into()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
    let err = session.connect_integration(&"jira".into()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test(start_paused = true)]
async fn test_auto_learn_counts_connected_only() {
    let session = helpers::seeded_session();
    session.set_auto_learn(&"intercom".into(), true).await.unwrap();
    assert_eq!(session.integration_stats().await.auto_learn, 2);

    let err = session.set_auto_learn(&"notion".into(), false).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[test]
fn test_session_rejects_zero_interval_config() {
    let err = AppConfig::from_toml(
        r#"
        [sync.resync]
        interval_ms = 0
        step = 15
        "#,
    )
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);

    let mut config = AppConfig::from_toml("").unwrap();
    config.sync.upload.step = 0;
    let err = KnowledgeSession::from_config(&config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}
