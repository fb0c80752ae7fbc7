//! Demo content loaded into a fresh session.

use kbase_entity::file::{FileItem, SourceKind, SyncStatus};
use kbase_entity::folder::FolderNode;
use kbase_entity::integration::{Integration, IntegrationStatus};

/// Initial folder forest.
pub fn demo_folders() -> Vec<FolderNode> {
    vec![
        FolderNode {
            id: "1".into(),
            name: "Product Documentation".into(),
            file_count: 12,
            children: vec![
                FolderNode::leaf("1-1".into(), "Getting Started", 5),
                FolderNode::leaf("1-2".into(), "API Reference", 7),
            ],
        },
        FolderNode::leaf("2".into(), "FAQs", 8),
        FolderNode::leaf("3".into(), "Support Articles", 15),
    ]
}

/// Initial sources, in display order.
pub fn demo_sources() -> Vec<FileItem> {
    vec![
        seeded("1", "Installation Guide.pdf", SourceKind::File, SyncStatus::Synced, None, "1-1"),
        seeded("2", "Quick Start Tutorial.pdf", SourceKind::File, SyncStatus::Synced, None, "1-1"),
        seeded(
            "3",
            "https://docs.example.com/api",
            SourceKind::Url,
            SyncStatus::Syncing,
            Some(65),
            "1-2",
        ),
        seeded("4", "Pricing FAQ", SourceKind::Text, SyncStatus::Synced, None, "2"),
        seeded(
            "5",
            "Troubleshooting Common Issues",
            SourceKind::Text,
            SyncStatus::Synced,
            None,
            "3",
        ),
        seeded("6", "Account Management.pdf", SourceKind::File, SyncStatus::Error, None, "3"),
    ]
}

/// Initial integrations, in display order.
pub fn demo_integrations() -> Vec<Integration> {
    use IntegrationStatus::*;

    [
        ("zendesk", "Zendesk", "Sync support tickets and help articles", Connected, true),
        ("notion", "Notion", "Import documentation and knowledge base", Syncing, true),
        ("intercom", "Intercom", "Connect conversations and help center", Connected, false),
        ("zoho", "Zoho Desk", "Integrate support tickets and articles", Disconnected, false),
        ("confluence", "Confluence", "Sync team documentation and wikis", Failed, false),
        ("slack", "Slack", "Learn from channel conversations", Disconnected, false),
    ]
    .into_iter()
    .map(|(id, name, description, status, auto_learn)| Integration {
        id: id.into(),
        name: name.to_string(),
        description: description.to_string(),
        status,
        auto_learn,
    })
    .collect()
}

fn seeded(
    id: &str,
    name: &str,
    kind: SourceKind,
    status: SyncStatus,
    progress: Option<u32>,
    folder_id: &str,
) -> FileItem {
    FileItem {
        id: id.into(),
        name: name.to_string(),
        kind,
        status,
        progress,
        folder_id: Some(folder_id.into()),
    }
}
