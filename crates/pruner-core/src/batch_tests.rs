use std::time::Duration;

use super::*;
use crate::memory::{MemoryMenuItem, MemoryPage, MemoryRow};
use crate::settings::Timing;

fn settings() -> Settings {
    Settings::default()
}

#[tokio::test(start_paused = true)]
async fn test_rejects_non_playlist_page() {
    let page = MemoryPage::new(vec![
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("a", "A", ""),
    ])
    .with_url("https://music.youtube.com/explore");
    let pruner = Pruner::new(page, settings());

    let err = pruner.run().await.unwrap_err();
    assert!(matches!(err, PrunerError::NotPlaylistPage(_)));
    assert!(pruner.page().clicks().is_empty());
    assert!(!pruner.page().scrolled_to_top());
    assert_eq!(pruner.page().attached_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_removes_all_duplicates_highest_first() {
    let page = MemoryPage::new(vec![
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("b", "B", ""),
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("b", "B", ""),
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("c", "C", ""),
    ]);
    let pruner = Pruner::new(page, settings());

    let result = pruner.run().await.unwrap();

    assert_eq!(result.total_tracks, 6);
    assert_eq!(result.duplicate_count, 3);
    assert_eq!(result.removed_count, 3);
    assert!(result.failed.is_empty());
    assert!(!result.aborted);
    assert_eq!(result.abort_reason, None);
    assert_eq!(pruner.page().removals(), vec![4, 3, 2]);
    assert_eq!(pruner.page().titles(), vec!["A", "B", "C"]);
}

#[tokio::test(start_paused = true)]
async fn test_loads_before_scanning() {
    let rows = (0..30)
        .map(|i| MemoryRow::with_id(&format!("v{}", i % 10), &format!("Song {}", i % 10), ""))
        .collect();
    let page = MemoryPage::new(rows).with_render_window(10, 10);
    let pruner = Pruner::new(page, settings());

    let result = pruner.run().await.unwrap();
    assert_eq!(result.total_tracks, 30);
    assert_eq!(result.removed_count, 20);
    assert_eq!(pruner.page().attached_count(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_fatal_aborts_and_keeps_earlier_removals() {
    let broken_menu = vec![MemoryMenuItem::new("Add to queue")];
    let page = MemoryPage::new(vec![
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("a", "A", "").menu(broken_menu),
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("a", "A", ""),
    ]);
    let pruner = Pruner::new(page, settings());

    let result = pruner.run().await.unwrap();

    assert!(result.aborted);
    assert_eq!(result.duplicate_count, 3);
    assert_eq!(result.removed_count, 2);
    assert_eq!(
        result.abort_reason.as_deref(),
        Some("A (remove action not found in menu)")
    );
    assert!(result.failed.is_empty());
    assert_eq!(pruner.page().removals(), vec![3, 2]);
    assert_eq!(pruner.page().attached_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_missing_trigger_aborts_before_any_click() {
    let page = MemoryPage::new(vec![
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("a", "A", "").controls(&["Like", "Dislike"]),
    ]);
    let pruner = Pruner::new(page, settings());

    let result = pruner.run().await.unwrap();

    assert!(result.aborted);
    assert_eq!(result.removed_count, 0);
    assert_eq!(result.abort_reason.as_deref(), Some("A (menu button not found)"));
    assert!(pruner.page().clicks().is_empty());
    assert_eq!(pruner.page().attached_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_soft_failures_do_not_stop_batch() {
    let page = MemoryPage::new(vec![
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("a", "Stubborn", "").ignoring_removal(),
        MemoryRow::with_id("a", "A", ""),
    ]);
    let pruner = Pruner::new(page, settings());

    let result = pruner.run().await.unwrap();

    assert!(!result.aborted);
    assert_eq!(result.removed_count, 1);
    assert_eq!(
        result.failed,
        vec!["Stubborn (row did not disappear after click)".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_between_attempts() {
    let page = MemoryPage::new(vec![
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("a", "A", ""),
    ]);
    let timing = Timing {
        cooldown: Duration::from_secs(60),
        ..Timing::default()
    };
    let pruner = Pruner::new(
        page,
        Settings {
            timing,
            ..Settings::default()
        },
    );

    let start = tokio::time::Instant::now();
    let result = pruner.run().await.unwrap();
    assert_eq!(result.removed_count, 2);
    assert!(start.elapsed() >= Duration::from_secs(120));
}

#[tokio::test(start_paused = true)]
async fn test_scan_does_not_remove() {
    let page = MemoryPage::new(vec![
        MemoryRow::with_id("a", "A", ""),
        MemoryRow::with_id("a", "A", ""),
    ]);
    let pruner = Pruner::new(page, settings());

    let result = pruner.scan().await.unwrap();
    assert_eq!(result.duplicate_count, 1);
    assert_eq!(pruner.page().attached_count(), 2);
    assert!(pruner.page().scrolled_to_top());
}

#[test]
fn test_batch_result_wire_names() {
    let result = BatchResult {
        total_tracks: 3,
        duplicate_count: 1,
        removed_count: 1,
        failed: vec![],
        aborted: false,
        abort_reason: None,
    };
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["totalTracks"], 3);
    assert_eq!(json["removedCount"], 1);
    assert!(json["abortReason"].is_null());
}
