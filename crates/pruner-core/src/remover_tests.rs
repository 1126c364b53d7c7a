use super::*;
use crate::memory::{MemoryMenuItem, MemoryPage, MemoryRow};
use crate::page::HostPage;
use crate::rules::PhraseMatcher;
use crate::scanner::scan;

async fn first_duplicate(page: &MemoryPage) -> Track<crate::memory::MemoryRowHandle> {
    scan(page).await.unwrap().duplicates.remove(0)
}

fn pair(second: MemoryRow) -> MemoryPage {
    MemoryPage::new(vec![MemoryRow::with_id("a", "Song", "Artist"), second])
}

#[tokio::test(start_paused = true)]
async fn test_removes_row() {
    let page = pair(MemoryRow::with_id("a", "Song", "Artist"));
    let track = first_duplicate(&page).await;
    let matcher = PhraseMatcher::default();
    let timing = Timing::default();

    let outcome = Remover::new(&page, &matcher, &timing).remove_row(&track).await;

    assert_eq!(outcome, RemovalOutcome::Removed);
    assert!(outcome.removed());
    assert_eq!(page.attached_count(), 1);
    assert_eq!(page.clicks(), vec!["Action menu", "Remove from playlist"]);
}

#[tokio::test(start_paused = true)]
async fn test_never_clicks_denied_controls() {
    let page = pair(MemoryRow::with_id("a", "Song", "Artist").controls(&["Like", "Thumbs down"]));
    let track = first_duplicate(&page).await;
    let matcher = PhraseMatcher::default();
    let timing = Timing::default();

    let outcome = Remover::new(&page, &matcher, &timing).remove_row(&track).await;

    assert!(outcome.is_fatal());
    assert_eq!(outcome.reason(), Some(REASON_NO_TRIGGER));
    assert!(page.clicks().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_missing_action_is_fatal_and_dismisses() {
    let page = pair(
        MemoryRow::with_id("a", "Song", "Artist").menu(vec![
            MemoryMenuItem::new("Add to queue"),
            MemoryMenuItem::removing("Remove from library"),
        ]),
    );
    let track = first_duplicate(&page).await;
    let matcher = PhraseMatcher::default();
    let timing = Timing::default();

    let start = tokio::time::Instant::now();
    let outcome = Remover::new(&page, &matcher, &timing).remove_row(&track).await;

    assert_eq!(outcome, RemovalOutcome::Fatal(REASON_NO_ACTION.to_string()));
    assert!(start.elapsed() >= timing.menu_timeout);
    assert_eq!(page.dismissals(), 1);
    assert!(page.visible_menu_items().await.unwrap().is_empty());
    assert_eq!(page.attached_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_missing_action_reason_survives_dismiss_error() {
    let page = pair(
        MemoryRow::with_id("a", "Song", "Artist").menu(vec![MemoryMenuItem::new("Add to queue")]),
    )
    .failing("dismiss_menus");
    let track = first_duplicate(&page).await;
    let matcher = PhraseMatcher::default();
    let timing = Timing::default();

    let outcome = Remover::new(&page, &matcher, &timing).remove_row(&track).await;

    assert_eq!(outcome, RemovalOutcome::Fatal(REASON_NO_ACTION.to_string()));
    assert_eq!(page.dismissals(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_lookups_released_after_every_attempt() {
    let page = MemoryPage::new(vec![
        MemoryRow::with_id("a", "Song", "Artist"),
        MemoryRow::with_id("a", "Song", "Artist"),
        MemoryRow::with_id("a", "Song", "Artist").controls(&["Like"]),
    ]);
    let duplicates = scan(&page).await.unwrap().duplicates;
    let matcher = PhraseMatcher::default();
    let timing = Timing::default();
    let remover = Remover::new(&page, &matcher, &timing);

    assert!(remover.remove_row(&duplicates[1]).await.is_fatal());
    assert_eq!(page.lookup_releases(), 1);
    assert!(remover.remove_row(&duplicates[0]).await.removed());
    assert_eq!(page.lookup_releases(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_remove_item_is_not_used() {
    let mut hidden = MemoryMenuItem::removing("Remove from playlist");
    hidden.hidden = true;
    let page = pair(MemoryRow::with_id("a", "Song", "Artist").menu(vec![hidden]));
    let track = first_duplicate(&page).await;
    let matcher = PhraseMatcher::default();
    let timing = Timing::default();

    let outcome = Remover::new(&page, &matcher, &timing).remove_row(&track).await;
    assert!(outcome.is_fatal());
}

#[tokio::test(start_paused = true)]
async fn test_row_gone_before_delete_is_soft() {
    let page = pair(MemoryRow::with_id("a", "Song", "Artist"));
    let track = first_duplicate(&page).await;
    page.detach(1);
    let matcher = PhraseMatcher::default();
    let timing = Timing::default();

    let outcome = Remover::new(&page, &matcher, &timing).remove_row(&track).await;

    assert_eq!(outcome, RemovalOutcome::Skipped(REASON_GONE_BEFORE.to_string()));
    assert!(!outcome.is_fatal());
    assert!(page.clicks().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_row_still_there_is_soft() {
    let page = pair(MemoryRow::with_id("a", "Song", "Artist").ignoring_removal());
    let track = first_duplicate(&page).await;
    let matcher = PhraseMatcher::default();
    let timing = Timing::default();

    let start = tokio::time::Instant::now();
    let outcome = Remover::new(&page, &matcher, &timing).remove_row(&track).await;

    assert_eq!(outcome, RemovalOutcome::Skipped(REASON_STILL_THERE.to_string()));
    assert!(start.elapsed() >= timing.detach_timeout);
    assert_eq!(page.attached_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_shortened_timeouts() {
    let page = pair(MemoryRow::with_id("a", "Song", "Artist").ignoring_removal());
    let track = first_duplicate(&page).await;
    let matcher = PhraseMatcher::default();
    let timing = Timing {
        detach_timeout: std::time::Duration::from_millis(50),
        detach_poll: std::time::Duration::from_millis(10),
        ..Timing::default()
    };

    let start = tokio::time::Instant::now();
    let outcome = Remover::new(&page, &matcher, &timing).remove_row(&track).await;

    assert!(!outcome.removed());
    assert!(start.elapsed() < Timing::default().detach_timeout);
}

#[test]
fn test_outcome_accessors() {
    assert_eq!(RemovalOutcome::Removed.reason(), None);
    assert_eq!(RemovalOutcome::Skipped("x".to_string()).reason(), Some("x"));
    assert!(RemovalOutcome::Fatal("y".to_string()).is_fatal());
    assert!(!RemovalOutcome::Skipped("x".to_string()).is_fatal());
}
