//! Removes a single row through its contextual menu.

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::PageError;
use crate::page::{HostPage, RowHandle, ScrollAlign};
use crate::rules::ActionMatcher;
use crate::settings::Timing;
use crate::track::Track;

pub const REASON_GONE_BEFORE: &str = "row disappeared before delete";
pub const REASON_NO_TRIGGER: &str = "menu button not found";
pub const REASON_NO_ACTION: &str = "remove action not found in menu";
pub const REASON_STILL_THERE: &str = "row did not disappear after click";

/// Result of one removal attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The row detached after the remove action was clicked.
    Removed,
    /// Row-specific failure; the batch continues.
    Skipped(String),
    /// The page no longer looks the way we expect; the batch must stop.
    Fatal(String),
}

impl RemovalOutcome {
    pub fn removed(&self) -> bool {
        matches!(self, RemovalOutcome::Removed)
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, RemovalOutcome::Fatal(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            RemovalOutcome::Removed => None,
            RemovalOutcome::Skipped(reason) | RemovalOutcome::Fatal(reason) => Some(reason),
        }
    }
}

/// Drives the menu interaction for one row at a time.
pub struct Remover<'a, P, M> {
    page: &'a P,
    matcher: &'a M,
    timing: &'a Timing,
}

impl<'a, P: HostPage, M: ActionMatcher> Remover<'a, P, M> {
    pub fn new(page: &'a P, matcher: &'a M, timing: &'a Timing) -> Self {
        Self {
            page,
            matcher,
            timing,
        }
    }

    /// Open the row's menu, click the remove action and wait for the row to
    /// detach.
    pub async fn remove_row(&self, track: &Track<P::Row>) -> RemovalOutcome {
        let outcome = match self.try_remove(track).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(index = track.index, error = %e, "Page error while removing row");
                RemovalOutcome::Fatal(format!("page error: {}", e))
            }
        };

        if let Err(e) = self.page.release_lookups().await {
            debug!(index = track.index, error = %e, "Could not release menu lookups");
        }
        outcome
    }

    async fn try_remove(&self, track: &Track<P::Row>) -> Result<RemovalOutcome, PageError> {
        if !track.row.is_attached().await? {
            return Ok(RemovalOutcome::Skipped(REASON_GONE_BEFORE.to_string()));
        }

        self.page
            .scroll_row_into_view(&track.row, ScrollAlign::Center)
            .await?;
        tokio::time::sleep(self.timing.settle).await;

        let Some(trigger) = self.locate_menu_trigger(&track.row).await? else {
            return Ok(RemovalOutcome::Fatal(REASON_NO_TRIGGER.to_string()));
        };

        self.page.click(&trigger).await?;
        debug!(index = track.index, "Opened row menu");

        let Some(item) = self.locate_remove_item().await? else {
            if let Err(e) = self.page.dismiss_menus().await {
                warn!(index = track.index, error = %e, "Could not dismiss menu");
            }
            return Ok(RemovalOutcome::Fatal(REASON_NO_ACTION.to_string()));
        };

        self.page.click(&item).await?;
        debug!(index = track.index, "Clicked remove action");

        if self.wait_for_detachment(&track.row).await? {
            Ok(RemovalOutcome::Removed)
        } else {
            Ok(RemovalOutcome::Skipped(REASON_STILL_THERE.to_string()))
        }
    }

    /// Row-scoped overflow-menu control, filtered by the matcher.
    pub async fn locate_menu_trigger(&self, row: &P::Row) -> Result<Option<P::Element>, PageError> {
        let controls = self.page.row_controls(row).await?;
        Ok(self
            .matcher
            .pick_menu_trigger(&controls)
            .map(|i| controls[i].element.clone()))
    }

    /// Poll the open menu for the remove action until the menu timeout.
    pub async fn locate_remove_item(&self) -> Result<Option<P::Element>, PageError> {
        let start = Instant::now();
        loop {
            let items = self.page.visible_menu_items().await?;
            if let Some(i) = self.matcher.pick_remove_item(&items) {
                return Ok(Some(items[i].element.clone()));
            }
            if start.elapsed() >= self.timing.menu_timeout {
                return Ok(None);
            }
            tokio::time::sleep(self.timing.menu_poll).await;
        }
    }

    /// Poll until the row detaches or the detach timeout elapses.
    pub async fn wait_for_detachment(&self, row: &P::Row) -> Result<bool, PageError> {
        let start = Instant::now();
        loop {
            if !row.is_attached().await? {
                return Ok(true);
            }
            if start.elapsed() >= self.timing.detach_timeout {
                return Ok(false);
            }
            tokio::time::sleep(self.timing.detach_poll).await;
        }
    }
}

#[cfg(test)]
#[path = "remover_tests.rs"]
mod tests;
