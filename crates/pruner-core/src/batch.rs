//! Batch orchestration: precondition, load, scan, remove.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::PrunerError;
use crate::loader::ensure_fully_loaded;
use crate::location::is_playlist_url;
use crate::page::HostPage;
use crate::remover::Remover;
use crate::rules::{ActionMatcher, PhraseMatcher};
use crate::scanner::{ScanResult, scan};
use crate::settings::Settings;

/// Summary of a delete run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub total_tracks: usize,
    pub duplicate_count: usize,
    pub removed_count: usize,
    /// `"<title> (<reason>)"` per soft failure.
    pub failed: Vec<String>,
    pub aborted: bool,
    pub abort_reason: Option<String>,
}

/// Runs scan and delete sequences against one host page.
pub struct Pruner<P, M = PhraseMatcher> {
    page: P,
    matcher: M,
    settings: Settings,
}

impl<P: HostPage> Pruner<P, PhraseMatcher> {
    pub fn new(page: P, settings: Settings) -> Self {
        let matcher = PhraseMatcher::new(&settings.rules);
        Self::with_matcher(page, matcher, settings)
    }
}

impl<P: HostPage, M: ActionMatcher> Pruner<P, M> {
    pub fn with_matcher(page: P, matcher: M, settings: Settings) -> Self {
        Self {
            page,
            matcher,
            settings,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Fail unless the page is a playlist view.
    pub async fn check_playlist_page(&self) -> Result<(), PrunerError> {
        let url = self.page.current_url().await?;
        if is_playlist_url(&url) {
            Ok(())
        } else {
            Err(PrunerError::NotPlaylistPage(url))
        }
    }

    /// Precondition, full load, then a read-only scan.
    pub async fn scan(&self) -> Result<ScanResult<P::Row>, PrunerError> {
        self.check_playlist_page().await?;
        let report = ensure_fully_loaded(&self.page, &self.settings.timing).await?;
        info!(passes = report.passes, rows = report.rows, "Playlist loaded");

        let result = scan(&self.page).await?;
        info!(
            total = result.total_tracks,
            duplicates = result.duplicate_count,
            "Scan finished"
        );
        Ok(result)
    }

    /// Remove every duplicate, highest position first.
    ///
    /// Stops at the first fatal outcome. Removals already applied stay applied.
    pub async fn run(&self) -> Result<BatchResult, PrunerError> {
        let scan_result = self.scan().await?;

        let mut targets = scan_result.duplicates;
        targets.sort_by(|a, b| b.index.cmp(&a.index));

        let mut result = BatchResult {
            total_tracks: scan_result.total_tracks,
            duplicate_count: scan_result.duplicate_count,
            ..BatchResult::default()
        };

        let remover = Remover::new(&self.page, &self.matcher, &self.settings.timing);

        for track in &targets {
            let outcome = remover.remove_row(track).await;

            if outcome.removed() {
                result.removed_count += 1;
                info!(index = track.index, title = %track.title, "Removed duplicate");
            } else {
                let reason = outcome.reason().unwrap_or_default();
                let entry = format!("{} ({})", track.title, reason);

                if outcome.is_fatal() {
                    warn!(index = track.index, reason, "Aborting batch");
                    result.aborted = true;
                    result.abort_reason = Some(entry);
                    break;
                }

                warn!(index = track.index, reason, "Could not remove duplicate");
                result.failed.push(entry);
            }

            tokio::time::sleep(self.settings.timing.cooldown).await;
        }

        info!(
            removed = result.removed_count,
            failed = result.failed.len(),
            aborted = result.aborted,
            "Batch finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
