//! Forces the host page to render every row of a lazily loaded list.

use tracing::debug;

use crate::error::PageError;
use crate::page::HostPage;
use crate::settings::Timing;

/// What the loader observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Scroll passes performed.
    pub passes: u32,
    /// Rows rendered after the last pass.
    pub rows: usize,
    /// Consecutive non-growing passes at the end.
    pub stable_passes: u32,
}

/// Scroll to the last rendered row until the row count stops growing.
///
/// Stops after `load_stable_passes` consecutive passes without growth or after
/// `load_max_passes` passes, whichever comes first. Always scrolls back to the
/// top afterwards. Best effort: a page that renders slower than the pass pause
/// may be left partially loaded.
pub async fn ensure_fully_loaded<P: HostPage>(
    page: &P,
    timing: &Timing,
) -> Result<LoadReport, PageError> {
    let mut last_count = 0usize;
    let mut stable_passes = 0u32;
    let mut passes = 0u32;

    while passes < timing.load_max_passes {
        if !page.scroll_last_row_into_view().await? {
            break;
        }
        passes += 1;
        tokio::time::sleep(timing.load_pass_pause).await;

        let count = page.row_count().await?;
        if count <= last_count {
            stable_passes += 1;
        } else {
            stable_passes = 0;
            last_count = count;
        }

        debug!(pass = passes, rows = count, stable_passes, "Loader pass");

        if stable_passes >= timing.load_stable_passes {
            break;
        }
    }

    page.scroll_to_top().await?;
    tokio::time::sleep(timing.settle).await;

    Ok(LoadReport {
        passes,
        rows: last_count,
        stable_passes,
    })
}
