//! Human-readable status lines for command responses.

use pruner_core::{BatchResult, Request, Response, ResponseBody, ScanSummary};

const UNKNOWN_ARTIST: &str = "Unknown artist";
const DEFAULT_ABORT_REASON: &str = "uncertain row action target";
/// Failed titles shown inline after a delete.
const FAILED_PREVIEW: usize = 3;

/// Render a response the way it is shown on the terminal.
pub(crate) fn render(request: Request, response: &Response) -> String {
    match (&response.result, &response.error) {
        (Some(ResponseBody::Scan(summary)), _) if response.ok => render_scan(summary),
        (Some(ResponseBody::Delete(result)), _) if response.ok => render_delete(result),
        (_, error) => render_failure(request, error.as_deref()),
    }
}

fn render_scan(summary: &ScanSummary) -> String {
    let mut lines = vec![format!(
        "Scanned {} tracks. Found {} repeats.",
        summary.total_tracks, summary.duplicate_count
    )];

    if summary.duplicates.is_empty() {
        lines.push("No duplicates found.".to_string());
    }
    for item in &summary.duplicates {
        let artists = if item.artists.is_empty() {
            UNKNOWN_ARTIST
        } else {
            &item.artists
        };
        lines.push(format!("{} - {}", item.title, artists));
    }

    lines.join("\n")
}

fn render_delete(result: &BatchResult) -> String {
    if result.aborted {
        return format!(
            "Safety stop after removing {}/{}. Aborted: {}",
            result.removed_count,
            result.duplicate_count,
            result.abort_reason.as_deref().unwrap_or(DEFAULT_ABORT_REASON)
        );
    }

    let mut status = format!(
        "Removed {}/{} duplicates.",
        result.removed_count, result.duplicate_count
    );
    if !result.failed.is_empty() {
        let preview: Vec<&str> = result
            .failed
            .iter()
            .take(FAILED_PREVIEW)
            .map(String::as_str)
            .collect();
        status.push_str(&format!(" Failed: {}", preview.join(", ")));
    }
    status
}

fn render_failure(request: Request, error: Option<&str>) -> String {
    let (fallback, hint) = match request {
        Request::ScanDuplicates => (
            "Scan failed.",
            "If the tab was open before Chrome started debugging, refresh it once.",
        ),
        Request::DeleteDuplicates => (
            "Delete failed.",
            "If needed, reload the playlist and try again.",
        ),
    };
    format!("{} {}", error.filter(|e| !e.is_empty()).unwrap_or(fallback), hint)
}
