//! Duplicate detection over the currently rendered rows.

use std::collections::HashMap;

use tracing::debug;
use url::Url;

use crate::error::PageError;
use crate::page::HostPage;
use crate::track::{IdentityKey, Track};

/// Outcome of one scan pass.
#[derive(Debug, Clone)]
pub struct ScanResult<R> {
    /// Rows enumerated in the pass, readable or not.
    pub total_tracks: usize,
    pub duplicate_count: usize,
    /// Repeats in encounter order. The first occurrence of a key is never here.
    pub duplicates: Vec<Track<R>>,
}

/// Walk the rendered rows and collect every row whose identity key was
/// already seen earlier in the same pass. Never mutates the page.
pub async fn scan<P: HostPage>(page: &P) -> Result<ScanResult<P::Row>, PageError> {
    let base = Url::parse(&page.current_url().await?).ok();
    let rows = page.list_rows().await?;
    let total_tracks = rows.len();

    let mut seen: HashMap<IdentityKey, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let Some(raw) = page.read_row(&row).await? else {
            debug!(index, "Row has no readable title link, skipping");
            continue;
        };

        let track = Track::from_raw(row, index, &raw, base.as_ref());
        match seen.get(&track.key) {
            Some(first) => {
                debug!(index, first = *first, key = %track.key, "Duplicate row");
                duplicates.push(track);
            }
            None => {
                seen.insert(track.key.clone(), index);
            }
        }
    }

    debug!(total_tracks, unique = seen.len(), duplicates = duplicates.len(), "Scan complete");

    Ok(ScanResult {
        total_tracks,
        duplicate_count: duplicates.len(),
        duplicates,
    })
}
