//! Track snapshots and identity keys.

use std::fmt;

use url::Url;

use crate::page::RawRow;

/// Placeholder used when a row's title text is empty.
pub const UNKNOWN_TITLE: &str = "Unknown title";

/// Lowercase, collapse whitespace runs and trim.
pub fn normalize_text(input: &str) -> String {
    collapse_whitespace(input).to_lowercase()
}

/// Collapse whitespace runs to a single space and trim.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pull the `v` query parameter out of a title link.
///
/// Relative links are resolved against `base`. Anything unparsable yields an
/// empty string.
pub fn extract_video_id(href: &str, base: Option<&Url>) -> String {
    let parsed = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    match parsed {
        Ok(url) => url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Deduplication key of a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// External video id, preferred when present.
    Id(String),
    /// Normalized `title|artists` composite.
    Text(String),
}

impl IdentityKey {
    pub fn derive(video_id: &str, title: &str, artists: &str) -> Self {
        if video_id.is_empty() {
            IdentityKey::Text(format!("{}|{}", normalize_text(title), normalize_text(artists)))
        } else {
            IdentityKey::Id(video_id.to_string())
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Id(id) => write!(f, "id:{}", id),
            IdentityKey::Text(text) => f.write_str(text),
        }
    }
}

/// Snapshot of one row taken during a scan pass.
#[derive(Debug, Clone)]
pub struct Track<R> {
    pub row: R,
    /// Position among the rows enumerated in the pass.
    pub index: usize,
    pub key: IdentityKey,
    pub title: String,
    pub artists: String,
    /// Empty when the title link carries no id.
    pub video_id: String,
}

impl<R> Track<R> {
    pub fn from_raw(row: R, index: usize, raw: &RawRow, base: Option<&Url>) -> Self {
        let video_id = extract_video_id(&raw.href, base);

        let title = raw.title.trim();
        let title = if title.is_empty() { UNKNOWN_TITLE } else { title }.to_string();

        let artists = raw
            .subtitle
            .as_deref()
            .map(collapse_whitespace)
            .unwrap_or_default();

        let key = IdentityKey::derive(&video_id, &title, &artists);

        Self {
            row,
            index,
            key,
            title,
            artists,
            video_id,
        }
    }
}
