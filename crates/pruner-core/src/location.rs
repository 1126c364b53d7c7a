//! Page URL checks.

use url::Url;

/// Whether `url` points at a playlist view: `/playlist`, or anything with a
/// `list` query parameter.
pub fn is_playlist_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    parsed.path() == "/playlist" || parsed.query_pairs().any(|(k, _)| k == "list")
}
