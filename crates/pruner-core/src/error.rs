//! Error types for page automation.

use thiserror::Error;

/// Errors raised by a [`HostPage`](crate::HostPage) implementation.
#[derive(Debug, Error)]
pub enum PageError {
    /// The element handle no longer refers to a node in the page.
    #[error("Element detached: {0}")]
    Detached(String),

    /// A script evaluated in the page threw.
    #[error("Script error: {0}")]
    Script(String),

    /// The connection to the page failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The page answered with something we could not interpret.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors surfaced to the command dispatcher.
#[derive(Debug, Error)]
pub enum PrunerError {
    /// The current page is not a playlist view; nothing was touched.
    #[error("Open a YouTube Music playlist page first.")]
    NotPlaylistPage(String),

    /// The page adapter failed.
    #[error(transparent)]
    Page(#[from] PageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_playlist_message_is_user_facing() {
        let err = PrunerError::NotPlaylistPage("https://music.youtube.com/".to_string());
        assert_eq!(err.to_string(), "Open a YouTube Music playlist page first.");
    }

    #[test]
    fn test_page_error_is_transparent() {
        let err: PrunerError = PageError::Transport("socket closed".to_string()).into();
        assert_eq!(err.to_string(), "Transport error: socket closed");
    }

    #[test]
    fn test_page_error_debug() {
        let err = PageError::Detached("row-3".to_string());
        assert!(format!("{:?}", err).contains("Detached"));
    }
}
