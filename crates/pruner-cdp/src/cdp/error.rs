//! CDP error types.

use pruner_core::PageError;
use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Chrome not found or not running with remote debugging.
    #[error("Chrome not available at {0}. Start Chrome with: chrome --remote-debugging-port=9222")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Error object returned by the browser for a command.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A script evaluated in the page threw.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// Whether the browser rejected a remote object id, which happens once the
    /// node was garbage collected or its execution context went away.
    pub fn is_stale_object(&self) -> bool {
        match self {
            CdpError::Protocol { message, .. } => {
                message.contains("Could not find object")
                    || message.contains("Cannot find context")
                    || message.contains("Execution context was destroyed")
            }
            _ => false,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for PageError {
    fn from(e: CdpError) -> Self {
        if e.is_stale_object() {
            return PageError::Detached(e.to_string());
        }
        match e {
            CdpError::JavaScript(text) => PageError::Script(text),
            CdpError::Serialization(err) => PageError::InvalidResponse(err.to_string()),
            CdpError::InvalidResponse(text) => PageError::InvalidResponse(text),
            other => PageError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protocol(message: &str) -> CdpError {
        CdpError::Protocol {
            code: -32000,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_stale_object_detection() {
        assert!(protocol("Could not find object with given id").is_stale_object());
        assert!(protocol("Cannot find context with specified id").is_stale_object());
        assert!(!protocol("Target closed").is_stale_object());
        assert!(!CdpError::SessionClosed.is_stale_object());
    }

    #[test]
    fn test_stale_object_maps_to_detached() {
        let err: PageError = protocol("Could not find object with given id").into();
        assert!(matches!(err, PageError::Detached(_)));
    }

    #[test]
    fn test_javascript_maps_to_script() {
        let err: PageError = CdpError::JavaScript("Uncaught TypeError".to_string()).into();
        assert!(matches!(err, PageError::Script(ref t) if t == "Uncaught TypeError"));
    }

    #[test]
    fn test_transport_errors() {
        let err: PageError = CdpError::Timeout("Request Runtime.evaluate timed out".to_string()).into();
        assert!(matches!(err, PageError::Transport(_)));

        let err: PageError = CdpError::SessionClosed.into();
        assert_eq!(err.to_string(), "Transport error: Session closed");
    }

    #[test]
    fn test_chrome_not_available_message() {
        let err = CdpError::ChromeNotAvailable("http://localhost:9222".to_string());
        assert!(err.to_string().contains("--remote-debugging-port=9222"));
    }
}
