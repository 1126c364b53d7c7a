//! Chrome DevTools Protocol client.
//!
//! Connects to Chrome over WebSocket and speaks CDP JSON-RPC. Only the
//! pieces the pruner needs are here: page discovery, target attachment,
//! the Runtime domain and key events.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let pages = client.list_pages().await?;
//! let session = client.attach_page(&pages[0].id).await?;
//! let url = session.evaluate("location.href").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
