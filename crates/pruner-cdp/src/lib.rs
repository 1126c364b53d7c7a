//! # Pruner CDP
//!
//! Drives a YouTube Music tab in a running Chrome through the DevTools
//! Protocol and exposes it to `pruner-core` as a [`HostPage`](pruner_core::HostPage).
//!
//! Start Chrome with remote debugging enabled:
//!
//! ```bash
//! chrome --remote-debugging-port=9222
//! ```

pub mod cdp;
mod page;
mod scripts;

pub use cdp::{CdpClient, CdpError, PageInfo, PageSession};
pub use page::{CdpElement, CdpHostPage, CdpRowHandle};
