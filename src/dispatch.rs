//! Routes a command to a host page: a browser tab reached over CDP, or an
//! in-memory fixture page.

use std::path::Path;

use async_trait::async_trait;
use pruner_cdp::{CdpClient, CdpError, CdpHostPage, PageInfo};
use pruner_config::SelectorConfig;
use pruner_core::{
    ActionMatcher, HostPage, MemoryFixture, MemoryPage, Pruner, Request, Response, Settings,
    is_playlist_url,
};
use thiserror::Error;
use tracing::{debug, info};

/// Why a command could not reach a page.
#[derive(Debug, Error)]
pub(crate) enum DispatchError {
    #[error("No active tab found.")]
    NoTab,

    #[error("Open a YouTube Music playlist tab first.")]
    NotHostPage,

    #[error("Open a playlist URL first (must include a list).")]
    NotPlaylist,

    #[error(transparent)]
    Cdp(#[from] CdpError),

    #[error("Invalid fixture {path}: {message}")]
    Fixture { path: String, message: String },
}

/// Anything that turns a request into a response envelope.
#[async_trait]
pub(crate) trait CommandRunner: Send + Sync {
    async fn execute(&self, request: Request) -> Response;
}

#[async_trait]
impl<P: HostPage, M: ActionMatcher> CommandRunner for Pruner<P, M> {
    async fn execute(&self, request: Request) -> Response {
        self.handle(request).await
    }
}

/// Attaches to a browser tab afresh for every command, so the user may switch
/// playlists between commands.
pub(crate) struct BrowserRunner {
    pub endpoint: String,
    pub tab: Option<String>,
    pub host_prefix: String,
    pub selectors: SelectorConfig,
    pub settings: Settings,
}

impl BrowserRunner {
    async fn open(&self) -> Result<CdpHostPage, DispatchError> {
        let client = CdpClient::connect(&self.endpoint).await?;
        let pages = client.list_pages().await?;
        debug!(count = pages.len(), "Listed browser targets");

        let page = select_tab(&pages, self.tab.as_deref(), &self.host_prefix)?;
        info!(target_id = %page.id, url = %page.url, "Selected tab");

        Ok(CdpHostPage::attach(&client, &page.id, self.selectors.clone()).await?)
    }
}

#[async_trait]
impl CommandRunner for BrowserRunner {
    async fn execute(&self, request: Request) -> Response {
        match self.open().await {
            Ok(page) => Pruner::new(page, self.settings.clone()).handle(request).await,
            Err(e) => Response::failure(e.to_string()),
        }
    }
}

/// Pick the tab to drive.
///
/// With an explicit target id only that tab is considered. Otherwise the
/// first tab passing both checks wins; when none does, the first tab's
/// failure is reported, since `/json/list` lists the most recently used tab
/// first.
pub(crate) fn select_tab<'a>(
    pages: &'a [PageInfo],
    tab: Option<&str>,
    host_prefix: &str,
) -> Result<&'a PageInfo, DispatchError> {
    let mut tabs = pages.iter().filter(|p| p.is_tab() && !p.url.is_empty());

    if let Some(id) = tab {
        let page = tabs.find(|p| p.id == id).ok_or(DispatchError::NoTab)?;
        check_tab(page, host_prefix)?;
        return Ok(page);
    }

    let tabs: Vec<&PageInfo> = tabs.collect();
    let first = tabs.first().ok_or(DispatchError::NoTab)?;

    match tabs.iter().copied().find(|p| check_tab(p, host_prefix).is_ok()) {
        Some(page) => Ok(page),
        None => Err(check_tab(first, host_prefix).err().unwrap_or(DispatchError::NoTab)),
    }
}

fn check_tab(page: &PageInfo, host_prefix: &str) -> Result<(), DispatchError> {
    if !page.url.starts_with(host_prefix) {
        return Err(DispatchError::NotHostPage);
    }
    if !is_playlist_url(&page.url) {
        return Err(DispatchError::NotPlaylist);
    }
    Ok(())
}

/// Load a fixture file into a memory-backed pruner.
pub(crate) fn fixture_pruner(
    path: &Path,
    settings: Settings,
) -> Result<Pruner<MemoryPage>, DispatchError> {
    let fixture_error = |message: String| DispatchError::Fixture {
        path: path.display().to_string(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
    let fixture: MemoryFixture =
        serde_json::from_str(&content).map_err(|e| fixture_error(e.to_string()))?;

    info!(rows = fixture.rows.len(), url = %fixture.url, "Loaded fixture");
    Ok(Pruner::new(MemoryPage::from_fixture(fixture), settings))
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
