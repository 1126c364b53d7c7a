//! In-memory host page.
//!
//! Behaves like a lazily rendering playlist view: rows render in windows as
//! the last one is scrolled into view, each row carries its own controls and
//! contextual menu, and clicking a removing menu item detaches the row. Used
//! by tests and by the `--fixture` dry run of the CLI.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::PageError;
use crate::page::{Control, HostPage, MenuEntry, RawRow, RowHandle, ScrollAlign};

/// Default URL of a memory page.
pub const DEFAULT_URL: &str = "https://music.youtube.com/playlist?list=PLmemory";

/// One item of a row's contextual menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryMenuItem {
    pub text: String,
    #[serde(default)]
    pub hidden: bool,
    /// Clicking this item removes the row.
    #[serde(default)]
    pub removes: bool,
}

impl MemoryMenuItem {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            hidden: false,
            removes: false,
        }
    }

    pub fn removing(text: &str) -> Self {
        Self {
            removes: true,
            ..Self::new(text)
        }
    }
}

/// One row of a memory page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRow {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists: Option<String>,
    /// `false` simulates a title link that vanished between enumeration and read.
    #[serde(default = "default_true")]
    pub readable: bool,
    /// Accessible labels of the row's buttons, in document order.
    #[serde(default = "default_controls")]
    pub controls: Vec<String>,
    #[serde(default = "default_menu")]
    pub menu: Vec<MemoryMenuItem>,
    /// `false` simulates a remove click the host page silently ignores.
    #[serde(default = "default_true")]
    pub detaches: bool,
}

fn default_true() -> bool {
    true
}

fn default_controls() -> Vec<String> {
    vec!["Like".to_string(), "Dislike".to_string(), "Action menu".to_string()]
}

fn default_menu() -> Vec<MemoryMenuItem> {
    vec![
        MemoryMenuItem::new("Play next"),
        MemoryMenuItem::new("Add to queue"),
        MemoryMenuItem::new("Save to playlist"),
        MemoryMenuItem::new("Remove from library"),
        MemoryMenuItem::removing("Remove from playlist"),
    ]
}

impl MemoryRow {
    pub fn with_id(video_id: &str, title: &str, artists: &str) -> Self {
        Self {
            video_id: Some(video_id.to_string()),
            ..Self::without_id(title, artists)
        }
    }

    pub fn without_id(title: &str, artists: &str) -> Self {
        Self {
            video_id: None,
            title: title.to_string(),
            artists: Some(artists.to_string()),
            readable: true,
            controls: default_controls(),
            menu: default_menu(),
            detaches: true,
        }
    }

    pub fn unreadable() -> Self {
        Self {
            readable: false,
            ..Self::without_id("", "")
        }
    }

    pub fn controls(mut self, labels: &[&str]) -> Self {
        self.controls = labels.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn menu(mut self, items: Vec<MemoryMenuItem>) -> Self {
        self.menu = items;
        self
    }

    pub fn ignoring_removal(mut self) -> Self {
        self.detaches = false;
        self
    }
}

/// Fixture file layout for [`MemoryPage::from_fixture`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryFixture {
    #[serde(default = "default_url")]
    pub url: String,
    /// Rows rendered before any scrolling. Defaults to all.
    #[serde(default)]
    pub render_initial: Option<usize>,
    /// Rows added each time the last rendered row is scrolled into view.
    #[serde(default)]
    pub render_step: Option<usize>,
    pub rows: Vec<MemoryRow>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

/// Handle to a memory row.
#[derive(Debug, Clone)]
pub struct MemoryRowHandle {
    id: usize,
    attached: Arc<AtomicBool>,
}

impl MemoryRowHandle {
    pub fn id(&self) -> usize {
        self.id
    }
}

#[async_trait]
impl RowHandle for MemoryRowHandle {
    async fn is_attached(&self) -> Result<bool, PageError> {
        Ok(self.attached.load(Ordering::SeqCst))
    }
}

/// Clickable element of a memory page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryElement {
    Control { row: usize, index: usize },
    MenuItem { row: usize, index: usize },
}

struct Slot {
    row: MemoryRow,
    attached: Arc<AtomicBool>,
}

struct State {
    slots: Vec<Slot>,
    rendered: usize,
    step: usize,
    open_menu: Option<usize>,
    clicks: Vec<String>,
    removals: Vec<usize>,
    dismissals: usize,
    scrolled_to_top: bool,
    list_calls: usize,
    lookup_releases: usize,
    failing: Vec<&'static str>,
}

/// Host page backed by a vector of rows.
pub struct MemoryPage {
    url: String,
    state: Mutex<State>,
}

impl MemoryPage {
    pub fn new(rows: Vec<MemoryRow>) -> Self {
        let len = rows.len();
        let slots = rows
            .into_iter()
            .map(|row| Slot {
                row,
                attached: Arc::new(AtomicBool::new(true)),
            })
            .collect();

        Self {
            url: DEFAULT_URL.to_string(),
            state: Mutex::new(State {
                slots,
                rendered: len,
                step: len.max(1),
                open_menu: None,
                clicks: Vec::new(),
                removals: Vec::new(),
                dismissals: 0,
                scrolled_to_top: false,
                list_calls: 0,
                lookup_releases: 0,
                failing: Vec::new(),
            }),
        }
    }

    pub fn from_fixture(fixture: MemoryFixture) -> Self {
        let initial = fixture.render_initial;
        let step = fixture.render_step;
        let mut page = Self::new(fixture.rows).with_url(&fixture.url);
        if let Some(initial) = initial {
            let step = step.unwrap_or(initial);
            page = page.with_render_window(initial, step);
        }
        page
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Render only `initial` rows and `step` more per scroll to the end.
    pub fn with_render_window(self, initial: usize, step: usize) -> Self {
        {
            let mut state = self.state.lock();
            state.rendered = initial.min(state.slots.len());
            state.step = step.max(1);
        }
        self
    }

    /// Make an operation (`"current_url"`, `"dismiss_menus"`, ...) fail with a
    /// transport error.
    pub fn failing(self, operation: &'static str) -> Self {
        self.state.lock().failing.push(operation);
        self
    }

    /// Detach a row as if the host page re-rendered it away.
    pub fn detach(&self, id: usize) {
        if let Some(slot) = self.state.lock().slots.get(id) {
            slot.attached.store(false, Ordering::SeqCst);
        }
    }

    /// Labels and texts of everything clicked, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().clicks.clone()
    }

    /// Rows removed through their menu, in removal order.
    pub fn removals(&self) -> Vec<usize> {
        self.state.lock().removals.clone()
    }

    pub fn dismissals(&self) -> usize {
        self.state.lock().dismissals
    }

    /// Calls to [`HostPage::list_rows`].
    pub fn list_calls(&self) -> usize {
        self.state.lock().list_calls
    }

    pub fn lookup_releases(&self) -> usize {
        self.state.lock().lookup_releases
    }

    pub fn scrolled_to_top(&self) -> bool {
        self.state.lock().scrolled_to_top
    }

    pub fn attached_count(&self) -> usize {
        self.state
            .lock()
            .slots
            .iter()
            .filter(|s| s.attached.load(Ordering::SeqCst))
            .count()
    }

    /// Titles of the rows still attached, in order.
    pub fn titles(&self) -> Vec<String> {
        self.state
            .lock()
            .slots
            .iter()
            .filter(|s| s.attached.load(Ordering::SeqCst))
            .map(|s| s.row.title.clone())
            .collect()
    }

    fn check(&self, operation: &str) -> Result<(), PageError> {
        if self.state.lock().failing.iter().any(|op| *op == operation) {
            return Err(PageError::Transport(format!("{} failed", operation)));
        }
        Ok(())
    }

    fn handle(id: usize, slot: &Slot) -> MemoryRowHandle {
        MemoryRowHandle {
            id,
            attached: slot.attached.clone(),
        }
    }
}

#[async_trait]
impl HostPage for MemoryPage {
    type Row = MemoryRowHandle;
    type Element = MemoryElement;

    async fn current_url(&self) -> Result<String, PageError> {
        self.check("current_url")?;
        Ok(self.url.clone())
    }

    async fn list_rows(&self) -> Result<Vec<MemoryRowHandle>, PageError> {
        let mut state = self.state.lock();
        state.list_calls += 1;
        Ok(state.slots[..state.rendered]
            .iter()
            .enumerate()
            .filter(|(_, s)| s.attached.load(Ordering::SeqCst))
            .map(|(id, s)| Self::handle(id, s))
            .collect())
    }

    async fn row_count(&self) -> Result<usize, PageError> {
        let state = self.state.lock();
        Ok(state.slots[..state.rendered]
            .iter()
            .filter(|s| s.attached.load(Ordering::SeqCst))
            .count())
    }

    async fn scroll_last_row_into_view(&self) -> Result<bool, PageError> {
        let last = {
            let state = self.state.lock();
            state.slots[..state.rendered]
                .iter()
                .enumerate()
                .rev()
                .find(|(_, s)| s.attached.load(Ordering::SeqCst))
                .map(|(id, s)| Self::handle(id, s))
        };
        let Some(last) = last else {
            return Ok(false);
        };
        self.scroll_row_into_view(&last, ScrollAlign::End).await?;
        Ok(true)
    }

    async fn read_row(&self, row: &MemoryRowHandle) -> Result<Option<RawRow>, PageError> {
        let state = self.state.lock();
        let slot = state
            .slots
            .get(row.id)
            .ok_or_else(|| PageError::Detached(format!("row {}", row.id)))?;

        if !slot.row.readable {
            return Ok(None);
        }

        Ok(Some(RawRow {
            href: format!("watch?v={}", slot.row.video_id.as_deref().unwrap_or("")),
            title: slot.row.title.clone(),
            subtitle: slot.row.artists.clone(),
        }))
    }

    async fn scroll_row_into_view(
        &self,
        row: &MemoryRowHandle,
        align: ScrollAlign,
    ) -> Result<(), PageError> {
        let mut state = self.state.lock();
        state.scrolled_to_top = false;

        if align == ScrollAlign::End {
            let last_rendered = state.slots[..state.rendered]
                .iter()
                .rposition(|s| s.attached.load(Ordering::SeqCst));
            if last_rendered == Some(row.id) {
                state.rendered = (state.rendered + state.step).min(state.slots.len());
            }
        }
        Ok(())
    }

    async fn scroll_to_top(&self) -> Result<(), PageError> {
        self.state.lock().scrolled_to_top = true;
        Ok(())
    }

    async fn row_controls(
        &self,
        row: &MemoryRowHandle,
    ) -> Result<Vec<Control<MemoryElement>>, PageError> {
        let state = self.state.lock();
        let slot = state
            .slots
            .get(row.id)
            .ok_or_else(|| PageError::Detached(format!("row {}", row.id)))?;

        Ok(slot
            .row
            .controls
            .iter()
            .enumerate()
            .map(|(index, label)| Control {
                element: MemoryElement::Control { row: row.id, index },
                label: label.clone(),
            })
            .collect())
    }

    async fn visible_menu_items(&self) -> Result<Vec<MenuEntry<MemoryElement>>, PageError> {
        let state = self.state.lock();
        let Some(row) = state.open_menu else {
            return Ok(Vec::new());
        };

        Ok(state.slots[row]
            .row
            .menu
            .iter()
            .enumerate()
            .map(|(index, item)| MenuEntry {
                element: MemoryElement::MenuItem { row, index },
                aria_label: String::new(),
                nested_label: String::new(),
                formatted_text: item.text.clone(),
                text_content: item.text.clone(),
                visible: !item.hidden,
            })
            .collect())
    }

    async fn click(&self, element: &MemoryElement) -> Result<(), PageError> {
        let mut state = self.state.lock();
        match *element {
            MemoryElement::Control { row, index } => {
                let label = state.slots[row].row.controls[index].clone();
                state.clicks.push(label);
                state.open_menu = Some(row);
            }
            MemoryElement::MenuItem { row, index } => {
                let slot = &state.slots[row];
                let item = slot.row.menu[index].clone();
                let detached = item.removes && slot.row.detaches;
                if detached {
                    slot.attached.store(false, Ordering::SeqCst);
                    state.removals.push(row);
                }
                state.clicks.push(item.text);
                state.open_menu = None;
            }
        }
        Ok(())
    }

    async fn dismiss_menus(&self) -> Result<(), PageError> {
        self.check("dismiss_menus")?;
        let mut state = self.state.lock();
        state.open_menu = None;
        state.dismissals += 1;
        Ok(())
    }

    async fn release_lookups(&self) -> Result<(), PageError> {
        self.state.lock().lookup_releases += 1;
        Ok(())
    }
}
