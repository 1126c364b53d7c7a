//! Capability interface over the host page.
//!
//! The orchestration code never touches the DOM directly. Everything it needs
//! from the host application (row enumeration, menu controls, clicks) goes
//! through [`HostPage`], and every live row reference is wrapped in a
//! [`RowHandle`] that can be asked whether it is still attached.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// A live reference to one rendered list row.
///
/// The host page owns the element and may destroy or replace it at any time.
/// Detachment is the only signal that a removal succeeded.
#[async_trait]
pub trait RowHandle: Clone + Send + Sync {
    /// Whether the referenced element is still part of the document.
    async fn is_attached(&self) -> Result<bool, PageError>;
}

/// Raw text read out of a row, before any normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// `href` of the title link, as rendered (may be relative).
    pub href: String,
    /// Text content of the title link.
    pub title: String,
    /// Text content of the subtitle block, if the row has one.
    pub subtitle: Option<String>,
}

/// A clickable control inside a row, with its accessible label.
#[derive(Debug, Clone)]
pub struct Control<E> {
    pub element: E,
    pub label: String,
}

/// An item of a currently open contextual menu.
#[derive(Debug, Clone)]
pub struct MenuEntry<E> {
    pub element: E,
    /// The item's own `aria-label`.
    pub aria_label: String,
    /// `aria-label` of the first labelled descendant.
    pub nested_label: String,
    /// Text of the first formatted-string descendant.
    pub formatted_text: String,
    /// Plain text content of the item.
    pub text_content: String,
    /// Laid out and not hidden by style.
    pub visible: bool,
}

/// Where a scrolled row should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Center,
    End,
}

impl ScrollAlign {
    /// Value for `scrollIntoView({ block })`.
    pub fn as_block(&self) -> &'static str {
        match self {
            ScrollAlign::Center => "center",
            ScrollAlign::End => "end",
        }
    }
}

/// Everything the scanner, loader and remover need from the host page.
#[async_trait]
pub trait HostPage: Send + Sync {
    /// Handle to a list row.
    type Row: RowHandle + 'static;
    /// Handle to any other clickable element (menu triggers, menu items).
    type Element: Clone + Send + Sync + 'static;

    /// Full URL of the page.
    async fn current_url(&self) -> Result<String, PageError>;

    /// Rendered list rows that contain a title link, in document order.
    ///
    /// Handles from an earlier call may be invalidated by a later one.
    async fn list_rows(&self) -> Result<Vec<Self::Row>, PageError>;

    /// Number of rows [`list_rows`](Self::list_rows) would return, without
    /// creating handles.
    async fn row_count(&self) -> Result<usize, PageError>;

    /// Scroll the last rendered row to the bottom of the viewport. `false`
    /// when no row is rendered.
    async fn scroll_last_row_into_view(&self) -> Result<bool, PageError>;

    /// Read a row's title link and subtitle. `None` when the link is gone.
    async fn read_row(&self, row: &Self::Row) -> Result<Option<RawRow>, PageError>;

    async fn scroll_row_into_view(&self, row: &Self::Row, align: ScrollAlign)
        -> Result<(), PageError>;

    async fn scroll_to_top(&self) -> Result<(), PageError>;

    /// Candidate menu-trigger controls scoped to the row.
    async fn row_controls(&self, row: &Self::Row) -> Result<Vec<Control<Self::Element>>, PageError>;

    /// Items of any contextual menu currently in the document.
    async fn visible_menu_items(&self) -> Result<Vec<MenuEntry<Self::Element>>, PageError>;

    async fn click(&self, element: &Self::Element) -> Result<(), PageError>;

    /// Close open menus: click elsewhere and send Escape.
    async fn dismiss_menus(&self) -> Result<(), PageError>;

    /// Drop controls and menu items looked up for the last row attempt.
    /// Row handles stay valid.
    async fn release_lookups(&self) -> Result<(), PageError> {
        Ok(())
    }
}
