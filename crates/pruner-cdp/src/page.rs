//! [`HostPage`] over a CDP page session.
//!
//! Rows, controls and menu items are held as remote object ids, so a handle
//! keeps pointing at the same DOM node for as long as the page keeps it alive.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use pruner_config::SelectorConfig;
use pruner_core::{Control, HostPage, MenuEntry, PageError, RawRow, RowHandle, ScrollAlign};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::cdp::{CdpClient, CdpError, PageSession, RemoteObject};
use crate::scripts;

/// A list row in the attached tab.
#[derive(Clone)]
pub struct CdpRowHandle {
    object_id: String,
    session: Arc<PageSession>,
}

impl CdpRowHandle {
    pub fn object_id(&self) -> &str {
        &self.object_id
    }
}

impl fmt::Debug for CdpRowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdpRowHandle")
            .field("object_id", &self.object_id)
            .finish()
    }
}

#[async_trait]
impl RowHandle for CdpRowHandle {
    async fn is_attached(&self) -> Result<bool, PageError> {
        match self
            .session
            .call_function_on(&self.object_id, scripts::IS_CONNECTED, vec![])
            .await
        {
            Ok(value) => Ok(value.as_bool().unwrap_or(false)),
            // The node was collected, so it cannot be in the document.
            Err(e) if e.is_stale_object() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// A clickable element (menu trigger or menu item) in the attached tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdpElement {
    object_id: String,
}

impl CdpElement {
    pub fn object_id(&self) -> &str {
        &self.object_id
    }
}

/// Texts and visibility of one menu item, as reported by the page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MenuItemDescription {
    aria_label: String,
    nested_label: String,
    formatted_text: String,
    text_content: String,
    visible: bool,
}

/// Object group holding the row handles of the latest listing.
const ROWS_GROUP: &str = "pruner-rows";
/// Object group holding the candidate triggers of the latest row.
const CONTROLS_GROUP: &str = "pruner-controls";
/// Object group holding the items of the latest menu poll.
const MENU_GROUP: &str = "pruner-menu";

/// A YouTube Music tab driven through the DevTools Protocol.
pub struct CdpHostPage {
    session: Arc<PageSession>,
    selectors: SelectorConfig,
}

impl CdpHostPage {
    pub fn new(session: PageSession, selectors: SelectorConfig) -> Self {
        Self {
            session: Arc::new(session),
            selectors,
        }
    }

    /// Attach to an open tab by target id.
    pub async fn attach(
        client: &CdpClient,
        target_id: &str,
        selectors: SelectorConfig,
    ) -> Result<Self, CdpError> {
        let session = client.attach_page(target_id).await?;
        debug!(target_id, session_id = session.session_id(), "Attached to tab");
        Ok(Self::new(session, selectors))
    }

    fn row(&self, object: RemoteObject) -> Option<CdpRowHandle> {
        Some(CdpRowHandle {
            object_id: object.object_id?,
            session: self.session.clone(),
        })
    }

    fn row_selectors(&self) -> [Value; 2] {
        [json!(self.selectors.row), json!(self.selectors.title_link)]
    }
}

#[async_trait]
impl HostPage for CdpHostPage {
    type Row = CdpRowHandle;
    type Element = CdpElement;

    async fn current_url(&self) -> Result<String, PageError> {
        let value = self.session.evaluate("location.href").await?;
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| PageError::InvalidResponse(format!("location.href was {}", value)))
    }

    /// Rows from the previous listing are released first.
    async fn list_rows(&self) -> Result<Vec<CdpRowHandle>, PageError> {
        self.session.release_object_group(ROWS_GROUP).await?;

        let expr = scripts::invoke(scripts::LIST_ROWS, &self.row_selectors());
        let array = self.session.evaluate_handle(&expr, ROWS_GROUP).await?;
        let elements = self.session.array_elements(&array).await?;
        Ok(elements.into_iter().filter_map(|o| self.row(o)).collect())
    }

    async fn row_count(&self) -> Result<usize, PageError> {
        let expr = scripts::invoke(scripts::COUNT_ROWS, &self.row_selectors());
        let value = self.session.evaluate(&expr).await?;
        value
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| PageError::InvalidResponse(format!("row count was {}", value)))
    }

    async fn scroll_last_row_into_view(&self) -> Result<bool, PageError> {
        let expr = scripts::invoke(scripts::SCROLL_LAST_ROW, &self.row_selectors());
        Ok(self.session.evaluate(&expr).await?.as_bool().unwrap_or(false))
    }

    async fn read_row(&self, row: &CdpRowHandle) -> Result<Option<RawRow>, PageError> {
        let value = self
            .session
            .call_function_on(
                &row.object_id,
                scripts::READ_ROW,
                vec![json!(self.selectors.title_link), json!(self.selectors.subtitle)],
            )
            .await?;
        parse_raw_row(value)
    }

    async fn scroll_row_into_view(
        &self,
        row: &CdpRowHandle,
        align: ScrollAlign,
    ) -> Result<(), PageError> {
        self.session
            .call_function_on(
                &row.object_id,
                scripts::SCROLL_INTO_VIEW,
                vec![json!(align.as_block())],
            )
            .await?;
        Ok(())
    }

    async fn scroll_to_top(&self) -> Result<(), PageError> {
        self.session.evaluate(scripts::SCROLL_TO_TOP).await?;
        Ok(())
    }

    async fn row_controls(&self, row: &CdpRowHandle) -> Result<Vec<Control<CdpElement>>, PageError> {
        self.session.release_object_group(CONTROLS_GROUP).await?;

        let array = self
            .session
            .call_function_on_handle(
                &row.object_id,
                scripts::ROW_CONTROLS,
                vec![json!(self.selectors.menu_triggers)],
                CONTROLS_GROUP,
            )
            .await?;
        let elements = self.session.array_elements(&array).await?;

        let session = &*self.session;
        let labelled = describe_each(elements, |object_id| async move {
            session
                .call_function_on(&object_id, scripts::CONTROL_LABEL, vec![])
                .await
        })
        .await?;

        Ok(labelled
            .into_iter()
            .map(|(element, label)| Control { element, label })
            .collect())
    }

    async fn visible_menu_items(&self) -> Result<Vec<MenuEntry<CdpElement>>, PageError> {
        self.session.release_object_group(MENU_GROUP).await?;

        let expr = scripts::invoke(scripts::MENU_ITEMS, &[json!(self.selectors.menu_items)]);
        let array = self.session.evaluate_handle(&expr, MENU_GROUP).await?;
        let elements = self.session.array_elements(&array).await?;

        let session = &*self.session;
        let text = json!(self.selectors.formatted_text);
        let described = describe_each(elements, |object_id| {
            let args = vec![text.clone()];
            async move {
                session
                    .call_function_on(&object_id, scripts::DESCRIBE_MENU_ITEM, args)
                    .await
            }
        })
        .await?;

        Ok(described.into_iter().map(menu_entry).collect())
    }

    async fn click(&self, element: &CdpElement) -> Result<(), PageError> {
        self.session
            .call_function_on(&element.object_id, scripts::CLICK, vec![])
            .await?;
        Ok(())
    }

    async fn dismiss_menus(&self) -> Result<(), PageError> {
        self.session.evaluate(scripts::CLICK_BODY).await?;
        self.session.press_key("Escape").await?;
        Ok(())
    }

    async fn release_lookups(&self) -> Result<(), PageError> {
        self.session.release_object_group(CONTROLS_GROUP).await?;
        self.session.release_object_group(MENU_GROUP).await?;
        Ok(())
    }
}

fn parse_raw_row(value: Value) -> Result<Option<RawRow>, PageError> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| PageError::InvalidResponse(format!("row: {}", e)))
}

/// Ask the page about each element through its own object id, so a
/// description always belongs to the handle it is paired with. Elements the
/// page collected in the meantime are dropped.
async fn describe_each<T, F, Fut>(
    elements: Vec<RemoteObject>,
    describe: F,
) -> Result<Vec<(CdpElement, T)>, PageError>
where
    T: DeserializeOwned,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Value, CdpError>>,
{
    let mut described = Vec::with_capacity(elements.len());
    for object_id in elements.into_iter().filter_map(|o| o.object_id) {
        let value = match describe(object_id.clone()).await {
            Ok(value) => value,
            Err(e) if e.is_stale_object() => {
                debug!(object_id = %object_id, "Element went away before it was described");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let description = serde_json::from_value(value)
            .map_err(|e| PageError::InvalidResponse(format!("element description: {}", e)))?;
        described.push((CdpElement { object_id }, description));
    }
    Ok(described)
}

fn menu_entry((element, d): (CdpElement, MenuItemDescription)) -> MenuEntry<CdpElement> {
    MenuEntry {
        element,
        aria_label: d.aria_label,
        nested_label: d.nested_label,
        formatted_text: d.formatted_text,
        text_content: d.text_content,
        visible: d.visible,
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
