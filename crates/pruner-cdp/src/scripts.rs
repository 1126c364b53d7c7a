//! Page-side JavaScript run through `Runtime.evaluate` and
//! `Runtime.callFunctionOn`.
//!
//! Functions take selectors as arguments; nothing user-configurable is
//! spliced into source text except through [`invoke`].

use serde_json::Value;

/// Rendered rows that contain a title link. Document scope.
pub(crate) const LIST_ROWS: &str = r#"function(rowSelector, linkSelector) {
  return Array.from(document.querySelectorAll(rowSelector))
    .filter((row) => row.querySelector(linkSelector));
}"#;

/// Count of the rows [`LIST_ROWS`] returns.
pub(crate) const COUNT_ROWS: &str = r#"function(rowSelector, linkSelector) {
  return Array.from(document.querySelectorAll(rowSelector))
    .filter((row) => row.querySelector(linkSelector)).length;
}"#;

/// Scroll the last listed row to the bottom of the viewport. `false` when
/// there is none.
pub(crate) const SCROLL_LAST_ROW: &str = r#"function(rowSelector, linkSelector) {
  const rows = Array.from(document.querySelectorAll(rowSelector))
    .filter((row) => row.querySelector(linkSelector));
  const last = rows[rows.length - 1];
  if (!last) return false;
  last.scrollIntoView({ block: "end", behavior: "auto" });
  return true;
}"#;

/// Title link and subtitle of `this` row, or `null` when the link is gone.
pub(crate) const READ_ROW: &str = r#"function(linkSelector, subtitleSelector) {
  const link = this.querySelector(linkSelector);
  if (!link) return null;
  const subtitle = this.querySelector(subtitleSelector);
  return {
    href: link.href || link.getAttribute("href") || "",
    title: link.textContent || "",
    subtitle: subtitle ? subtitle.textContent || "" : null,
  };
}"#;

pub(crate) const SCROLL_INTO_VIEW: &str = r#"function(block) {
  this.scrollIntoView({ block, behavior: "auto" });
}"#;

pub(crate) const SCROLL_TO_TOP: &str = r#"(() => {
  window.scrollTo(0, 0);
  if (document.scrollingElement) document.scrollingElement.scrollTop = 0;
  return true;
})()"#;

/// Controls of `this` row matching any selector, deduplicated, in selector
/// order.
pub(crate) const ROW_CONTROLS: &str = r#"function(selectors) {
  const seen = new Set();
  const controls = [];
  for (const selector of selectors) {
    for (const el of this.querySelectorAll(selector)) {
      if (!seen.has(el)) {
        seen.add(el);
        controls.push(el);
      }
    }
  }
  return controls;
}"#;

/// Accessible label of `this` control.
pub(crate) const CONTROL_LABEL: &str = r#"function() {
  return this.getAttribute("aria-label") || this.getAttribute("title") || "";
}"#;

/// Contextual menu items anywhere in the document.
pub(crate) const MENU_ITEMS: &str = r#"function(itemSelector) {
  return Array.from(document.querySelectorAll(itemSelector));
}"#;

/// Texts and visibility of `this` menu item. A detached item reports itself
/// as not visible.
pub(crate) const DESCRIBE_MENU_ITEM: &str = r#"function(textSelector) {
  const style = window.getComputedStyle(this);
  const nested = this.querySelector("[aria-label]");
  const formatted = this.querySelector(textSelector);
  return {
    ariaLabel: this.getAttribute("aria-label") || "",
    nestedLabel: nested ? nested.getAttribute("aria-label") || "" : "",
    formattedText: formatted ? formatted.textContent || "" : "",
    textContent: this.textContent || "",
    visible: this.isConnected && style.display !== "none" && style.visibility !== "hidden" && this.getClientRects().length > 0,
  };
}"#;

pub(crate) const CLICK: &str = "function() { this.click(); }";

pub(crate) const IS_CONNECTED: &str = "function() { return this.isConnected; }";

pub(crate) const CLICK_BODY: &str = "(() => { if (document.body) document.body.click(); return true; })()";

/// Expression that calls `function` with JSON-encoded arguments.
pub(crate) fn invoke(function: &str, args: &[Value]) -> String {
    let args: Vec<String> = args.iter().map(Value::to_string).collect();
    format!("({})({})", function, args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invoke_encodes_arguments() {
        let expr = invoke("function(a, b) { return a + b; }", &[json!("x\"y"), json!(false)]);
        assert_eq!(expr, r#"(function(a, b) { return a + b; })("x\"y", false)"#);
    }

    #[test]
    fn test_invoke_without_arguments() {
        assert_eq!(invoke("function() {}", &[]), "(function() {})()");
    }

    #[test]
    fn test_invoke_selector_with_quotes() {
        let expr = invoke(LIST_ROWS, &[json!("row"), json!(r#"a[href*="watch?v="]"#)]);
        assert!(expr.ends_with(r#"("row", "a[href*=\"watch?v=\"]")"#));
    }
}
