//! Heuristics for locating the row menu trigger and the remove action.
//!
//! These are the parts most likely to break when the host page changes its
//! markup, so they sit behind [`ActionMatcher`] and can be replaced without
//! touching the remover or the batch orchestrator.

use crate::page::{Control, MenuEntry};
use crate::settings::MatchRules;
use crate::track::normalize_text;

/// Picks controls out of what the page offers.
pub trait ActionMatcher: Send + Sync {
    /// Index of the control that opens the row's overflow menu.
    fn pick_menu_trigger<E>(&self, controls: &[Control<E>]) -> Option<usize>;

    /// Index of the visible menu item that removes the row from the playlist.
    fn pick_remove_item<E>(&self, items: &[MenuEntry<E>]) -> Option<usize>;
}

/// Allow/deny token and literal phrase matching.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    allow: Vec<String>,
    deny: Vec<String>,
    phrases: Vec<String>,
}

impl PhraseMatcher {
    pub fn new(rules: &MatchRules) -> Self {
        Self {
            allow: rules.trigger_allow.iter().map(|t| normalize_text(t)).collect(),
            deny: rules.trigger_deny.iter().map(|t| normalize_text(t)).collect(),
            phrases: rules
                .remove_phrases
                .iter()
                .map(|p| normalize_text(p))
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Whether an accessible label identifies a safe overflow-menu trigger.
    pub fn is_menu_label(&self, label: &str) -> bool {
        let tokens = tokenize(label);
        if tokens.is_empty() {
            return false;
        }

        let denied = tokens
            .iter()
            .any(|t| self.deny.iter().any(|d| !d.is_empty() && t.starts_with(d.as_str())));
        if denied {
            return false;
        }

        tokens.iter().any(|t| self.allow.iter().any(|a| a == t))
    }

    /// Whether combined menu-item text contains a remove phrase.
    pub fn is_remove_text(&self, text: &str) -> bool {
        !text.is_empty() && self.phrases.iter().any(|p| text.contains(p.as_str()))
    }
}

impl Default for PhraseMatcher {
    fn default() -> Self {
        Self::new(&MatchRules::default())
    }
}

impl ActionMatcher for PhraseMatcher {
    fn pick_menu_trigger<E>(&self, controls: &[Control<E>]) -> Option<usize> {
        controls.iter().position(|c| self.is_menu_label(&c.label))
    }

    fn pick_remove_item<E>(&self, items: &[MenuEntry<E>]) -> Option<usize> {
        items
            .iter()
            .position(|item| item.visible && self.is_remove_text(&menu_item_text(item)))
    }
}

/// Normalized label, nested label, formatted text and text content of a menu
/// item, empties dropped, joined with spaces.
pub fn menu_item_text<E>(item: &MenuEntry<E>) -> String {
    [
        &item.aria_label,
        &item.nested_label,
        &item.formatted_text,
        &item.text_content,
    ]
    .iter()
    .map(|s| normalize_text(s))
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

fn tokenize(label: &str) -> Vec<String> {
    label
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
