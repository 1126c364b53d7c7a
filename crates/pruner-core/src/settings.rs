//! Timing thresholds and matching vocabulary passed into the orchestrator.

use std::time::Duration;

/// Polling intervals, timeouts and pass budgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    /// Pause after scrolling a row into view or back to the top.
    pub settle: Duration,
    /// Pause after each loader scroll.
    pub load_pass_pause: Duration,
    pub load_max_passes: u32,
    /// Non-growing passes after which the list counts as loaded.
    pub load_stable_passes: u32,
    pub menu_timeout: Duration,
    pub menu_poll: Duration,
    pub detach_timeout: Duration,
    pub detach_poll: Duration,
    /// Pause between two removal attempts.
    pub cooldown: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(120),
            load_pass_pause: Duration::from_millis(350),
            load_max_passes: 80,
            load_stable_passes: 5,
            menu_timeout: Duration::from_millis(5000),
            menu_poll: Duration::from_millis(100),
            detach_timeout: Duration::from_millis(6000),
            detach_poll: Duration::from_millis(120),
            cooldown: Duration::from_millis(500),
        }
    }
}

/// Vocabulary for recognizing the row menu trigger and the remove action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRules {
    /// A trigger label must contain one of these as a whole token.
    pub trigger_allow: Vec<String>,
    /// A trigger label containing a token starting with one of these is rejected.
    pub trigger_deny: Vec<String>,
    /// Literal phrases meaning "remove this item from this playlist".
    pub remove_phrases: Vec<String>,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            trigger_allow: to_strings(&["more", "actions", "action", "menu", "options"]),
            trigger_deny: to_strings(&["like", "dislike", "thumb", "save", "share"]),
            remove_phrases: to_strings(&[
                "remove from playlist",
                "remove from this playlist",
                "delete from playlist",
            ]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Everything the orchestrator is parameterized by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub timing: Timing,
    pub rules: MatchRules,
}
