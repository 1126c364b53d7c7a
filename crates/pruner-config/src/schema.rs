//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub selectors: SelectorConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Browser connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Only tabs whose URL starts with this prefix are eligible.
    #[serde(default = "default_host_prefix")]
    pub host_prefix: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            host_prefix: default_host_prefix(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_host_prefix() -> String {
    "https://music.youtube.com/".to_string()
}

/// Polling intervals, timeouts and pass budgets. All durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    #[serde(default = "default_load_pass_pause_ms")]
    pub load_pass_pause_ms: u64,

    #[serde(default = "default_load_max_passes")]
    pub load_max_passes: u32,

    #[serde(default = "default_load_stable_passes")]
    pub load_stable_passes: u32,

    #[serde(default = "default_menu_timeout_ms")]
    pub menu_timeout_ms: u64,

    #[serde(default = "default_menu_poll_ms")]
    pub menu_poll_ms: u64,

    #[serde(default = "default_detach_timeout_ms")]
    pub detach_timeout_ms: u64,

    #[serde(default = "default_detach_poll_ms")]
    pub detach_poll_ms: u64,

    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
            load_pass_pause_ms: default_load_pass_pause_ms(),
            load_max_passes: default_load_max_passes(),
            load_stable_passes: default_load_stable_passes(),
            menu_timeout_ms: default_menu_timeout_ms(),
            menu_poll_ms: default_menu_poll_ms(),
            detach_timeout_ms: default_detach_timeout_ms(),
            detach_poll_ms: default_detach_poll_ms(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

fn default_settle_ms() -> u64 {
    120
}

fn default_load_pass_pause_ms() -> u64 {
    350
}

fn default_load_max_passes() -> u32 {
    80
}

fn default_load_stable_passes() -> u32 {
    5
}

fn default_menu_timeout_ms() -> u64 {
    5000
}

fn default_menu_poll_ms() -> u64 {
    100
}

fn default_detach_timeout_ms() -> u64 {
    6000
}

fn default_detach_poll_ms() -> u64 {
    120
}

fn default_cooldown_ms() -> u64 {
    500
}

/// Vocabulary for recognizing the row menu and the remove action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_trigger_allow")]
    pub trigger_allow: Vec<String>,

    #[serde(default = "default_trigger_deny")]
    pub trigger_deny: Vec<String>,

    #[serde(default = "default_remove_phrases")]
    pub remove_phrases: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            trigger_allow: default_trigger_allow(),
            trigger_deny: default_trigger_deny(),
            remove_phrases: default_remove_phrases(),
        }
    }
}

fn default_trigger_allow() -> Vec<String> {
    strings(&["more", "actions", "action", "menu", "options"])
}

fn default_trigger_deny() -> Vec<String> {
    strings(&["like", "dislike", "thumb", "save", "share"])
}

fn default_remove_phrases() -> Vec<String> {
    strings(&[
        "remove from playlist",
        "remove from this playlist",
        "delete from playlist",
    ])
}

/// CSS selectors for the host page markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// One list row.
    #[serde(default = "default_row")]
    pub row: String,

    /// Title link inside a row; rows without one are ignored.
    #[serde(default = "default_title_link")]
    pub title_link: String,

    #[serde(default = "default_subtitle")]
    pub subtitle: String,

    /// Candidate menu triggers inside a row, tried in order.
    #[serde(default = "default_menu_triggers")]
    pub menu_triggers: Vec<String>,

    /// Items of an open contextual menu, anywhere in the document.
    #[serde(default = "default_menu_items")]
    pub menu_items: String,

    /// Formatted text node inside a menu item.
    #[serde(default = "default_formatted_text")]
    pub formatted_text: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            row: default_row(),
            title_link: default_title_link(),
            subtitle: default_subtitle(),
            menu_triggers: default_menu_triggers(),
            menu_items: default_menu_items(),
            formatted_text: default_formatted_text(),
        }
    }
}

fn default_row() -> String {
    "ytmusic-responsive-list-item-renderer".to_string()
}

fn default_title_link() -> String {
    r#"a[href*="watch?v="]"#.to_string()
}

fn default_subtitle() -> String {
    "#subtitle".to_string()
}

fn default_menu_triggers() -> Vec<String> {
    strings(&[
        "ytmusic-menu-renderer yt-icon-button button",
        "ytmusic-menu-renderer button",
        "#menu yt-icon-button button",
        "#menu button[aria-label]",
    ])
}

fn default_menu_items() -> String {
    "ytmusic-menu-service-item-renderer, ytmusic-menu-navigation-item-renderer, \
     tp-yt-paper-item, [role='menuitem']"
        .to_string()
}

fn default_formatted_text() -> String {
    "yt-formatted-string".to_string()
}

/// Message endpoint for `serve` mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8765
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for rotated log files. `~` is expanded.
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: default_log_dir(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "~/.pruner/logs".to_string()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = TimingConfig::default();
        assert_eq!(timing.load_max_passes, 80);
        assert_eq!(timing.load_stable_passes, 5);
        assert_eq!(timing.menu_timeout_ms, 5000);
        assert_eq!(timing.detach_timeout_ms, 6000);
        assert_eq!(timing.cooldown_ms, 500);
    }

    #[test]
    fn test_default_selectors() {
        let selectors = SelectorConfig::default();
        assert_eq!(selectors.row, "ytmusic-responsive-list-item-renderer");
        assert_eq!(selectors.title_link, "a[href*=\"watch?v=\"]");
        assert_eq!(selectors.menu_triggers.len(), 4);
        assert!(selectors.menu_items.contains("[role='menuitem']"));
    }

    #[test]
    fn test_default_matching() {
        let matching = MatchingConfig::default();
        assert!(matching.trigger_deny.contains(&"thumb".to_string()));
        assert!(matching.remove_phrases.contains(&"remove from playlist".to_string()));
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.timing, config.timing);
        assert_eq!(parsed.selectors, config.selectors);
    }
}
