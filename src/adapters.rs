//! Conversions from the config file to the orchestrator's settings, and
//! local paths.

use std::path::PathBuf;
use std::time::Duration;

use pruner_config::{Config, ConfigLoader, LoggingConfig, MatchingConfig, TimingConfig};
use pruner_core::{MatchRules, Settings, Timing};

/// Get the .pruner directory path.
pub(crate) fn pruner_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".pruner"))
        .unwrap_or_else(|| PathBuf::from(".pruner"))
}

/// Directory for rotated log files.
pub(crate) fn log_dir(logging: &LoggingConfig) -> PathBuf {
    if logging.dir.trim().is_empty() {
        return pruner_dir().join("logs");
    }
    PathBuf::from(ConfigLoader::expand_path(&logging.dir))
}

pub(crate) fn settings_from(config: &Config) -> Settings {
    Settings {
        timing: timing_from(&config.timing),
        rules: rules_from(&config.matching),
    }
}

fn timing_from(t: &TimingConfig) -> Timing {
    Timing {
        settle: Duration::from_millis(t.settle_ms),
        load_pass_pause: Duration::from_millis(t.load_pass_pause_ms),
        load_max_passes: t.load_max_passes,
        load_stable_passes: t.load_stable_passes,
        menu_timeout: Duration::from_millis(t.menu_timeout_ms),
        menu_poll: Duration::from_millis(t.menu_poll_ms),
        detach_timeout: Duration::from_millis(t.detach_timeout_ms),
        detach_poll: Duration::from_millis(t.detach_poll_ms),
        cooldown: Duration::from_millis(t.cooldown_ms),
    }
}

fn rules_from(m: &MatchingConfig) -> MatchRules {
    MatchRules {
        trigger_allow: m.trigger_allow.clone(),
        trigger_deny: m.trigger_deny.clone(),
        remove_phrases: m.remove_phrases.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_settings() {
        assert_eq!(settings_from(&Config::default()), Settings::default());
    }

    #[test]
    fn test_timing_conversion() {
        let mut config = Config::default();
        config.timing.cooldown_ms = 1500;
        config.timing.load_max_passes = 3;

        let settings = settings_from(&config);
        assert_eq!(settings.timing.cooldown, Duration::from_millis(1500));
        assert_eq!(settings.timing.load_max_passes, 3);
    }

    #[test]
    fn test_rules_conversion() {
        let mut config = Config::default();
        config.matching.remove_phrases = vec!["aus playlist entfernen".to_string()];

        let settings = settings_from(&config);
        assert_eq!(settings.rules.remove_phrases, vec!["aus playlist entfernen"]);
        assert_eq!(settings.rules.trigger_deny, config.matching.trigger_deny);
    }

    #[test]
    fn test_log_dir_expands_tilde() {
        let dir = log_dir(&LoggingConfig::default());
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.ends_with(".pruner/logs"));
    }

    #[test]
    fn test_log_dir_empty_falls_back() {
        let logging = LoggingConfig {
            dir: String::new(),
            ..LoggingConfig::default()
        };
        assert!(log_dir(&logging).ends_with("logs"));
    }
}
