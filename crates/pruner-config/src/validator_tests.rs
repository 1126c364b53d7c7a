use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = Config::default();
    config.timing.menu_timeout_ms = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "timing.menu_timeout_ms"));
}

#[test]
fn test_validate_zero_poll() {
    let mut config = Config::default();
    config.timing.detach_poll_ms = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "timing.detach_poll_ms"));
}

#[test]
fn test_validate_zero_pass_budget() {
    let mut config = Config::default();
    config.timing.load_max_passes = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "timing.load_max_passes"));
}

#[test]
fn test_validate_poll_longer_than_timeout_warns() {
    let mut config = Config::default();
    config.timing.menu_poll_ms = 10_000;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "timing.menu_poll_ms"));
}

#[test]
fn test_validate_short_cooldown_warns() {
    let mut config = Config::default();
    config.timing.cooldown_ms = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "timing.cooldown_ms"));
}

#[test]
fn test_validate_empty_phrases() {
    let mut config = Config::default();
    config.matching.remove_phrases = vec![];

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "matching.remove_phrases"));
}

#[test]
fn test_validate_single_word_phrase_warns() {
    let mut config = Config::default();
    config.matching.remove_phrases = vec!["remove".to_string()];

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(!result.warnings.is_empty());
}

#[test]
fn test_validate_allow_deny_conflict() {
    let mut config = Config::default();
    config.matching.trigger_deny.push("menu".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.message.contains("menu")));
}

#[test]
fn test_validate_empty_allow_list() {
    let mut config = Config::default();
    config.matching.trigger_allow = vec!["  ".to_string()];

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "matching.trigger_allow"));
}

#[test]
fn test_validate_bad_endpoint() {
    let mut config = Config::default();
    config.browser.endpoint = "localhost:9222".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.endpoint"));
}

#[test]
fn test_validate_empty_selectors() {
    let mut config = Config::default();
    config.selectors.row = String::new();
    config.selectors.menu_triggers = vec![];

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "selectors.row"));
    assert!(result.errors.iter().any(|e| e.path == "selectors.menu_triggers"));
}

#[test]
fn test_validate_zero_port() {
    let mut config = Config::default();
    config.server.port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "server.port"));
}

#[test]
fn test_into_error() {
    let mut config = Config::default();
    config.timing.menu_poll_ms = 0;

    let err = ConfigValidator::validate(&config).into_error().unwrap();
    assert!(err.to_string().contains("timing.menu_poll_ms"));
}

#[test]
fn test_into_error_when_valid() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.into_error().is_none());
}
