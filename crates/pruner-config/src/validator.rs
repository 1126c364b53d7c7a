//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error as a [`ConfigError`], if any.
    pub fn into_error(self) -> Option<ConfigError> {
        self.errors.into_iter().next().map(|e| ConfigError::InvalidValue {
            field: e.path,
            message: e.message,
        })
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_timing(config, &mut result);
        Self::validate_matching(config, &mut result);
        Self::validate_selectors(config, &mut result);

        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.browser.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }

        if config.browser.host_prefix.is_empty() {
            result.add_warning(ValidationWarning::new(
                "browser.host_prefix",
                "host_prefix is empty, every tab will be considered eligible",
            ));
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        let t = &config.timing;
        let positive = [
            ("timing.load_pass_pause_ms", t.load_pass_pause_ms),
            ("timing.menu_timeout_ms", t.menu_timeout_ms),
            ("timing.menu_poll_ms", t.menu_poll_ms),
            ("timing.detach_timeout_ms", t.detach_timeout_ms),
            ("timing.detach_poll_ms", t.detach_poll_ms),
            ("timing.load_max_passes", u64::from(t.load_max_passes)),
            ("timing.load_stable_passes", u64::from(t.load_stable_passes)),
        ];

        for (path, value) in positive {
            if value == 0 {
                result.add_error(ValidationError::new(path, "must be greater than 0"));
            }
        }

        if t.menu_poll_ms > t.menu_timeout_ms {
            result.add_warning(ValidationWarning::new(
                "timing.menu_poll_ms",
                "poll interval exceeds menu timeout, the menu is checked only once",
            ));
        }

        if t.detach_poll_ms > t.detach_timeout_ms {
            result.add_warning(ValidationWarning::new(
                "timing.detach_poll_ms",
                "poll interval exceeds detach timeout, detachment is checked only once",
            ));
        }

        if t.load_stable_passes > t.load_max_passes {
            result.add_warning(ValidationWarning::new(
                "timing.load_stable_passes",
                "stable pass count exceeds the pass budget and will never be reached",
            ));
        }

        if t.cooldown_ms < 200 {
            result.add_warning(ValidationWarning::new(
                "timing.cooldown_ms",
                "short cooldowns may trip the host page's automation checks",
            ));
        }
    }

    fn validate_matching(config: &Config, result: &mut ValidationResult) {
        let m = &config.matching;

        if m.trigger_allow.iter().all(|t| t.trim().is_empty()) {
            result.add_error(ValidationError::new(
                "matching.trigger_allow",
                "at least one allow token is required",
            ));
        }

        if m.remove_phrases.iter().all(|p| p.trim().is_empty()) {
            result.add_error(ValidationError::new(
                "matching.remove_phrases",
                "at least one remove phrase is required",
            ));
        }

        for phrase in &m.remove_phrases {
            if phrase.split_whitespace().count() == 1 {
                result.add_warning(ValidationWarning::new(
                    "matching.remove_phrases",
                    format!("single-word phrase '{}' may match unrelated menu items", phrase),
                ));
            }
        }

        for token in &m.trigger_allow {
            if m.trigger_deny.contains(token) {
                result.add_error(ValidationError::new(
                    "matching",
                    format!("Token '{}' is both allowed and denied", token),
                ));
            }
        }
    }

    fn validate_selectors(config: &Config, result: &mut ValidationResult) {
        let s = &config.selectors;
        let required = [
            ("selectors.row", &s.row),
            ("selectors.title_link", &s.title_link),
            ("selectors.menu_items", &s.menu_items),
        ];

        for (path, value) in required {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(path, "selector cannot be empty"));
            }
        }

        if s.menu_triggers.iter().all(|t| t.trim().is_empty()) {
            result.add_error(ValidationError::new(
                "selectors.menu_triggers",
                "at least one menu trigger selector is required",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
