//! Configuration validation.

use crate::schema::Config;

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

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

        Self::validate_registry(config, &mut result);
        Self::validate_menu(config, &mut result);
        Self::validate_snapshot(config, &mut result);
        Self::validate_overlay(config, &mut result);

        result
    }

    fn validate_registry(config: &Config, result: &mut ValidationResult) {
        let registry = &config.registry;

        if registry.ttl_ms <= 0 {
            result.add_error(ValidationError::new(
                "registry.ttl_ms",
                "ttl_ms must be greater than 0",
            ));
        } else if registry.ttl_ms > 60_000 {
            result.add_warning(ValidationWarning::new(
                "registry.ttl_ms",
                "ttl_ms is above one minute, stale targets may be inspected after the page changed",
            ));
        }

        for (path, value) in [
            ("registry.max_selector_len", registry.max_selector_len),
            ("registry.max_xpath_len", registry.max_xpath_len),
            ("registry.max_tag_len", registry.max_tag_len),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(path, "length cap must be greater than 0"));
            }
        }

        if registry.storage_prefix.is_empty() {
            result.add_error(ValidationError::new(
                "registry.storage_prefix",
                "Storage prefix cannot be empty",
            ));
        }
    }

    fn validate_menu(config: &Config, result: &mut ValidationResult) {
        if config.menu.id.trim().is_empty() {
            result.add_error(ValidationError::new("menu.id", "Menu id cannot be empty"));
        }
        if config.menu.title.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "menu.title",
                "Menu title is empty, the entry will be hard to find",
            ));
        }
    }

    fn validate_snapshot(config: &Config, result: &mut ValidationResult) {
        if config.snapshot.max_text_len == 0 {
            result.add_error(ValidationError::new(
                "snapshot.max_text_len",
                "max_text_len must be greater than 0",
            ));
        }
        if config.snapshot.max_ancestor_steps > 20 {
            result.add_warning(ValidationWarning::new(
                "snapshot.max_ancestor_steps",
                "max_ancestor_steps is very high (>20), distant ancestors rarely describe the target",
            ));
        }
    }

    fn validate_overlay(config: &Config, result: &mut ValidationResult) {
        let overlay = &config.overlay;
        if overlay.width <= 0.0 {
            result.add_error(ValidationError::new("overlay.width", "width must be positive"));
        }
        if overlay.margin < 0.0 {
            result.add_error(ValidationError::new("overlay.margin", "margin cannot be negative"));
        }
        if overlay.copy_status_ms < 0 {
            result.add_error(ValidationError::new(
                "overlay.copy_status_ms",
                "copy_status_ms cannot be negative",
            ));
        }
    }
}
