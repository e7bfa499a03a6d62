//! Declarator configuration
//!
//! Defaults can be overridden from the environment:
//!
//! - `RELAXQL_INVERSE_DEFAULT`: whether requests that do not say otherwise
//!   also register the inverse relation (`true`/`false`, `1`/`0`, `yes`/`no`)
//! - `RELAXQL_TRACE_PREFIX`: prefix of the auto-defined trace line

use std::env;

use thiserror::Error;

/// Prefix of the trace line emitted for auto-defined inverses
pub const DEFAULT_TRACE_PREFIX: &str = "[relaxql]";

pub const ENV_INVERSE_DEFAULT: &str = "RELAXQL_INVERSE_DEFAULT";
pub const ENV_TRACE_PREFIX: &str = "RELAXQL_TRACE_PREFIX";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Parsing error: {message}")]
    ParsingError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a parsing error
    pub fn parsing_error(message: impl Into<String>) -> Self {
        Self::ParsingError {
            message: message.into(),
        }
    }
}

/// Settings shared by every declaration a [`Declarator`](crate::Declarator) makes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaratorConfig {
    /// Register the inverse relation when a request leaves `inverse` unset
    pub inverse_by_default: bool,
    /// Prefix of the auto-defined trace line
    pub trace_prefix: String,
}

impl Default for DeclaratorConfig {
    fn default() -> Self {
        Self {
            inverse_by_default: true,
            trace_prefix: DEFAULT_TRACE_PREFIX.to_string(),
        }
    }
}

impl DeclaratorConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_INVERSE_DEFAULT) {
            config.inverse_by_default = parse_bool(ENV_INVERSE_DEFAULT, &value)?;
        }

        if let Some(prefix) = lookup(ENV_TRACE_PREFIX) {
            config.trace_prefix = prefix;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set whether the inverse is registered by default
    pub fn with_inverse_by_default(mut self, inverse: bool) -> Self {
        self.inverse_by_default = inverse;
        self
    }

    /// Set the trace line prefix
    pub fn with_trace_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.trace_prefix = prefix.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trace_prefix.contains('\n') {
            return Err(ConfigError::invalid_value(
                "trace_prefix",
                self.trace_prefix.clone(),
                "a single line",
            ));
        }
        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_value(field, value, "true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DeclaratorConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.inverse_by_default);
        assert_eq!(config.trace_prefix, "[relaxql]");
    }

    #[test]
    fn test_overrides() {
        let config = DeclaratorConfig::from_lookup(lookup(&[
            (ENV_INVERSE_DEFAULT, "no"),
            (ENV_TRACE_PREFIX, "[orm]"),
        ]))
        .unwrap();

        assert!(!config.inverse_by_default);
        assert_eq!(config.trace_prefix, "[orm]");
    }

    #[test]
    fn test_invalid_bool() {
        let err = DeclaratorConfig::from_lookup(lookup(&[(ENV_INVERSE_DEFAULT, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == ENV_INVERSE_DEFAULT));
    }

    #[test]
    fn test_multiline_prefix_rejected() {
        let config = DeclaratorConfig::new().with_trace_prefix("a\nb");
        assert!(config.validate().is_err());
    }
}
