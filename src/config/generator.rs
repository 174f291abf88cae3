//! Token generator configuration.

use config::ConfigError;
use serde::Deserialize;

/// Length used when a request names none, or names an unusable one.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Upper bound on requested lengths.
pub const MAX_TOKEN_LENGTH: usize = 65_536;

/// Token generation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Length applied when the path carries no usable length.
    #[serde(default = "default_length")]
    pub default_length: usize,

    /// Requested lengths above this are clamped to it.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

const fn default_length() -> usize {
    DEFAULT_TOKEN_LENGTH
}

const fn default_max_length() -> usize {
    MAX_TOKEN_LENGTH
}

impl GeneratorConfig {
    /// Validate the generator configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default length is zero or exceeds the maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_length == 0 {
            return Err(ConfigError::Message(
                "generator.default_length cannot be 0".to_string(),
            ));
        }
        if self.default_length > self.max_length {
            return Err(ConfigError::Message(format!(
                "generator.default_length ({}) exceeds generator.max_length ({})",
                self.default_length, self.max_length
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_length: DEFAULT_TOKEN_LENGTH,
            max_length: MAX_TOKEN_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_default_length_rejected() {
        let config = GeneratorConfig {
            default_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_above_max_rejected() {
        let config = GeneratorConfig {
            default_length: 64,
            max_length: 16,
        };
        assert!(config.validate().is_err());
    }
}
