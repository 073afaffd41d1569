//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.enhancer.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "enhancer.endpoint must not be empty".into(),
            ));
        }
        if self.enhancer.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "enhancer.timeout_ms must be > 0".into(),
            ));
        }
        if self.enhancer.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "enhancer.max_tokens must be > 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.enhancer.temperature) {
            return Err(ConfigError::ValidationError(
                "enhancer.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(
                "logging.format must be \"pretty\" or \"json\"".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let mut config = Config::default();
        config.enhancer.endpoint = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn test_validate_rejects_zero_max_tokens() {
        let mut config = Config::default();
        config.enhancer.max_tokens = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn test_validate_rejects_invalid_temperature() {
        let mut config = Config::default();
        config.enhancer.temperature = 2.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("temperature"));

        config.enhancer.temperature = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }
}
