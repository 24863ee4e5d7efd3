use crate::config::{Config, SCHEMA_VERSION};
use crate::error::{CcFilterError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, collecting every problem found
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_suppression(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CcFilterError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != SCHEMA_VERSION {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_suppression(config: &Config, errors: &mut Vec<ValidationError>) {
        let suppression = &config.suppression;

        // Summaries are emitted on multiples of step
        if suppression.step == 0 {
            errors.push(ValidationError::new(
                "suppression.step",
                "Step must be greater than 0",
            ));
        }

        let sizes = &suppression.window_sizes;
        if sizes.is_empty() {
            errors.push(ValidationError::new(
                "suppression.window_sizes",
                "At least one window size is required",
            ));
        }

        if sizes.iter().any(|&size| size == 0) {
            errors.push(ValidationError::new(
                "suppression.window_sizes",
                "Window sizes must be greater than 0",
            ));
        }

        if sizes.windows(2).any(|pair| pair[0] >= pair[1]) {
            errors.push(ValidationError::new(
                "suppression.window_sizes",
                format!("Window sizes must be strictly ascending, got {:?}", sizes),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_count(config: &Config) -> usize {
        match ConfigValidator::validate(config) {
            Ok(()) => 0,
            Err(CcFilterError::ConfigValidation { errors }) => errors.len(),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_step() {
        let mut config = Config::default();
        config.suppression.step = 0;
        assert_eq!(error_count(&config), 1);
    }

    #[test]
    fn test_empty_window_sizes() {
        let mut config = Config::default();
        config.suppression.window_sizes.clear();
        assert_eq!(error_count(&config), 1);
    }

    #[test]
    fn test_unordered_window_sizes() {
        let mut config = Config::default();
        config.suppression.window_sizes = vec![2, 1, 3];
        assert_eq!(error_count(&config), 1);

        config.suppression.window_sizes = vec![1, 1];
        assert_eq!(error_count(&config), 1);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config::default();
        config.meta.schema_version = "0.9.0".to_string();
        config.suppression.step = 0;
        config.suppression.window_sizes = vec![0, 2];
        assert_eq!(error_count(&config), 3);
    }

    #[test]
    fn test_zero_threshold_is_allowed() {
        let mut config = Config::default();
        config.suppression.threshold = 0;
        assert!(ConfigValidator::validate(&config).is_ok());
    }
}
