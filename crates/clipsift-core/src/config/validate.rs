//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must not be empty".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.embedding.image_size == 0 {
            return Err(ConfigError::ValidationError(
                "embedding.image_size must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.scoring.threshold) {
            return Err(ConfigError::ValidationError(
                "scoring.threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if self.scoring.distractors.is_empty() {
            return Err(ConfigError::ValidationError(
                "scoring.distractors must not be empty".into(),
            ));
        }
        if self.scoring.distractors.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "scoring.distractors must not contain blank phrases".into(),
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
    fn test_validate_rejects_empty_formats() {
        let mut config = Config::default();
        config.processing.supported_formats.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("supported_formats"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.scoring.threshold = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("threshold"));

        config.scoring.threshold = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn test_validate_rejects_empty_distractors() {
        let mut config = Config::default();
        config.scoring.distractors.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("distractors"));
    }

    #[test]
    fn test_validate_rejects_blank_distractor() {
        let mut config = Config::default();
        config.scoring.distractors[2] = "   ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.limits.max_file_size_mb = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_file_size_mb"));
    }
}
