use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Service base URL is an http(s) URL
/// - Request timeout is not 0
/// - Redirect delay is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.service.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "service.base_url cannot be empty".to_string(),
        ));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "service.base_url must start with http:// or https://, got {}",
            base_url
        )));
    }

    if config.service.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "service.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.feedback.redirect_delay_ms == 0 {
        return Err(ConfigError::ValidationError(
            "feedback.redirect_delay_ms cannot be 0".to_string(),
        ));
    }

    Ok(())
}
