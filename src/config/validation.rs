use crate::config::types::{Config, FetcherConfig, SourceEntry, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_sources(&config.sources)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.adapter_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "adapter_timeout_secs must be >= 1".to_string(),
        ));
    }

    // A source cut off mid-retry never gets its remaining attempts
    let budget = config.retry_budget();
    if config.adapter_timeout() < budget {
        return Err(ConfigError::Validation(format!(
            "adapter_timeout_secs ({}) must cover {} attempts of {}s plus backoff ({:?})",
            config.adapter_timeout_secs,
            config.max_attempts,
            config.request_timeout_secs,
            budget
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user agent name cannot be empty".to_string(),
        ));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates source entries
fn validate_sources(sources: &[SourceEntry]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();

    for source in sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name cannot be empty".to_string(),
            ));
        }

        if !names.insert(source.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name '{}'",
                source.name
            )));
        }

        validate_http_url(&source.name, "url", &source.url)?;
        validate_http_url(&source.name, "base-url", source.effective_base_url())?;

        for selector in [
            &source.container,
            &source.title,
            &source.image,
            &source.link,
        ] {
            validate_selector(&source.name, selector)?;
        }

        if source.image_attributes.is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' must list at least one image attribute",
                source.name
            )));
        }
    }

    Ok(())
}

fn validate_http_url(source: &str, field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| {
        ConfigError::InvalidUrl(format!("source '{}' {} '{}': {}", source, field, value, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "source '{}' {} '{}' must use http or https",
            source, field, value
        )));
    }

    Ok(())
}

fn validate_selector(source: &str, selector: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(format!(
            "source '{}' has an empty selector",
            source
        )));
    }

    Selector::parse(selector).map_err(|e| {
        ConfigError::InvalidSelector(format!("source '{}' '{}': {:?}", source, selector, e))
    })?;

    Ok(())
}
