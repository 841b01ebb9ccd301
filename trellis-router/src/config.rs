//! Configuration module for the router.
//!
//! This module provides the [`RouterConfig`] struct for tuning router
//! behavior. Route records remain the only routing surface; the config only
//! covers ambient concerns such as the redirect ceiling and placeholders.
//!
//! # Example
//! ```rust,ignore
//! use trellis_router::RouterConfig;
//!
//! let config = RouterConfig::new()
//!     .with_max_redirects(3)
//!     .with_not_found_text("Nothing here");
//! ```

use crate::{RouterError, RouterResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Router configuration.
///
/// All fields have defaults that allow the router to function out of the
/// box. Missing fields in JSON input fall back to those defaults.
///
/// # Fields
///
/// * `max_redirects` - Maximum number of chained redirects (route or
///   middleware) a single navigation may follow. Default: 5.
///
/// * `base_url` - Origin used to parse request paths. Only the pathname and
///   query of the parsed URL are used. Default: `http://localhost`.
///
/// * `not_found_text` - Text rendered into the first outlet when no route
///   matches. Default: `404 - Not Found`.
///
/// * `active_class` - CSS class added to rendered links whose target equals
///   the current path. Default: `active`.
///
/// * `debug_logging` - Log navigation milestones at `info` instead of
///   `debug`. Default: false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Maximum chained redirects per navigation (default: 5)
    pub max_redirects: usize,
    /// Base URL for path parsing (default: http://localhost)
    pub base_url: String,
    /// Not-found placeholder text (default: "404 - Not Found")
    pub not_found_text: String,
    /// Class applied to active links (default: "active")
    pub active_class: String,
    /// Promote navigation logs to info level (default: false)
    pub debug_logging: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_redirects: 5,
            base_url: "http://localhost".to_string(),
            not_found_text: "404 - Not Found".to_string(),
            active_class: "active".to_string(),
            debug_logging: false,
        }
    }
}

impl RouterConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields use defaults.
    ///
    /// # Example
    /// ```rust,ignore
    /// let config = RouterConfig::from_json(r#"{"max_redirects": 2}"#)?;
    /// ```
    pub fn from_json(json: &str) -> RouterResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> RouterResult<()> {
        parse_base_url(&self.base_url)?;
        Ok(())
    }

    /// Set the redirect ceiling.
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Set the base URL used for parsing paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the not-found placeholder text.
    pub fn with_not_found_text(mut self, text: impl Into<String>) -> Self {
        self.not_found_text = text.into();
        self
    }

    /// Set the class applied to active links.
    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    /// Enable or disable verbose navigation logging.
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }
}

/// Parse a base URL, rejecting URLs that cannot resolve relative paths.
pub(crate) fn parse_base_url(base_url: &str) -> RouterResult<Url> {
    let base = Url::parse(base_url).map_err(|e| {
        RouterError::invalid_path(format!("Invalid base_url '{}'", base_url)).with_cause(e.to_string())
    })?;
    if base.cannot_be_a_base() {
        return Err(RouterError::invalid_path(format!(
            "base_url '{}' cannot be used as a base",
            base_url
        )));
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.base_url, "http://localhost");
        assert!(!config.debug_logging);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = RouterConfig::new()
            .with_max_redirects(2)
            .with_not_found_text("missing")
            .with_active_class("is-current")
            .with_debug_logging(true);

        assert_eq!(config.max_redirects, 2);
        assert_eq!(config.not_found_text, "missing");
        assert_eq!(config.active_class, "is-current");
        assert!(config.debug_logging);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = RouterConfig::from_json(r#"{"max_redirects": 9}"#).unwrap();
        assert_eq!(config.max_redirects, 9);
        assert_eq!(config.not_found_text, "404 - Not Found");
    }

    #[test]
    fn test_from_json_rejects_bad_base_url() {
        let err = RouterConfig::from_json(r#"{"base_url": "not a url"}"#).unwrap_err();
        assert_eq!(err.code, crate::RouterErrorCode::InvalidPath);

        let err = RouterConfig::new()
            .with_base_url("mailto:someone@example.com")
            .validate()
            .unwrap_err();
        assert_eq!(err.code, crate::RouterErrorCode::InvalidPath);
    }

    #[test]
    fn test_from_json_rejects_malformed_json() {
        assert!(RouterConfig::from_json("{").is_err());
    }
}
