//! Configuration constants and validation functions for the extractor.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DocumentError, Result};

/// Base authority for canonical legislation links.
pub const LEGISLATION_BASE_URL: &str = "https://www.legislation.gov.uk";

/// Document kind segment for UK statutory instruments.
pub const DOCUMENT_KIND: &str = "uksi";

/// Literal prefix carried by schedule numbers in the source ("SCHEDULE 1").
pub const SCHEDULE_PREFIX: &str = "SCHEDULE ";

/// Literal prefix carried by part numbers in the source ("PART 2").
pub const PART_PREFIX: &str = "PART ";

/// Default directory for exported extractions.
pub const DEFAULT_OUTPUT_DIR: &str = "extracted";

/// Base URL pattern: http(s) scheme followed by a host.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BASE_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[A-Za-z0-9.-]+(:\d+)?(/[^\s]*)?$").expect("valid regex"));

/// Validate and normalize a base URL for canonical links.
///
/// Trailing slashes are removed so that path segments can be appended
/// without doubling the separator.
///
/// # Examples
/// ```
/// use uksi_extractor::config::validate_base_url;
///
/// assert_eq!(
///     validate_base_url("https://www.legislation.gov.uk/").unwrap(),
///     "https://www.legislation.gov.uk"
/// );
/// assert!(validate_base_url("ftp://example.com").is_err());
/// ```
pub fn validate_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if BASE_URL_PATTERN.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(DocumentError::InvalidBaseUrl(url.to_string()))
    }
}

/// Settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Authority that canonical links are built on, without trailing slash.
    pub base_url: String,
}

impl ExtractorConfig {
    /// Create a configuration with a custom link authority.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: validate_base_url(base_url)?,
        })
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: LEGISLATION_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_valid() {
        assert_eq!(
            validate_base_url("https://www.legislation.gov.uk").unwrap(),
            "https://www.legislation.gov.uk"
        );
        assert_eq!(
            validate_base_url("http://localhost:8080/mirror/").unwrap(),
            "http://localhost:8080/mirror"
        );
    }

    #[test]
    fn test_validate_base_url_invalid() {
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("www.legislation.gov.uk").is_err());
        assert!(validate_base_url("ftp://legislation.gov.uk").is_err());
        assert!(validate_base_url("https://has space.uk").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.base_url, LEGISLATION_BASE_URL);
    }

    #[test]
    fn test_config_with_base_url() {
        let config = ExtractorConfig::with_base_url("https://example.org/").unwrap();
        assert_eq!(config.base_url, "https://example.org");
        assert!(ExtractorConfig::with_base_url("nonsense").is_err());
    }
}
