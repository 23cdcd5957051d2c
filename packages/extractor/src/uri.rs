//! Canonical legislation.gov.uk links for documents and their provisions.
//!
//! # Supported Formats
//!
//! 1. **Document**: `{base}/uksi/{year}/{number}/made`
//! 2. **Article**: `{base}/uksi/{year}/{number}/article/{label}/made`
//! 3. **Schedule**: `{base}/uksi/{year}/{number}/schedule/{schedule}/made`
//! 4. **Schedule part**: `{base}/uksi/{year}/{number}/schedule/{schedule}/part/{part}/made`
//!
//! # Examples
//!
//! ```
//! use uksi_extractor::uri::LegislationUri;
//!
//! let uri = LegislationUri::new("https://www.legislation.gov.uk", 2017, 766);
//! assert_eq!(uri.document(), "https://www.legislation.gov.uk/uksi/2017/766/made");
//! assert_eq!(uri.article("3"), "https://www.legislation.gov.uk/uksi/2017/766/article/3/made");
//! assert_eq!(
//!     uri.schedule("1", Some("PART 2")),
//!     "https://www.legislation.gov.uk/uksi/2017/766/schedule/1/part/2/made"
//! );
//! ```

use crate::config::{ExtractorConfig, DOCUMENT_KIND, PART_PREFIX};
use crate::types::LegislationMetadata;

/// Suffix marking the as-made version of a resource.
const MADE: &str = "made";

/// Link builder anchored on one instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegislationUri {
    /// `{base}/uksi/{year}/{number}`, without the version suffix.
    base: String,
}

impl LegislationUri {
    /// Create a builder for an instrument under the given authority.
    #[must_use]
    pub fn new(authority: &str, year: u32, number: u32) -> Self {
        let authority = authority.trim_end_matches('/');
        Self {
            base: format!("{authority}/{DOCUMENT_KIND}/{year}/{number}"),
        }
    }

    /// Create a builder for an instrument from its metadata.
    #[must_use]
    pub fn for_metadata(config: &ExtractorConfig, metadata: &LegislationMetadata) -> Self {
        Self::new(&config.base_url, metadata.year, metadata.number)
    }

    /// Base URI without the version suffix.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Link to the whole instrument.
    #[must_use]
    pub fn document(&self) -> String {
        format!("{}/{MADE}", self.base)
    }

    /// Link to a body article.
    #[must_use]
    pub fn article(&self, label: &str) -> String {
        format!("{}/article/{label}/{MADE}", self.base)
    }

    /// Link to a schedule, optionally narrowed to one of its parts.
    ///
    /// A leading literal `"PART "` is stripped from the part number.
    #[must_use]
    pub fn schedule(&self, schedule_number: &str, part_number: Option<&str>) -> String {
        match part_number {
            Some(part) => {
                let part = part.strip_prefix(PART_PREFIX).unwrap_or(part);
                format!(
                    "{}/schedule/{schedule_number}/part/{part}/{MADE}",
                    self.base
                )
            }
            None => format!("{}/schedule/{schedule_number}/{MADE}", self.base),
        }
    }
}
