//! Core data types for the extractor.
//!
//! These types represent UK statutory instruments as flattened provision
//! records, ready for tabular export or similarity comparison.

use serde::{Deserialize, Serialize};

/// Document-level identity of an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegislationMetadata {
    /// Instrument title (`dc:title`), normalized.
    pub title: String,

    /// Year of the instrument (`ukm:Year`).
    pub year: u32,

    /// Instrument number within the year (`ukm:Number`).
    pub number: u32,

    /// Creation date (`dct:created`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Validity date of this version (`dct:valid`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<String>,

    /// Document type (`dct:type`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    /// Description (`dct:description`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Identifier (`dct:identifier`), usually the canonical id URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Jurisdiction labels (`dct:spatial`), in document order.
    pub extent: Vec<String>,
}

impl LegislationMetadata {
    /// Create metadata with only the mandatory fields set.
    #[must_use]
    pub fn new(title: impl Into<String>, year: u32, number: u32) -> Self {
        Self {
            title: title.into(),
            year,
            number,
            created: None,
            valid: None,
            document_type: None,
            description: None,
            identifier: None,
            extent: Vec::new(),
        }
    }

    /// Unique identifier of the instrument, `{year}_{number}`.
    ///
    /// # Examples
    /// ```
    /// use uksi_extractor::types::LegislationMetadata;
    ///
    /// let metadata = LegislationMetadata::new("The Example Order 2017", 2017, 766);
    /// assert_eq!(metadata.uid(), "2017_766");
    /// ```
    #[must_use]
    pub fn uid(&self) -> String {
        format!("{}_{}", self.year, self.number)
    }
}

/// Version chain of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Date of this version (`dct:valid`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_date: Option<String>,

    /// Version this one replaces (`dct:replaces`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<String>,

    /// Version replacing this one (`dct:isReplacedBy`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_version: Option<String>,

    /// Whether no later version exists.
    pub is_current: bool,
}

/// A subdivision inside a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartInfo {
    /// Part number as written in the source (e.g. "PART 2").
    pub number: String,

    /// Part title.
    pub title: String,
}

/// One flattened provision: a body article or a schedule section.
///
/// Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRecord {
    /// Title of the instrument.
    pub order_title: String,

    /// Year of the instrument.
    pub year: u32,

    /// Number of the instrument.
    pub number: u32,

    /// Title of the provision group; empty for bare provisions.
    pub title: String,

    /// Provision number (e.g. "3", "1A").
    pub article_label: String,

    /// Normalized paragraph texts, in document order.
    pub paragraphs: Vec<String>,

    /// Schedule number, for schedule content.
    pub schedule_number: Option<String>,

    /// Schedule name, for schedule content.
    pub schedule_name: Option<String>,

    /// Part number, for schedule content inside a part.
    pub part_number: Option<String>,

    /// Part title, for schedule content inside a part.
    pub part_title: Option<String>,

    /// Canonical link to the provision.
    pub link: String,
}

impl ProvisionRecord {
    /// Identifier of the provision within its instrument,
    /// `{year}_{number}_{article_label}`.
    ///
    /// Schedule sections reuse labels across schedules, so the id is only
    /// unique among body articles.
    #[must_use]
    pub fn uid(&self) -> String {
        format!("{}_{}_{}", self.year, self.number, self.article_label)
    }

    /// Whether this record comes from a schedule rather than the body.
    #[must_use]
    pub fn is_schedule_content(&self) -> bool {
        self.schedule_number.is_some()
    }
}
