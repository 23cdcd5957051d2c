//! UKSI Extractor - Flatten UK statutory instrument XML into provision records.
//!
//! This crate reads legislation.gov.uk CLML documents, recovers their
//! metadata, and walks the body and the selected schedules into a flat,
//! ordered list of [`ProvisionRecord`]s with normalized text and canonical
//! links.
//!
//! # Example
//!
//! ```
//! use uksi_extractor::{extract, parse_document, ScheduleSelection};
//!
//! let xml = r#"<Legislation xmlns="http://www.legislation.gov.uk/namespaces/legislation"
//!     xmlns:ukm="http://www.legislation.gov.uk/namespaces/metadata">
//!   <ukm:Metadata>
//!     <ukm:SecondaryMetadata><ukm:Year Value="2017"/><ukm:Number Value="766"/></ukm:SecondaryMetadata>
//!   </ukm:Metadata>
//!   <Body>
//!     <P1group><Title>Citation</Title><P1><Pnumber>3</Pnumber></P1></P1group>
//!   </Body>
//! </Legislation>"#;
//!
//! let doc = parse_document(xml).unwrap();
//! let records = extract(&doc, &ScheduleSelection::new()).unwrap();
//! assert_eq!(records[0].link, "https://www.legislation.gov.uk/uksi/2017/766/article/3/made");
//! ```
//!
//! # Architecture
//!
//! - [`text`]: Text normalization to the canonical character set
//! - [`xml`]: Namespace-tolerant tree queries
//! - [`metadata`]: Document identity and version information
//! - [`uri`]: Canonical link construction
//! - [`walker`]: Schedule flattening, with and without parts
//! - [`assembler`]: Top-level extraction
//! - [`report`]: Skip events for non-fatal problems
//! - [`selection`]: Schedule discovery and selection
//! - [`reader`]: Best-effort decoding and parsing
//! - [`export`]: YAML, JSON and CSV output
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod assembler;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod metadata;
pub mod reader;
pub mod report;
pub mod selection;
pub mod text;
pub mod types;
pub mod uri;
pub mod walker;
pub mod xml;

// Re-export main functions
pub use assembler::{extract, extract_document, extract_with, Extraction};
pub use reader::{decode_bytes, parse_document, read_document_source};

// Re-export commonly used items
pub use config::ExtractorConfig;
pub use error::{DocumentError, MetadataError, Result};
pub use report::{CollectingReporter, SkipReason, SkipReporter, TracingReporter};
pub use selection::{discover_schedules, ScheduleSelection, ScheduleSummary};
pub use text::normalize;
pub use types::{LegislationMetadata, PartInfo, ProvisionRecord, VersionInfo};
