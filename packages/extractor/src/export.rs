//! YAML, JSON and CSV export of extractions.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::assembler::Extraction;
use crate::config::DEFAULT_OUTPUT_DIR;
use crate::error::Result;
use crate::types::{LegislationMetadata, ProvisionRecord, VersionInfo};

/// Output format of an exported extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Yaml,
    Json,
    /// One row per provision, without document-level metadata.
    Csv,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Render an extraction in this format.
    pub fn render(self, extraction: &Extraction) -> Result<String> {
        match self {
            Self::Yaml => generate_yaml(extraction),
            Self::Json => generate_json(extraction),
            Self::Csv => generate_csv(extraction),
        }
    }
}

/// Serialized shape of an extraction.
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    uid: String,
    metadata: &'a LegislationMetadata,
    version: &'a VersionInfo,
    provisions: &'a [ProvisionRecord],
}

impl<'a> From<&'a Extraction> for ExportDocument<'a> {
    fn from(extraction: &'a Extraction) -> Self {
        Self {
            uid: extraction.uid(),
            metadata: &extraction.metadata,
            version: &extraction.version,
            provisions: &extraction.records,
        }
    }
}

/// Generate a YAML document from an extraction.
pub fn generate_yaml(extraction: &Extraction) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(&ExportDocument::from(extraction))?;

    // Add document start marker and clean up trailing whitespace
    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Generate a pretty-printed JSON document from an extraction.
pub fn generate_json(extraction: &Extraction) -> Result<String> {
    let json = serde_json::to_string_pretty(&ExportDocument::from(extraction))?;
    Ok(format!("{json}\n"))
}

/// CSV header row, in record field order.
const CSV_HEADER: [&str; 11] = [
    "order_title",
    "year",
    "number",
    "title",
    "article_label",
    "paragraphs",
    "schedule_number",
    "schedule_name",
    "part_number",
    "part_title",
    "link",
];

/// Generate a CSV table from an extraction, one row per provision.
///
/// Paragraphs share a single cell, separated by newlines. Absent schedule
/// and part fields are empty cells.
pub fn generate_csv(extraction: &Extraction) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in &extraction.records {
        let year = record.year.to_string();
        let number = record.number.to_string();
        let paragraphs = record.paragraphs.join("\n");
        writer.write_record([
            record.order_title.as_str(),
            year.as_str(),
            number.as_str(),
            record.title.as_str(),
            record.article_label.as_str(),
            paragraphs.as_str(),
            record.schedule_number.as_deref().unwrap_or_default(),
            record.schedule_name.as_deref().unwrap_or_default(),
            record.part_number.as_deref().unwrap_or_default(),
            record.part_title.as_deref().unwrap_or_default(),
            record.link.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Timestamp used in default output file names.
#[must_use]
pub fn file_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Save an extraction as `{uid}_{timestamp}.{ext}`.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
///
/// # Arguments
/// * `extraction` - The extraction to save
/// * `format` - Output format
/// * `output_dir` - Target directory (default: `extracted/`), created if missing
/// * `timestamp` - Timestamp component of the file name
///
/// # Returns
/// Path to the saved file
pub fn save_extraction(
    extraction: &Extraction,
    format: ExportFormat,
    output_dir: Option<&Path>,
    timestamp: &str,
) -> Result<PathBuf> {
    let output_dir = output_dir.unwrap_or(Path::new(DEFAULT_OUTPUT_DIR));
    fs::create_dir_all(output_dir)?;

    let file_name = format!("{}_{timestamp}.{}", extraction.uid(), format.extension());
    let output_file = output_dir.join(&file_name);
    let temp_file = output_dir.join(format!(".{file_name}.tmp"));

    let content = format.render(extraction)?;

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;

    tracing::info!(path = %output_file.display(), "Saved extraction");
    Ok(output_file)
}
