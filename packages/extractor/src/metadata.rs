//! Document-level metadata extraction.
//!
//! legislation.gov.uk documents carry their identity in the `ukm:Metadata`
//! block:
//! - `ukm:SecondaryMetadata` with `ukm:Year` and `ukm:Number` (mandatory)
//! - Dublin Core title, dates, type, description and identifier
//! - `dct:spatial` extent labels

use roxmltree::{Document, Node};

use crate::error::MetadataError;
use crate::text::normalize;
use crate::types::{LegislationMetadata, VersionInfo};
use crate::xml::{find_child, find_descendants, find_first, find_text, Tag};

/// Extract metadata from a legislation document.
///
/// # Errors
/// Returns `MetadataError` when the `SecondaryMetadata` section is missing,
/// or when `Year`/`Number` are missing or not positive integers. Optional
/// descriptive fields never cause a failure.
pub fn extract_metadata(doc: &Document<'_>) -> Result<LegislationMetadata, MetadataError> {
    let root = doc.root_element();

    let secondary = find_first(root, Tag::SecondaryMetadata)
        .ok_or(MetadataError::MissingSecondaryMetadata)?;

    let year = read_value(secondary, Tag::Year, "Year")?;
    let number = read_value(secondary, Tag::Number, "Number")?;

    Ok(LegislationMetadata {
        title: normalize(&find_text(root, Tag::DcTitle)),
        year,
        number,
        created: find_optional(root, Tag::Created),
        valid: find_optional(root, Tag::Valid),
        document_type: find_optional(root, Tag::DocumentType),
        description: find_optional(root, Tag::Description),
        identifier: find_optional(root, Tag::Identifier),
        extent: find_extent(root),
    })
}

/// Extract the version chain of a document.
///
/// A document is current when it has no `isReplacedBy` node.
pub fn extract_version_info(doc: &Document<'_>) -> VersionInfo {
    let root = doc.root_element();
    VersionInfo {
        version_date: find_optional(root, Tag::Valid),
        previous_version: find_optional(root, Tag::Replaces),
        next_version: find_optional(root, Tag::IsReplacedBy),
        is_current: find_first(root, Tag::IsReplacedBy).is_none(),
    }
}

/// Read the `Value` attribute of a mandatory direct child as a positive integer.
fn read_value(
    secondary: Node<'_, '_>,
    tag: Tag,
    field: &'static str,
) -> Result<u32, MetadataError> {
    let value = find_child(secondary, tag)
        .and_then(|node| node.attribute("Value"))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(MetadataError::MissingField { field })?;

    match value.parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(MetadataError::InvalidField {
            field,
            value: value.to_string(),
        }),
    }
}

/// Find optional descriptive text; absent or empty yields `None`.
fn find_optional(root: Node<'_, '_>, tag: Tag) -> Option<String> {
    Some(find_text(root, tag)).filter(|text| !text.is_empty())
}

/// Collect extent labels from every spatial node, duplicates retained.
fn find_extent(root: Node<'_, '_>) -> Vec<String> {
    find_descendants(root, Tag::Spatial)
        .into_iter()
        .map(|spatial| find_text(spatial, Tag::Label))
        .filter(|label| !label.is_empty())
        .collect()
}
