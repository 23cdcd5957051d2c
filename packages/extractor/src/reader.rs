//! Reading legislation XML from disk.
//!
//! Source files are not always valid UTF-8: older documents mix in
//! Windows-1252 punctuation bytes. Decoding is best effort; invalid
//! sequences become U+FFFD, which the text normalizer drops.

use std::fs;
use std::path::Path;

use roxmltree::Document;

use crate::error::Result;

const BOM: char = '\u{FEFF}';

/// Decode raw bytes as UTF-8, replacing invalid sequences.
///
/// A leading byte-order mark is removed.
///
/// # Examples
/// ```
/// use uksi_extractor::reader::decode_bytes;
///
/// assert_eq!(decode_bytes(b"\xEF\xBB\xBF<Legislation/>"), "<Legislation/>");
/// assert_eq!(decode_bytes(b"caf\x93"), "caf\u{FFFD}");
/// ```
pub fn decode_bytes(bytes: &[u8]) -> String {
    let text = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                offset = e.utf8_error().valid_up_to(),
                "Document is not valid UTF-8, replacing invalid bytes"
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    };

    match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Read a document file and decode it to text.
pub fn read_document_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read document");
    Ok(decode_bytes(&bytes))
}

/// Parse document text into a tree.
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    Ok(Document::parse(text)?)
}
