//! Schedule selection: which schedules an extraction should include.
//!
//! The selection is produced before extraction by a collaborator: the
//! interactive prompt in the CLI, a YAML file, or "select all". The
//! extractor only reads it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use roxmltree::Document;
use serde_yaml_ng::Value;

use crate::error::{DocumentError, Result};
use crate::walker::{schedule_name, schedule_number};
use crate::xml::{find_descendants, Tag};

/// A schedule discovered in a document, as offered to a selection source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSummary {
    /// Schedule number with the `"SCHEDULE "` prefix removed.
    pub number: String,

    /// Schedule title.
    pub title: String,
}

/// Discover the schedules of a document, in document order.
///
/// Schedules without a number or a title are not offered for selection.
pub fn discover_schedules(doc: &Document<'_>) -> Vec<ScheduleSummary> {
    find_descendants(doc.root_element(), Tag::Schedule)
        .into_iter()
        .filter_map(|schedule| {
            let number = schedule_number(schedule)?;
            let title = schedule_name(schedule)?;
            Some(ScheduleSummary { number, title })
        })
        .collect()
}

/// Mapping from schedule number to an include decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSelection {
    decisions: BTreeMap<String, bool>,
}

impl ScheduleSelection {
    /// Create an empty selection, which includes no schedules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every discovered schedule.
    #[must_use]
    pub fn select_all(schedules: &[ScheduleSummary]) -> Self {
        schedules
            .iter()
            .map(|s| (s.number.clone(), true))
            .collect()
    }

    /// Record a decision for a schedule, replacing any earlier one.
    pub fn insert(&mut self, number: impl Into<String>, include: bool) {
        self.decisions.insert(number.into(), include);
    }

    /// Whether a schedule should be extracted.
    ///
    /// Schedules absent from the selection are not extracted.
    #[must_use]
    pub fn is_selected(&self, number: &str) -> bool {
        self.decisions.get(number).copied().unwrap_or(false)
    }

    /// Number of recorded decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Whether no decisions were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Iterate over decisions, ordered by schedule number.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.decisions.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Parse a selection from YAML.
    ///
    /// Accepts either a top-level `schedules` mapping or a bare mapping of
    /// schedule number to boolean. Numeric keys are read as text.
    ///
    /// # Examples
    /// ```
    /// use uksi_extractor::selection::ScheduleSelection;
    ///
    /// let selection = ScheduleSelection::from_yaml_str("schedules:\n  1: true\n  2A: false\n").unwrap();
    /// assert!(selection.is_selected("1"));
    /// assert!(!selection.is_selected("2A"));
    /// assert!(!selection.is_selected("3"));
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }

        let value: Value = serde_yaml_ng::from_str(yaml)?;
        let mapping = match value.get("schedules") {
            Some(inner) => inner,
            None => &value,
        };

        let map = match mapping {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(map) => map,
            _ => {
                return Err(DocumentError::InvalidSelection(
                    "expected a mapping of schedule number to true/false".to_string(),
                ))
            }
        };

        let mut selection = Self::new();
        for (key, include) in map {
            let number = match key {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(DocumentError::InvalidSelection(format!(
                        "schedule number must be text or a number, got {other:?}"
                    )))
                }
            };
            let include = include.as_bool().ok_or_else(|| {
                DocumentError::InvalidSelection(format!(
                    "decision for schedule {number} must be true or false"
                ))
            })?;
            selection.insert(number, include);
        }
        Ok(selection)
    }

    /// Load a selection from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}

impl FromIterator<(String, bool)> for ScheduleSelection {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            decisions: iter.into_iter().collect(),
        }
    }
}
