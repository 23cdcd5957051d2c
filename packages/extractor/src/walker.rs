//! Flattening of schedules into uniform content records.
//!
//! A schedule body comes in two shapes:
//! - **Parts mode**: the `ScheduleBody` has `Part` children, each holding
//!   `P1group`/`P1` provisions. Links carry the part number.
//! - **Flat mode**: the provisions sit directly under the `ScheduleBody`.
//!
//! Provisions without a number get a synthesized label counting the
//! records produced so far in the schedule, across parts.

use roxmltree::Node;

use crate::config::SCHEDULE_PREFIX;
use crate::report::{SkipReason, SkipReporter};
use crate::selection::ScheduleSelection;
use crate::text::normalize;
use crate::types::PartInfo;
use crate::uri::LegislationUri;
use crate::xml::{
    find_children, find_descendants, find_first, find_path, full_text, get_text, tag_of, Tag,
};

/// One provision extracted from a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleContent {
    /// Source provision number, or a synthesized one.
    pub article_label: String,

    /// Provision group title; empty for bare provisions.
    pub title: String,

    /// Normalized paragraph texts.
    pub paragraphs: Vec<String>,

    /// The part containing the provision, in parts mode.
    pub part: Option<PartInfo>,

    /// Canonical link to the schedule or schedule part.
    pub link: String,
}

/// A schedule that produced at least one content record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleResult {
    /// Schedule number with the `"SCHEDULE "` prefix removed.
    pub number: String,

    /// Schedule name; empty when the schedule has no title.
    pub name: String,

    /// Content records in document order.
    pub content: Vec<ScheduleContent>,
}

/// Result of walking one schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    Extracted(ScheduleResult),
    Skipped(SkipReason),
}

/// Walk one schedule and flatten its provisions.
///
/// Incomplete parts are reported to `reporter` and skipped individually;
/// reasons that drop the whole schedule are returned as
/// [`WalkOutcome::Skipped`] for the caller to report.
pub fn walk_schedule(
    schedule: Node<'_, '_>,
    selection: &ScheduleSelection,
    uri: &LegislationUri,
    reporter: &mut dyn SkipReporter,
) -> WalkOutcome {
    let Some(number) = schedule_number(schedule) else {
        return WalkOutcome::Skipped(SkipReason::ScheduleWithoutNumber);
    };

    if !selection.is_selected(&number) {
        return WalkOutcome::Skipped(SkipReason::ScheduleNotSelected { number });
    }

    let name = schedule_name(schedule).unwrap_or_default();

    let Some(body) = find_first(schedule, Tag::ScheduleBody) else {
        return WalkOutcome::Skipped(SkipReason::ScheduleWithoutBody { number });
    };

    let mut content = Vec::new();
    let mut parts = find_children(body, Tag::Part).peekable();

    if parts.peek().is_some() {
        for part in parts {
            let part_number = element_text(find_first(part, Tag::Number));
            let part_title = title_text(find_first(part, Tag::Title));

            if part_number.is_empty() || part_title.is_empty() {
                reporter.skipped(SkipReason::IncompletePart {
                    schedule: number.clone(),
                    number: part_number,
                    title: part_title,
                });
                continue;
            }

            let link = uri.schedule(&number, Some(part_number.as_str()));
            let info = PartInfo {
                number: part_number,
                title: part_title,
            };
            collect_units(part, &mut content, Some(&info), &link);
        }
    } else {
        let link = uri.schedule(&number, None);
        collect_units(body, &mut content, None, &link);
    }

    if content.is_empty() {
        return WalkOutcome::Skipped(SkipReason::EmptySchedule { number });
    }

    tracing::debug!(
        schedule = %number,
        records = content.len(),
        "Walked schedule"
    );

    WalkOutcome::Extracted(ScheduleResult {
        number,
        name,
        content,
    })
}

/// Collect the direct `P1group`/`P1` children of a container.
fn collect_units(
    container: Node<'_, '_>,
    content: &mut Vec<ScheduleContent>,
    part: Option<&PartInfo>,
    link: &str,
) {
    for unit in container.children() {
        let (label, title) = match tag_of(unit) {
            Some(Tag::P1group) => (
                element_text(find_path(unit, &[Tag::P1, Tag::Pnumber])),
                title_text(find_first(unit, Tag::Title)),
            ),
            Some(Tag::P1) => (element_text(find_first(unit, Tag::Pnumber)), String::new()),
            _ => continue,
        };

        let article_label = if label.is_empty() {
            (content.len() + 1).to_string()
        } else {
            label
        };

        content.push(ScheduleContent {
            article_label,
            title,
            paragraphs: extract_paragraphs(unit),
            part: part.cloned(),
            link: link.to_string(),
        });
    }
}

/// Schedule number with the `"SCHEDULE "` prefix stripped.
///
/// Returns `None` when the schedule has no `Number` element.
pub(crate) fn schedule_number(schedule: Node<'_, '_>) -> Option<String> {
    let number = element_text(Some(find_first(schedule, Tag::Number)?));
    Some(match number.strip_prefix(SCHEDULE_PREFIX) {
        Some(rest) => rest.to_string(),
        None => number,
    })
}

/// Schedule title, or `None` when the schedule has no `Title` element.
pub(crate) fn schedule_name(schedule: Node<'_, '_>) -> Option<String> {
    find_first(schedule, Tag::Title).map(|title| title_text(Some(title)))
}

/// Normalized paragraph texts of every `Text` descendant, empties dropped.
pub(crate) fn extract_paragraphs(node: Node<'_, '_>) -> Vec<String> {
    find_descendants(node, Tag::Text)
        .into_iter()
        .map(|text| normalize(&full_text(text)))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Normalized text of a number or label element.
///
/// Uses all text inside the element when inline markup adds to the leading
/// text, as in `SCHEDULE <Substitution>1</Substitution>`.
pub(crate) fn element_text(node: Option<Node<'_, '_>>) -> String {
    let Some(node) = node else {
        return String::new();
    };
    let direct = normalize(&get_text(node));
    let full = normalize(&full_text(node));
    if full.len() > direct.len() {
        full
    } else {
        direct
    }
}

/// Normalized text of a title element, inline markup included.
pub(crate) fn title_text(node: Option<Node<'_, '_>>) -> String {
    node.map(|title| normalize(&full_text(title)))
        .unwrap_or_default()
}
