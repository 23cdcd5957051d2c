//! Reporting of non-fatal skip events.
//!
//! The walker and assembler never log directly; they describe what they
//! skipped to a [`SkipReporter`] chosen by the caller.

use std::fmt;

/// Why a piece of the document contributed no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The document has no `Body` element.
    MissingBody,
    /// A schedule has no `Number` element.
    ScheduleWithoutNumber,
    /// A schedule is absent from the selection or deselected.
    ScheduleNotSelected { number: String },
    /// A selected schedule has no `ScheduleBody`.
    ScheduleWithoutBody { number: String },
    /// A part inside a schedule lacks a number or a title.
    IncompletePart {
        schedule: String,
        number: String,
        title: String,
    },
    /// A selected schedule produced no content records.
    EmptySchedule { number: String },
}

impl SkipReason {
    /// Whether the skip points at malformed input rather than a choice.
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::ScheduleNotSelected { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBody => write!(f, "No Body element found"),
            Self::ScheduleWithoutNumber => write!(f, "Schedule without number"),
            Self::ScheduleNotSelected { number } => {
                write!(f, "Schedule {number} not selected")
            }
            Self::ScheduleWithoutBody { number } => {
                write!(f, "Schedule {number} has no ScheduleBody")
            }
            Self::IncompletePart {
                schedule,
                number,
                title,
            } => write!(
                f,
                "Part in schedule {schedule} without number or title (number='{number}', title='{title}')"
            ),
            Self::EmptySchedule { number } => {
                write!(f, "Schedule {number} has no content")
            }
        }
    }
}

/// Observer for non-fatal skip events.
pub trait SkipReporter {
    /// Called once for every skipped document fragment.
    fn skipped(&mut self, reason: SkipReason);
}

/// Reporter that logs skip events through `tracing`.
///
/// Deselected schedules are logged at debug level, malformed input at warn.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl SkipReporter for TracingReporter {
    fn skipped(&mut self, reason: SkipReason) {
        if reason.is_malformed_input() {
            tracing::warn!(reason = %reason, "Skipping document fragment");
        } else {
            tracing::debug!(reason = %reason, "Skipping document fragment");
        }
    }
}

/// Reporter that keeps every skip event for later inspection.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    events: Vec<SkipReason>,
}

impl CollectingReporter {
    /// Create an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the collected events, in the order they were reported.
    #[must_use]
    pub fn events(&self) -> &[SkipReason] {
        &self.events
    }

    /// Take ownership of the collected events.
    #[must_use]
    pub fn into_events(self) -> Vec<SkipReason> {
        self.events
    }

    /// Events describing malformed input.
    pub fn warnings(&self) -> impl Iterator<Item = &SkipReason> {
        self.events.iter().filter(|e| e.is_malformed_input())
    }
}

impl SkipReporter for CollectingReporter {
    fn skipped(&mut self, reason: SkipReason) {
        self.events.push(reason);
    }
}
