//! APS calculator and pass advisor: bands seven subject percentages into
//! Admission Point Score points and evaluates NSC pass-level criteria.

mod rules;

pub use rules::{evaluate_pass_levels, mark_to_points, percent, PassEvaluation, PassTier, SUBJECT_COUNT};

use serde::{Deserialize, Serialize};

use crate::clipboard::ClipboardSink;
use crate::store::StoreHandle;

const NS: &str = "aps";
const LAST_KEY: &str = "last";

/// Raw subject marks as typed into the form, home language first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectMarks {
    pub home_language: String,
    pub first_additional_language: String,
    pub subject3: String,
    pub subject4: String,
    pub subject5: String,
    pub subject6: String,
    pub subject7: String,
}

impl SubjectMarks {
    pub fn from_raw(raw: [&str; SUBJECT_COUNT]) -> Self {
        Self {
            home_language: raw[0].to_string(),
            first_additional_language: raw[1].to_string(),
            subject3: raw[2].to_string(),
            subject4: raw[3].to_string(),
            subject5: raw[4].to_string(),
            subject6: raw[5].to_string(),
            subject7: raw[6].to_string(),
        }
    }

    /// Coerced integer percentages in subject order.
    pub fn coerced(&self) -> [u8; SUBJECT_COUNT] {
        [
            percent(&self.home_language),
            percent(&self.first_additional_language),
            percent(&self.subject3),
            percent(&self.subject4),
            percent(&self.subject5),
            percent(&self.subject6),
            percent(&self.subject7),
        ]
    }
}

/// Full calculation result persisted for the next visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApsOutcome {
    pub values: SubjectMarks,
    pub marks: [u8; SUBJECT_COUNT],
    pub points: [u8; SUBJECT_COUNT],
    pub total_aps: u8,
    pub pass: PassEvaluation,
}

impl ApsOutcome {
    /// Plain-text summary in the shape the copy button produces.
    pub fn summary_lines(&self) -> Vec<String> {
        let yes_no = |flag: bool| if flag { "Yes" } else { "No" };
        let mut lines = vec![
            format!("APS total: {}", self.total_aps),
            format!("Best eligible pass level: {}", self.pass.tier.label()),
            format!("Meets Bachelor's: {}", yes_no(self.pass.bachelors)),
            format!("Meets Diploma: {}", yes_no(self.pass.diploma)),
            format!("Meets Higher Certificate: {}", yes_no(self.pass.higher_cert)),
        ];
        if !self.pass.advice.is_empty() {
            lines.push("Next steps:".to_string());
            lines.extend(self.pass.advice.iter().map(|item| format!("- {item}")));
        }
        lines
    }
}

/// Calculator service: pure rules plus last-outcome persistence.
pub struct ApsCalculator {
    store: StoreHandle,
}

impl ApsCalculator {
    pub fn attach(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Band the marks, evaluate pass levels, and persist the outcome.
    pub fn calculate(&self, values: SubjectMarks) -> ApsOutcome {
        let marks = values.coerced();
        let mut points = [0u8; SUBJECT_COUNT];
        for (slot, mark) in points.iter_mut().zip(marks.iter()) {
            *slot = mark_to_points(*mark);
        }
        let total_aps = points.iter().map(|p| u16::from(*p)).sum::<u16>() as u8;
        let pass = evaluate_pass_levels(&marks);

        let outcome = ApsOutcome {
            values,
            marks,
            points,
            total_aps,
            pass,
        };
        self.store.set(NS, LAST_KEY, &outcome);
        outcome
    }

    /// The outcome persisted by the previous calculation, if any survives.
    pub fn last(&self) -> Option<ApsOutcome> {
        self.store.get(NS, LAST_KEY, None)
    }

    /// Publish the last summary through the clipboard capability.
    /// Best-effort: a missing outcome or failed sink reports `false`.
    pub fn copy_summary(&self, sink: &dyn ClipboardSink) -> bool {
        match self.last() {
            Some(outcome) => sink.write(&outcome.summary_lines().join("\n")),
            None => false,
        }
    }

    /// Forget the persisted inputs and outcome.
    pub fn clear(&self) {
        self.store.clear_namespace(NS);
    }
}
