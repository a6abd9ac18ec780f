use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Answer;

pub const STANDARD_INCOME_THRESHOLD: u64 = 350_000;
pub const DISABILITY_INCOME_THRESHOLD: u64 = 600_000;

const PUBLIC_INSTITUTIONS: &[&str] = &[
    "Public University",
    "University of Technology",
    "TVET College",
];

/// Terminal verdict of the funding wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingAssessment {
    pub eligible: bool,
    pub threshold: u64,
    pub income: f64,
    /// One line per unmet clause, in the order the clauses are checked.
    pub diagnostics: Vec<String>,
    /// Gates the teaching-bursary follow-up; never affects `eligible`.
    pub teaching_interest: bool,
}

fn flag(answers: &BTreeMap<String, Answer>, key: &str) -> bool {
    matches!(answers.get(key), Some(Answer::Flag(true)))
}

fn amount(answers: &BTreeMap<String, Answer>, key: &str) -> f64 {
    match answers.get(key) {
        Some(Answer::Amount(value)) if value.is_finite() => *value,
        _ => 0.0,
    }
}

/// Derive the financial-aid verdict from the captured answers.
///
/// Missing answers count as failed clauses rather than errors, so the
/// derivation is total over partial answer sets.
pub(crate) fn assess(answers: &BTreeMap<String, Answer>) -> FundingAssessment {
    let citizenship = flag(answers, "citizenship");
    let first_time = flag(answers, "firstTime");
    let institution_public = match answers.get("institution") {
        Some(Answer::Choice(choice)) => PUBLIC_INSTITUTIONS.contains(&choice.as_str()),
        _ => false,
    };
    let passed_nsc = flag(answers, "passedNSC");
    let income = amount(answers, "householdIncome");
    let disability = flag(answers, "disability");
    let teaching_interest = flag(answers, "interestedTeaching");

    let threshold = if disability {
        DISABILITY_INCOME_THRESHOLD
    } else {
        STANDARD_INCOME_THRESHOLD
    };

    let income_provided = income > 0.0;
    let income_within = income <= threshold as f64;

    let eligible =
        citizenship && first_time && institution_public && passed_nsc && income_provided && income_within;

    let mut diagnostics = Vec::new();
    if !eligible {
        if !citizenship {
            diagnostics.push("NSFAS requires SA citizenship or permanent residency.".to_string());
        }
        if !first_time {
            diagnostics.push("Typically for first-time entering students in 2026.".to_string());
        }
        if !institution_public {
            diagnostics.push("Institution must be a public University/UoT/TVET.".to_string());
        }
        if !passed_nsc {
            diagnostics.push("You must have a valid NSC by January 2026.".to_string());
        }
        if !income_provided {
            diagnostics.push("Provide an estimated annual household income.".to_string());
        }
        if income_provided && !income_within {
            diagnostics.push(format!(
                "Income exceeds threshold (R{threshold}). Explore university bursaries or learnerships."
            ));
        }
    }

    FundingAssessment {
        eligible,
        threshold,
        income,
        diagnostics,
        teaching_interest,
    }
}
