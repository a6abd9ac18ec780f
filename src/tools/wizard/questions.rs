use serde::{Deserialize, Serialize};

/// Input type a question expects; validation is keyed off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Boolean,
    Select,
    Number,
}

/// One step in the fixed funding questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub text: &'static str,
    pub help: Option<&'static str>,
    pub kind: QuestionKind,
    pub options: &'static [&'static str],
    pub placeholder: Option<&'static str>,
}

pub const INSTITUTION_OPTIONS: &[&str] = &[
    "Public University",
    "University of Technology",
    "TVET College",
    "Private College / Other",
];

const SCRIPT: &[Question] = &[
    Question {
        key: "citizenship",
        text: "Are you a South African citizen or permanent resident?",
        help: None,
        kind: QuestionKind::Boolean,
        options: &[],
        placeholder: None,
    },
    Question {
        key: "firstTime",
        text: "Will you be a first-time entering student at a public University or TVET in 2026?",
        help: None,
        kind: QuestionKind::Boolean,
        options: &[],
        placeholder: None,
    },
    Question {
        key: "institution",
        text: "Are you planning to study at a public University, University of Technology, or TVET College?",
        help: None,
        kind: QuestionKind::Select,
        options: INSTITUTION_OPTIONS,
        placeholder: None,
    },
    Question {
        key: "passedNSC",
        text: "Will you have a valid NSC (matric) by January 2026?",
        help: Some("If you are rewriting now, answer \"Yes\" if you expect to qualify."),
        kind: QuestionKind::Boolean,
        options: &[],
        placeholder: None,
    },
    Question {
        key: "householdIncome",
        text: "Approximate combined household income per year (Rands)",
        help: None,
        kind: QuestionKind::Number,
        options: &[],
        placeholder: Some("e.g. 120000"),
    },
    Question {
        key: "disability",
        text: "Do you (the applicant) have a disability?",
        help: None,
        kind: QuestionKind::Boolean,
        options: &[],
        placeholder: None,
    },
    Question {
        key: "interestedTeaching",
        text: "Are you considering a BEd (teaching), especially Foundation Phase?",
        help: None,
        kind: QuestionKind::Boolean,
        options: &[],
        placeholder: None,
    },
];

/// The fixed question order; index `script().len()` is the result stage.
pub fn script() -> &'static [Question] {
    SCRIPT
}
