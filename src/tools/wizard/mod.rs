//! Funding eligibility wizard: a linear, resumable question flow ending
//! in a financial-aid assessment.

mod eligibility;
mod questions;

pub use eligibility::{
    FundingAssessment, DISABILITY_INCOME_THRESHOLD, STANDARD_INCOME_THRESHOLD,
};
pub use questions::{script, Question, QuestionKind, INSTITUTION_OPTIONS};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::StoreHandle;

const NS: &str = "wizard";
const ANSWERS_KEY: &str = "answers";

/// Typed answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Flag(bool),
    Amount(f64),
    Choice(String),
}

/// Why an answer could not be accepted. Non-fatal: the machine stays on
/// the same question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIssue {
    Missing,
    ExpectedYesNo,
    ExpectedChoice,
    ExpectedAmount,
}

impl InputIssue {
    pub const fn label(self) -> &'static str {
        match self {
            InputIssue::Missing => "an answer is required before continuing",
            InputIssue::ExpectedYesNo => "this question needs a yes/no answer",
            InputIssue::ExpectedChoice => "pick one of the listed options",
            InputIssue::ExpectedAmount => "enter an amount in Rands",
        }
    }
}

/// Result of attempting to advance the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Validation failed; state and stored answers are unchanged.
    NeedsInput(InputIssue),
    /// Moved on to the question at this index.
    Advanced(usize),
    /// All questions answered; the terminal assessment is ready.
    Completed(FundingAssessment),
}

/// The questionnaire state machine. Answers persist write-through, so a
/// fresh attach resumes with everything previously captured.
pub struct FundingWizard {
    store: StoreHandle,
    index: usize,
    answers: BTreeMap<String, Answer>,
}

impl FundingWizard {
    /// Attach to the store. Traversal always begins at the first
    /// question; stored answers are only used to pre-fill.
    pub fn attach(store: StoreHandle) -> Self {
        let answers = store.get(NS, ANSWERS_KEY, BTreeMap::new());
        Self {
            store,
            index: 0,
            answers,
        }
    }

    /// Restart the traversal without touching captured answers.
    pub fn start(&mut self) {
        self.index = 0;
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.index >= questions::script().len()
    }

    /// The question under the cursor, `None` at the result stage.
    pub fn current_question(&self) -> Option<&'static Question> {
        questions::script().get(self.index)
    }

    /// Previously captured answer for a question key, for pre-filling.
    pub fn saved_answer(&self, key: &str) -> Option<&Answer> {
        self.answers.get(key)
    }

    /// Validate and record an answer for the current question, then
    /// advance. `None`, an empty choice, and a non-finite amount all
    /// count as absent.
    pub fn next(&mut self, answer: Option<Answer>) -> StepOutcome {
        let Some(question) = self.current_question() else {
            return StepOutcome::Completed(self.assess());
        };

        let answer = match validate(question, answer) {
            Ok(answer) => answer,
            Err(issue) => return StepOutcome::NeedsInput(issue),
        };

        self.answers.insert(question.key.to_string(), answer);
        self.store.set(NS, ANSWERS_KEY, &self.answers);
        self.index += 1;

        if self.is_complete() {
            StepOutcome::Completed(self.assess())
        } else {
            StepOutcome::Advanced(self.index)
        }
    }

    /// Step back one question. A no-op at the first question, and never
    /// discards the answer being revisited.
    pub fn back(&mut self) -> usize {
        if self.index > 0 {
            self.index -= 1;
        }
        self.index
    }

    /// Clear all answers and return to the first question.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.store.set(NS, ANSWERS_KEY, &self.answers);
        self.index = 0;
    }

    /// The terminal assessment, present once traversal is complete.
    pub fn result(&self) -> Option<FundingAssessment> {
        if self.is_complete() {
            Some(self.assess())
        } else {
            None
        }
    }

    fn assess(&self) -> FundingAssessment {
        eligibility::assess(&self.answers)
    }
}

fn validate(question: &Question, answer: Option<Answer>) -> Result<Answer, InputIssue> {
    let Some(answer) = answer else {
        return Err(InputIssue::Missing);
    };

    match (question.kind, &answer) {
        (QuestionKind::Boolean, Answer::Flag(_)) => Ok(answer),
        (QuestionKind::Boolean, _) => Err(InputIssue::ExpectedYesNo),
        (QuestionKind::Select, Answer::Choice(choice)) => {
            if choice.is_empty() {
                Err(InputIssue::Missing)
            } else if question.options.contains(&choice.as_str()) {
                Ok(answer)
            } else {
                Err(InputIssue::ExpectedChoice)
            }
        }
        (QuestionKind::Select, _) => Err(InputIssue::ExpectedChoice),
        (QuestionKind::Number, Answer::Amount(value)) => {
            if value.is_finite() {
                Ok(answer)
            } else {
                Err(InputIssue::Missing)
            }
        }
        (QuestionKind::Number, _) => Err(InputIssue::ExpectedAmount),
    }
}
