//! Tutoring session state machine
//!
//! Three states driven by the front-end:
//!
//! ```text
//! NoConceptSelected --select--> ConceptSelected --submit--> AnswerSubmitted
//!                                  ^      ^                      |    |
//!                                  |      +-------retry----------+    |
//!                                  +-------------select---------------+
//! ```
//!
//! The current question is always the first one linked to the concept.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::error::SessionError;
use crate::ontology::Store;
use crate::query::{self, Question};

pub const CORRECT_MESSAGE: &str = "Correct! Your answer matches the expected response.";
pub const NO_QUESTION_SELECTED: &str = "No question selected.";
pub const NO_QUESTIONS_AVAILABLE: &str = "No questions available.";
pub const NO_LABEL: &str = "No label";

/// Trim and case-fold an answer for comparison
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimming equality
pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize_answer(given) == normalize_answer(expected)
}

/// Outcome of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    Incorrect { expected: String },
    NoQuestion,
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }

    pub fn message(&self) -> String {
        match self {
            Feedback::Correct => CORRECT_MESSAGE.to_string(),
            Feedback::Incorrect { expected } => {
                format!("Incorrect. The correct answer is: {}", expected)
            }
            Feedback::NoQuestion => NO_QUESTION_SELECTED.to_string(),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<'s> {
    NoConceptSelected,
    ConceptSelected {
        concept: String,
        question: Option<Question<'s>>,
    },
    AnswerSubmitted {
        concept: String,
        question: Question<'s>,
        was_correct: bool,
    },
}

/// One interactive tutoring session over a borrowed store
#[derive(Debug)]
pub struct TutorSession<'s> {
    store: &'s Store,
    state: SessionState<'s>,
}

impl<'s> TutorSession<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self {
            store,
            state: SessionState::NoConceptSelected,
        }
    }

    pub fn store(&self) -> &'s Store {
        self.store
    }

    pub fn state(&self) -> &SessionState<'s> {
        &self.state
    }

    /// Pick a concept; valid from every state
    pub fn select(&mut self, concept: &str) {
        let question = query::list_questions(self.store, concept).into_iter().next();
        debug!(concept, question = ?question.map(|q| q.name()), "concept selected");
        self.state = SessionState::ConceptSelected {
            concept: concept.to_string(),
            question,
        };
    }

    /// Check an answer against the current question.
    ///
    /// Only valid from `ConceptSelected`. A concept without questions
    /// yields [`Feedback::NoQuestion`] and keeps the state.
    pub fn submit(&mut self, user_text: &str) -> Result<Feedback, SessionError> {
        let (concept, question) = match &self.state {
            SessionState::NoConceptSelected => return Err(SessionError::NoConceptSelected),
            SessionState::AnswerSubmitted { .. } => return Err(SessionError::AlreadySubmitted),
            SessionState::ConceptSelected { question: None, .. } => {
                return Ok(Feedback::NoQuestion)
            }
            SessionState::ConceptSelected {
                concept,
                question: Some(question),
            } => (concept.clone(), *question),
        };

        let (_, expected) = query::hint_and_answer(&question);
        let was_correct = answers_match(user_text, &expected);
        info!(concept = %concept, question = question.name(), was_correct, "answer submitted");

        self.state = SessionState::AnswerSubmitted {
            concept,
            question,
            was_correct,
        };

        Ok(if was_correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect { expected }
        })
    }

    /// Return to `ConceptSelected` on the same question after feedback
    pub fn retry(&mut self) -> Result<(), SessionError> {
        match &self.state {
            SessionState::AnswerSubmitted {
                concept, question, ..
            } => {
                self.state = SessionState::ConceptSelected {
                    concept: concept.clone(),
                    question: Some(*question),
                };
                Ok(())
            }
            SessionState::ConceptSelected { .. } => Ok(()),
            SessionState::NoConceptSelected => Err(SessionError::NoConceptSelected),
        }
    }

    pub fn concept(&self) -> Option<&str> {
        match &self.state {
            SessionState::NoConceptSelected => None,
            SessionState::ConceptSelected { concept, .. }
            | SessionState::AnswerSubmitted { concept, .. } => Some(concept),
        }
    }

    pub fn question(&self) -> Option<Question<'s>> {
        match &self.state {
            SessionState::NoConceptSelected => None,
            SessionState::ConceptSelected { question, .. } => *question,
            SessionState::AnswerSubmitted { question, .. } => Some(*question),
        }
    }

    /// Result of the last submission, while in `AnswerSubmitted`
    pub fn was_correct(&self) -> Option<bool> {
        match &self.state {
            SessionState::AnswerSubmitted { was_correct, .. } => Some(*was_correct),
            _ => None,
        }
    }

    /// Text shown for the current question
    pub fn question_text(&self) -> String {
        match self.question() {
            Some(q) => q.label().unwrap_or(NO_LABEL).to_string(),
            None => NO_QUESTIONS_AVAILABLE.to_string(),
        }
    }

    /// Hint for the current question, `None` when there is no question
    pub fn hint(&self) -> Option<String> {
        self.question().map(|q| query::hint_and_answer(&q).0)
    }

    pub fn examples(&self) -> Vec<String> {
        match self.concept() {
            Some(concept) => query::list_examples(self.store, concept),
            None => Vec::new(),
        }
    }
}
