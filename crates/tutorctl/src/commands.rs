//! One-shot subcommands
//!
//! Each command renders into a [`CommandOutput`] so the text and exit code
//! can be tested without a terminal.

use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use tutor_common::query::{self, QuestionSummary};
use tutor_common::{Feedback, Store, TutorSession};

use crate::errors::{EXIT_INCORRECT_ANSWER, EXIT_NO_QUESTION, EXIT_SUCCESS};
use crate::output::Output;

/// Rendered command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            exit_code: EXIT_SUCCESS,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `tutorctl concepts`
pub fn concepts(store: &Store, class: &str, json: bool, out: &Output) -> Result<CommandOutput> {
    let concepts = query::list_individuals(store, class);

    if json {
        return Ok(CommandOutput::ok(to_json(&json!({
            "class": class,
            "concepts": concepts,
        }))?));
    }

    let mut lines = vec![out.header("CONCEPTS")];
    if concepts.is_empty() {
        lines.push(format!("  {}", out.dim("No concepts available")));
    }
    lines.extend(concepts.iter().map(|c| format!("  {}", c)));
    Ok(CommandOutput::ok(lines.join("\n")))
}

/// `tutorctl examples <CONCEPT>`
pub fn examples(store: &Store, concept: &str, json: bool, out: &Output) -> Result<CommandOutput> {
    let examples = query::list_examples(store, concept);

    if json {
        return Ok(CommandOutput::ok(to_json(&json!({
            "concept": concept,
            "examples": examples,
        }))?));
    }

    let mut lines = vec![out.header("EXAMPLES")];
    lines.extend(examples.iter().map(|e| format!("  {}", e)));
    Ok(CommandOutput::ok(lines.join("\n")))
}

/// `tutorctl questions <CONCEPT>`
pub fn questions(store: &Store, concept: &str, json: bool, out: &Output) -> Result<CommandOutput> {
    let summaries: Vec<QuestionSummary> = query::list_questions(store, concept)
        .into_iter()
        .map(QuestionSummary::from)
        .collect();

    if json {
        return Ok(CommandOutput::ok(to_json(&json!({
            "concept": concept,
            "questions": summaries,
        }))?));
    }

    let mut lines = vec![out.header("QUESTIONS")];
    if summaries.is_empty() {
        lines.push(format!("  {}", tutor_common::session::NO_QUESTIONS_AVAILABLE));
    }
    for (i, q) in summaries.iter().enumerate() {
        let label = q.label.as_deref().unwrap_or(tutor_common::session::NO_LABEL);
        lines.push(format!("  {}. {}", i + 1, label));
        lines.push(format!("     Hint: {}", out.hint(&q.hint)));
    }
    Ok(CommandOutput::ok(lines.join("\n")))
}

/// `tutorctl check <CONCEPT> <ANSWER>`
pub fn check(
    store: &Store,
    concept: &str,
    answer: &str,
    json: bool,
    out: &Output,
) -> Result<CommandOutput> {
    let mut session = TutorSession::new(store);
    session.select(concept);
    let question = session.question_text();
    let feedback = session.submit(answer)?;

    let exit_code = match feedback {
        Feedback::Correct => EXIT_SUCCESS,
        Feedback::Incorrect { .. } => EXIT_INCORRECT_ANSWER,
        Feedback::NoQuestion => EXIT_NO_QUESTION,
    };

    let text = if json {
        to_json(&json!({
            "concept": concept,
            "question": question,
            "feedback": feedback,
            "message": feedback.message(),
        }))?
    } else {
        let message = match feedback {
            Feedback::Correct => out.success(&feedback.message()),
            Feedback::Incorrect { .. } => out.failure(&feedback.message()),
            Feedback::NoQuestion => out.dim(&feedback.message()),
        };
        [
            out.header("QUESTION"),
            format!("  {}", question),
            String::new(),
            out.header("FEEDBACK"),
            format!("  {}", message),
        ]
        .join("\n")
    };

    Ok(CommandOutput { text, exit_code })
}
