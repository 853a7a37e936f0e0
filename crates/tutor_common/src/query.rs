//! Query Service
//!
//! Stateless lookups over a loaded [`Store`]. A name that does not resolve
//! is normal "no data yet": the queries answer with an empty vector or a
//! sentinel string, never an error.

use serde::Serialize;
use tracing::debug;

use crate::ontology::{Individual, IndividualIdx, Store};

/// Returned by [`list_examples`] when a concept has nothing to show
pub const NO_EXAMPLES: &str = "No examples available.";
/// First element of [`hint_and_answer`] when the question has no hint
pub const NO_HINT: &str = "No hint available.";
/// Second element of [`hint_and_answer`] when the question has no answer
pub const NO_ANSWER: &str = "No answer available.";

/// A question individual seen through the `has_hint` / `has_answer` relations
#[derive(Debug, Clone, Copy)]
pub struct Question<'a> {
    store: &'a Store,
    individual: &'a Individual,
}

impl<'a> Question<'a> {
    pub fn new(store: &'a Store, individual: &'a Individual) -> Self {
        Self { store, individual }
    }

    pub fn individual(&self) -> &'a Individual {
        self.individual
    }

    pub fn name(&self) -> &'a str {
        &self.individual.name
    }

    /// Question text, if the individual carries a label
    pub fn label(&self) -> Option<&'a str> {
        self.individual.label()
    }

    /// First label of the first linked hint
    pub fn hint(&self) -> Option<&'a str> {
        self.first_label(&self.individual.has_hint)
    }

    /// First label of the first linked answer
    pub fn answer(&self) -> Option<&'a str> {
        self.first_label(&self.individual.has_answer)
    }

    fn first_label(&self, targets: &'a [IndividualIdx]) -> Option<&'a str> {
        self.store.resolve(targets).next().and_then(Individual::label)
    }
}

impl PartialEq for Question<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.individual.id == other.individual.id
    }
}

/// Serializable snapshot of a question, used for JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSummary {
    pub name: String,
    pub label: Option<String>,
    pub hint: String,
    pub answer: String,
}

impl From<Question<'_>> for QuestionSummary {
    fn from(q: Question<'_>) -> Self {
        let (hint, answer) = hint_and_answer(&q);
        Self {
            name: q.name().to_string(),
            label: q.label().map(str::to_string),
            hint,
            answer,
        }
    }
}

/// Names of all individuals of `class_name`, including subclass instances
pub fn list_individuals(store: &Store, class_name: &str) -> Vec<String> {
    let Some(class) = store.find_by_name(class_name).and_then(|e| e.as_class()) else {
        debug!(class_name, "class not found");
        return Vec::new();
    };

    store
        .instances_of(class)
        .into_iter()
        .map(|ind| ind.display_name().to_string())
        .collect()
}

/// Labels of the examples linked to a concept, or `[NO_EXAMPLES]`
pub fn list_examples(store: &Store, concept_name: &str) -> Vec<String> {
    let examples: Vec<String> = match concept(store, concept_name) {
        Some(concept) => store
            .resolve(&concept.has_example)
            .filter_map(|example| {
                let label = example.label();
                if label.is_none() {
                    debug!(example = %example.name, "example has no label, skipping");
                }
                label.map(str::to_string)
            })
            .collect(),
        None => Vec::new(),
    };

    if examples.is_empty() {
        vec![NO_EXAMPLES.to_string()]
    } else {
        examples
    }
}

/// Questions linked to a concept, in store order
pub fn list_questions<'a>(store: &'a Store, concept_name: &str) -> Vec<Question<'a>> {
    match concept(store, concept_name) {
        Some(concept) => store
            .resolve(&concept.has_question)
            .map(|ind| Question::new(store, ind))
            .collect(),
        None => Vec::new(),
    }
}

/// Hint and expected answer of a question, with sentinels for absent ones
pub fn hint_and_answer(question: &Question<'_>) -> (String, String) {
    (
        question.hint().unwrap_or(NO_HINT).to_string(),
        question.answer().unwrap_or(NO_ANSWER).to_string(),
    )
}

fn concept<'a>(store: &'a Store, concept_name: &str) -> Option<&'a Individual> {
    let found = store.find_by_name(concept_name).and_then(|e| e.as_individual());
    if found.is_none() {
        debug!(concept_name, "concept not found");
    }
    found
}
