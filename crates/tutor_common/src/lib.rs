//! Shared core for the physics tutor: ontology store, queries, session.

pub mod config;
pub mod error;
pub mod ontology;
pub mod query;
pub mod session;

pub use error::{OntologyError, SessionError};
pub use ontology::{Entity, EntityId, Individual, OntologyClass, Store};
pub use query::{hint_and_answer, list_examples, list_individuals, list_questions, Question};
pub use session::{Feedback, SessionState, TutorSession};
