//! End-to-end tests for loading, querying and the tutoring session

use std::io::Write;
use std::path::PathBuf;

use tutor_common::query::{NO_ANSWER, NO_EXAMPLES, NO_HINT};
use tutor_common::session::CORRECT_MESSAGE;
use tutor_common::{
    hint_and_answer, list_examples, list_individuals, list_questions, Feedback, OntologyError,
    SessionState, Store, TutorSession,
};

const GRAVITY_DOC: &str = r#"
[[class]]
name = "PhysicsConcept"

[[individual]]
name = "Gravity"
types = ["PhysicsConcept"]
has_example = ["AppleFalling"]
has_question = ["NewtonsLaw"]

[[individual]]
name = "AppleFalling"
label = "Apple falling"

[[individual]]
name = "NewtonsLaw"
label = "State Newton's law"
has_answer = ["NewtonsLawAnswer"]

[[individual]]
name = "NewtonsLawAnswer"
label = "F=ma"
"#;

fn gravity_store() -> Store {
    Store::from_toml_str(GRAVITY_DOC).unwrap()
}

fn bundled_ontology() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/physics_laws_ontology.toml")
}

#[test]
fn gravity_scenario() {
    let store = gravity_store();

    assert_eq!(list_examples(&store, "Gravity"), vec!["Apple falling"]);

    let mut session = TutorSession::new(&store);
    session.select("Gravity");
    assert_eq!(session.question_text(), "State Newton's law");

    let feedback = session.submit("f=ma").unwrap();
    assert!(feedback.is_correct());
    assert_eq!(feedback.message(), CORRECT_MESSAGE);

    session.select("Gravity");
    let feedback = session.submit("e=mc2").unwrap();
    assert_eq!(
        feedback,
        Feedback::Incorrect {
            expected: "F=ma".to_string()
        }
    );
    assert!(feedback.message().contains("F=ma"));
}

#[test]
fn unknown_concept_scenario() {
    let store = gravity_store();

    assert!(list_individuals(&store, "Quantum").is_empty());
    assert!(list_questions(&store, "Quantum").is_empty());
    assert_eq!(list_examples(&store, "Quantum"), vec![NO_EXAMPLES]);
}

#[test]
fn whitespace_and_case_are_ignored() {
    let store = Store::from_toml_str(
        r#"
[[individual]]
name = "Gravity"
has_question = ["Who"]

[[individual]]
name = "Who"
has_answer = ["WhoAnswer"]

[[individual]]
name = "WhoAnswer"
label = "newton"
"#,
    )
    .unwrap();

    let mut session = TutorSession::new(&store);
    session.select("Gravity");
    assert_eq!(session.submit("  Newton  "), Ok(Feedback::Correct));
}

#[test]
fn labeled_examples_never_return_sentinel() {
    let store = Store::load(bundled_ontology()).unwrap();

    for concept in list_individuals(&store, "PhysicsConcept") {
        let examples = list_examples(&store, &concept);
        let entity = store.find_by_name(&concept).unwrap().as_individual().unwrap();
        if entity.has_example.is_empty() {
            assert_eq!(examples, vec![NO_EXAMPLES], "{concept}");
        } else {
            assert_eq!(examples.len(), entity.has_example.len(), "{concept}");
            assert!(!examples.iter().any(|e| e == NO_EXAMPLES), "{concept}");
        }
    }
}

#[test]
fn bundled_ontology_lists_subclass_concepts_first() {
    let store = Store::load(bundled_ontology()).unwrap();
    let concepts = list_individuals(&store, "PhysicsConcept");

    assert_eq!(
        concepts,
        vec![
            "NewtonsFirstLaw",
            "NewtonsSecondLaw",
            "NewtonsThirdLaw",
            "Gravity",
            "ConservationOfEnergy",
            "OhmsLaw",
        ]
    );
    assert_eq!(list_individuals(&store, "MechanicsConcept").len(), 3);
}

#[test]
fn bundled_ontology_missing_hint() {
    let store = Store::load(bundled_ontology()).unwrap();
    let questions = list_questions(&store, "NewtonsThirdLaw");
    assert_eq!(questions.len(), 1);

    let (hint, answer) = hint_and_answer(&questions[0]);
    assert_eq!(hint, NO_HINT);
    assert_eq!(answer, "Reaction");
}

#[test]
fn question_without_answer_uses_sentinel() {
    let store = Store::from_toml_str(
        r#"
[[individual]]
name = "Optics"
has_question = ["Lens"]

[[individual]]
name = "Lens"
label = "What bends light?"
"#,
    )
    .unwrap();

    let questions = list_questions(&store, "Optics");
    assert_eq!(hint_and_answer(&questions[0]).1, NO_ANSWER);
}

#[test]
fn selecting_new_concept_after_submission() {
    let store = Store::load(bundled_ontology()).unwrap();
    let mut session = TutorSession::new(&store);

    session.select("Gravity");
    session.submit("Newton").unwrap();
    assert!(matches!(
        session.state(),
        SessionState::AnswerSubmitted { was_correct: true, .. }
    ));

    session.select("OhmsLaw");
    assert_eq!(session.concept(), Some("OhmsLaw"));
    assert_eq!(session.hint().as_deref(), Some("Current times resistance."));
    assert_eq!(
        session.submit("v = ir"),
        Ok(Feedback::Incorrect {
            expected: "V=IR".into()
        })
    );
}

#[test]
fn load_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{
            "class": [{{ "name": "PhysicsConcept" }}],
            "individual": [
                {{ "name": "Gravity", "types": "PhysicsConcept", "has_example": ["Apple"] }},
                {{ "name": "Apple", "label": "Apple falling" }}
            ]
        }}"#
    )
    .unwrap();

    let store = Store::load(file.path()).unwrap();
    assert_eq!(list_individuals(&store, "PhysicsConcept"), vec!["Gravity"]);
    assert_eq!(list_examples(&store, "Gravity"), vec!["Apple falling"]);
}

#[test]
fn load_missing_file() {
    let err = Store::load("/nonexistent/physics.toml").unwrap_err();
    assert!(matches!(err, OntologyError::NotFound(_)));
}

#[test]
fn load_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".owl").tempfile().unwrap();
    let err = Store::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        OntologyError::UnsupportedFormat { ref extension, .. } if extension == "owl"
    ));
}

#[test]
fn load_malformed_toml() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[[individual]\nname = ").unwrap();
    let err = Store::load(file.path()).unwrap_err();
    assert!(matches!(err, OntologyError::Toml(_)));
}
