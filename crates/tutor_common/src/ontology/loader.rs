//! Ontology document loader
//!
//! Reads TOML or JSON ontology documents and resolves every name reference
//! into store indices. A document that parses but references an unknown
//! individual or class is rejected, so the store never holds dangling
//! relations.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{
    ClassIdx, EntityId, Individual, IndividualIdx, OntologyClass, Store, DEFAULT_BASE_IRI,
};
use crate::error::{OntologyError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OntologyDocument {
    #[serde(default)]
    ontology: Header,
    #[serde(default, rename = "class")]
    classes: Vec<ClassDecl>,
    #[serde(default, rename = "individual")]
    individuals: Vec<IndividualDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Header {
    #[serde(default = "default_base")]
    base: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            base: default_base(),
        }
    }
}

fn default_base() -> String {
    DEFAULT_BASE_IRI.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassDecl {
    name: String,
    #[serde(default, deserialize_with = "one_or_many")]
    label: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    subclass_of: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndividualDecl {
    name: String,
    #[serde(default, deserialize_with = "one_or_many")]
    types: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    label: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    has_example: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    has_question: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    has_hint: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    has_answer: Vec<String>,
}

/// Accept `label = "x"` as shorthand for `label = ["x"]`
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

/// Load an ontology file, choosing the parser by extension
pub fn load_file(path: &Path) -> Result<Store> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if extension != "toml" && extension != "json" {
        return Err(OntologyError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    let source = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => OntologyError::NotFound(path.to_path_buf()),
        _ => OntologyError::Io(e),
    })?;

    let store = if extension == "json" {
        from_json_str(&source)?
    } else {
        from_toml_str(&source)?
    };

    info!(
        path = %path.display(),
        classes = store.classes().len(),
        individuals = store.individuals().len(),
        "Ontology loaded"
    );
    Ok(store)
}

pub fn from_toml_str(source: &str) -> Result<Store> {
    let doc: OntologyDocument = toml::from_str(source)?;
    build(doc)
}

pub fn from_json_str(source: &str) -> Result<Store> {
    let doc: OntologyDocument = serde_json::from_str(source)?;
    build(doc)
}

#[derive(Clone, Copy)]
enum Slot {
    Class(ClassIdx),
    Individual(IndividualIdx),
}

fn build(doc: OntologyDocument) -> Result<Store> {
    let base = doc.ontology.base;

    // Pass 1: assign indices, enforce unique names across both kinds
    let mut names: HashMap<&str, Slot> = HashMap::new();
    for (i, class) in doc.classes.iter().enumerate() {
        if class.name.is_empty() {
            return Err(OntologyError::EmptyName("class"));
        }
        if names.insert(&class.name, Slot::Class(ClassIdx(i))).is_some() {
            return Err(OntologyError::DuplicateName(class.name.clone()));
        }
    }
    for (i, ind) in doc.individuals.iter().enumerate() {
        if ind.name.is_empty() {
            return Err(OntologyError::EmptyName("individual"));
        }
        if names.insert(&ind.name, Slot::Individual(IndividualIdx(i))).is_some() {
            return Err(OntologyError::DuplicateName(ind.name.clone()));
        }
    }

    let class_ref = |from: &str, class: &str| -> Result<ClassIdx> {
        match names.get(class) {
            Some(Slot::Class(idx)) => Ok(*idx),
            _ => Err(OntologyError::UnknownClass {
                from: from.to_string(),
                class: class.to_string(),
            }),
        }
    };

    let individual_refs = |from: &str, relation: &'static str, targets: &[String]| {
        targets
            .iter()
            .map(|target| match names.get(target.as_str()) {
                Some(Slot::Individual(idx)) => Ok(*idx),
                _ => Err(OntologyError::UnknownReference {
                    from: from.to_string(),
                    relation,
                    target: target.clone(),
                }),
            })
            .collect::<Result<Vec<_>>>()
    };

    // Pass 2: resolve references
    let mut classes = Vec::with_capacity(doc.classes.len());
    for (i, decl) in doc.classes.iter().enumerate() {
        let subclass_of = decl
            .subclass_of
            .iter()
            .map(|parent| class_ref(&decl.name, parent))
            .collect::<Result<Vec<_>>>()?;

        classes.push(OntologyClass {
            idx: ClassIdx(i),
            id: EntityId::new(&base, &decl.name),
            name: decl.name.clone(),
            labels: decl.label.clone(),
            subclass_of,
        });
    }

    let mut individuals = Vec::with_capacity(doc.individuals.len());
    for (i, decl) in doc.individuals.iter().enumerate() {
        let types = decl
            .types
            .iter()
            .map(|t| class_ref(&decl.name, t))
            .collect::<Result<Vec<_>>>()?;

        individuals.push(Individual {
            idx: IndividualIdx(i),
            id: EntityId::new(&base, &decl.name),
            name: decl.name.clone(),
            labels: decl.label.clone(),
            types,
            has_example: individual_refs(&decl.name, "has_example", &decl.has_example)?,
            has_question: individual_refs(&decl.name, "has_question", &decl.has_question)?,
            has_hint: individual_refs(&decl.name, "has_hint", &decl.has_hint)?,
            has_answer: individual_refs(&decl.name, "has_answer", &decl.has_answer)?,
        });
    }

    for (concept, example) in unlabeled_examples(&individuals) {
        warn!(concept, example, "example has no label and will not be shown");
    }

    debug!(base = %base, entities = classes.len() + individuals.len(), "Ontology graph built");
    Ok(Store::from_parts(base, classes, individuals))
}

/// `(concept, example)` pairs whose example carries no label
fn unlabeled_examples(individuals: &[Individual]) -> Vec<(&str, &str)> {
    individuals
        .iter()
        .flat_map(|concept| {
            concept
                .has_example
                .iter()
                .map(|idx| &individuals[idx.0])
                .filter(|example| example.labels.is_empty())
                .map(move |example| (concept.name.as_str(), example.name.as_str()))
        })
        .collect()
}
