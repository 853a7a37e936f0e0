//! Ontology Store
//!
//! In-memory, read-only graph of classes and individuals. Built once by
//! [`Store::load`] and only borrowed afterwards; nothing mutates it.
//!
//! Relations (`has_example`, `has_question`, `has_hint`, `has_answer`) are
//! explicit fields on [`Individual`] holding resolved indices, so an absent
//! relation is just an empty vector.

pub mod loader;

use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::Result;

/// Base IRI used when an ontology document does not declare one
pub const DEFAULT_BASE_IRI: &str = "urn:physics-tutor:ontology";

/// Stable identifier of an entity: `"{base}#{name}"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(base: &str, name: &str) -> Self {
        Self(format!("{}#{}", base, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a class in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassIdx(pub(crate) usize);

/// Position of an individual in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualIdx(pub(crate) usize);

/// A class such as `PhysicsConcept`
#[derive(Debug, Clone)]
pub struct OntologyClass {
    pub(crate) idx: ClassIdx,
    pub id: EntityId,
    pub name: String,
    pub labels: Vec<String>,
    /// Direct superclasses
    pub subclass_of: Vec<ClassIdx>,
}

impl OntologyClass {
    pub fn idx(&self) -> ClassIdx {
        self.idx
    }
}

/// An instance entity: concept, example, question, hint or answer
#[derive(Debug, Clone)]
pub struct Individual {
    pub(crate) idx: IndividualIdx,
    pub id: EntityId,
    pub name: String,
    pub labels: Vec<String>,
    pub types: Vec<ClassIdx>,
    pub has_example: Vec<IndividualIdx>,
    pub has_question: Vec<IndividualIdx>,
    pub has_hint: Vec<IndividualIdx>,
    pub has_answer: Vec<IndividualIdx>,
}

impl Individual {
    pub fn idx(&self) -> IndividualIdx {
        self.idx
    }

    /// First display label, if any
    pub fn label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    /// Name, or the IRI for an anonymous individual
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// Result of a name lookup
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Class(&'a OntologyClass),
    Individual(&'a Individual),
}

impl<'a> Entity<'a> {
    pub fn id(&self) -> &'a EntityId {
        match self {
            Entity::Class(c) => &c.id,
            Entity::Individual(i) => &i.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Entity::Class(c) => &c.name,
            Entity::Individual(i) => &i.name,
        }
    }

    pub fn as_class(&self) -> Option<&'a OntologyClass> {
        match self {
            Entity::Class(c) => Some(c),
            Entity::Individual(_) => None,
        }
    }

    pub fn as_individual(&self) -> Option<&'a Individual> {
        match self {
            Entity::Individual(i) => Some(i),
            Entity::Class(_) => None,
        }
    }
}

/// The loaded ontology graph
#[derive(Debug, Clone)]
pub struct Store {
    base: String,
    classes: Vec<OntologyClass>,
    individuals: Vec<Individual>,
}

impl Store {
    pub(crate) fn from_parts(
        base: String,
        classes: Vec<OntologyClass>,
        individuals: Vec<Individual>,
    ) -> Self {
        Self {
            base,
            classes,
            individuals,
        }
    }

    /// Load an ontology file (`.toml` or `.json`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        loader::load_file(path.as_ref())
    }

    /// Parse a TOML ontology document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        loader::from_toml_str(source)
    }

    /// Parse a JSON ontology document
    pub fn from_json_str(source: &str) -> Result<Self> {
        loader::from_json_str(source)
    }

    pub fn base_iri(&self) -> &str {
        &self.base
    }

    pub fn classes(&self) -> &[OntologyClass] {
        &self.classes
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn class(&self, idx: ClassIdx) -> &OntologyClass {
        &self.classes[idx.0]
    }

    pub fn individual(&self, idx: IndividualIdx) -> &Individual {
        &self.individuals[idx.0]
    }

    /// Resolve a batch of relation targets in relation order
    pub fn resolve<'a>(
        &'a self,
        targets: &'a [IndividualIdx],
    ) -> impl Iterator<Item = &'a Individual> + 'a {
        targets.iter().map(move |idx| self.individual(*idx))
    }

    /// Total number of entities (classes + individuals)
    pub fn len(&self) -> usize {
        self.classes.len() + self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the first entity whose identifier matches `name`.
    ///
    /// An entity named exactly `name` wins; otherwise the first identifier
    /// ending with `name` is returned. Classes come before individuals,
    /// each in document order. Empty names never match.
    pub fn find_by_name(&self, name: &str) -> Option<Entity<'_>> {
        if name.is_empty() {
            return None;
        }

        let found = self
            .entities()
            .find(|e| e.name() == name)
            .or_else(|| self.entities().find(|e| e.id().as_str().ends_with(name)));

        debug!(name, found = ?found.map(|e| e.id().as_str()), "find_by_name");
        found
    }

    /// All entities in lookup order
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.classes
            .iter()
            .map(Entity::Class)
            .chain(self.individuals.iter().map(Entity::Individual))
    }

    /// Individuals typed with `class` or any of its transitive subclasses,
    /// in store order
    pub fn instances_of(&self, class: &OntologyClass) -> Vec<&Individual> {
        let members = self.subclass_closure(class.idx);
        self.individuals
            .iter()
            .filter(|ind| ind.types.iter().any(|t| members[t.0]))
            .collect()
    }

    /// Membership mask of `root` and everything below it
    fn subclass_closure(&self, root: ClassIdx) -> Vec<bool> {
        let mut members = vec![false; self.classes.len()];
        members[root.0] = true;

        // Fixed point; subclass cycles terminate because the mask only grows
        let mut changed = true;
        while changed {
            changed = false;
            for class in &self.classes {
                if !members[class.idx.0] && class.subclass_of.iter().any(|p| members[p.0]) {
                    members[class.idx.0] = true;
                    changed = true;
                }
            }
        }
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
[ontology]
base = "http://example.org/physics"

[[class]]
name = "PhysicsConcept"

[[class]]
name = "MechanicsConcept"
subclass_of = ["PhysicsConcept"]

[[class]]
name = "Example"

[[individual]]
name = "Gravity"
types = ["PhysicsConcept"]

[[individual]]
name = "AntiGravity"
types = ["PhysicsConcept"]

[[individual]]
name = "Friction"
types = ["MechanicsConcept"]

[[individual]]
name = "AppleFalling"
types = ["Example"]
label = ["Apple falling"]
"#;

    fn store() -> Store {
        Store::from_toml_str(DOC).unwrap()
    }

    #[test]
    fn test_entity_id_format() {
        let id = EntityId::new("http://example.org/physics", "Gravity");
        assert_eq!(id.as_str(), "http://example.org/physics#Gravity");
    }

    #[test]
    fn test_find_by_exact_name() {
        let store = store();
        let entity = store.find_by_name("Gravity").unwrap();
        assert_eq!(entity.name(), "Gravity");
        assert!(entity.as_individual().is_some());
    }

    #[test]
    fn test_exact_name_beats_earlier_suffix_match() {
        let store = Store::from_toml_str(
            r#"
[[individual]]
name = "AntiGravity"

[[individual]]
name = "Gravity"
"#,
        )
        .unwrap();

        assert_eq!(store.find_by_name("Gravity").unwrap().name(), "Gravity");
        // Without an exact match the earlier suffix match still wins
        assert_eq!(store.find_by_name("ravity").unwrap().name(), "AntiGravity");
    }

    #[test]
    fn test_find_by_suffix() {
        let store = store();
        let entity = store.find_by_name("ravity").unwrap();
        // First suffix match in store order
        assert_eq!(entity.name(), "Gravity");
    }

    #[test]
    fn test_find_class_before_individual() {
        let store = store();
        let entity = store.find_by_name("PhysicsConcept").unwrap();
        assert!(entity.as_class().is_some());
    }

    #[test]
    fn test_find_missing_and_empty() {
        let store = store();
        assert!(store.find_by_name("Quantum").is_none());
        assert!(store.find_by_name("").is_none());
    }

    #[test]
    fn test_instances_include_subclasses() {
        let store = store();
        let class = store.find_by_name("PhysicsConcept").unwrap().as_class().unwrap();
        let names: Vec<&str> = store
            .instances_of(class)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Gravity", "AntiGravity", "Friction"]);
    }

    #[test]
    fn test_instances_of_subclass_only() {
        let store = store();
        let class = store.find_by_name("MechanicsConcept").unwrap().as_class().unwrap();
        let names: Vec<&str> = store
            .instances_of(class)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Friction"]);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut ind = store().individuals()[0].clone();
        ind.name.clear();
        assert_eq!(ind.display_name(), "http://example.org/physics#Gravity");
    }

    #[test]
    fn test_len() {
        let store = store();
        assert_eq!(store.len(), 7);
        assert!(!store.is_empty());
    }
}
