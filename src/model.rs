use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Result of parsing one structural diagram.
///
/// Entities iterate in order of first declaration. A later header with the
/// same name replaces the entity but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Model {
    pub entities: IndexMap<String, Entity>,
    pub relationships: Vec<Relationship>,
    pub constraints: Vec<Constraint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub name: String,
    pub return_type: String,
}

/// An edge between two entity names, which need not be declared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    /// Connector exactly as written, e.g. `--`, `<|--`, `*--`.
    pub relation_kind: String,
    /// Empty when absent.
    pub from_multiplicity: String,
    /// Empty when absent.
    pub to_multiplicity: String,
    /// Empty when absent.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub kind: String,
    pub target: String,
    /// Kept verbatim; never interpreted.
    pub expression: String,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }
}

impl Model {
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty() && self.constraints.is_empty()
    }

    /// Inserts a fresh entity, replacing any previous one of that name, and
    /// returns its index.
    pub(crate) fn open_entity(&mut self, name: &str) -> usize {
        let (index, _) = self
            .entities
            .insert_full(name.to_string(), Entity::new(name));
        index
    }

    pub(crate) fn entity_at_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_index_mut(index).map(|(_, e)| e)
    }
}

/// Debug dump. One-way: it does not round-trip through the parser.
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Entities:")?;
        for e in self.entities() {
            writeln!(f, " - {}", e.name)?;
            for a in &e.attributes {
                writeln!(f, "    attr {} : {}", a.name, a.attr_type)?;
            }
            for m in &e.methods {
                writeln!(f, "    method {}() : {}", m.name, m.return_type)?;
            }
        }

        writeln!(f, "Relationships:")?;
        for r in &self.relationships {
            writeln!(
                f,
                " - {} \"{}\" {} \"{}\" {} : {}",
                r.from, r.from_multiplicity, r.relation_kind, r.to_multiplicity, r.to, r.label
            )?;
        }

        writeln!(f, "Constraints:")?;
        for c in &self.constraints {
            writeln!(f, " - {} on {} : {}", c.kind, c.target, c.expression)?;
        }
        Ok(())
    }
}
