//! Line-oriented parser for PlantUML-style structural diagrams.
//!
//! Reads entity declarations (with attributes and methods), relationships and
//! constraints into a [`Model`]. Lines that fit no rule are ignored; use
//! [`Parser::strict`] to have them reported.

pub mod classify;
pub mod error;
pub mod grammar;
pub mod model;
pub mod parser;

pub use error::{Error, Result};
pub use model::{Attribute, Constraint, Entity, Method, Model, Relationship};
pub use parser::{Parsed, Parser, Warning, parse, parse_str};
