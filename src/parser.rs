use std::io::BufRead;

use crate::classify::{Line, classify};
use crate::error::{Error, Result};
use crate::grammar::{BODY_MATCHERS, Fragment, TOP_LEVEL_MATCHERS, first_match};
use crate::model::{Entity, Model};

/// Parses a structural diagram from any line source.
///
/// Unrecognized lines are dropped; only a failing reader is an error.
pub fn parse<R: BufRead>(reader: R) -> Result<Model> {
    Parser::new().parse(reader).map(|parsed| parsed.model)
}

/// Parses an in-memory diagram. Reading a `&str` cannot fail.
pub fn parse_str(input: &str) -> Model {
    Parser::new().parse_str(input).model
}

/// A line that matched no grammar rule, reported in strict mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// 1-based physical line number.
    pub line: usize,
    /// Trimmed line content.
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub model: Model,
    /// Always empty unless strict mode is on.
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    strict: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report unmatched lines as [`Warning`]s instead of dropping them
    /// silently. The model is identical either way.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Bytes that are not valid UTF-8 are replaced, not rejected; only the
    /// reader itself failing is an error.
    pub fn parse<R: BufRead>(&self, mut reader: R) -> Result<Parsed> {
        let mut session = Session::new(self.strict);
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            line_no += 1;
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| Error::Read {
                    line: line_no,
                    source,
                })?;
            if read == 0 {
                break;
            }
            let line = strip_line_ending(&buf);
            session.feed(line_no, &String::from_utf8_lossy(line));
        }
        Ok(session.finish())
    }

    pub fn parse_str(&self, input: &str) -> Parsed {
        let mut session = Session::new(self.strict);
        for (index, line) in input.lines().enumerate() {
            session.feed(index + 1, line);
        }
        session.finish()
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    TopLevel,
    /// Index of the open entity in `Model::entities`.
    InBody(usize),
}

/// One parse in progress.
struct Session {
    model: Model,
    state: State,
    strict: bool,
    warnings: Vec<Warning>,
}

impl Session {
    fn new(strict: bool) -> Self {
        Self {
            model: Model::default(),
            state: State::TopLevel,
            strict,
            warnings: Vec::new(),
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) {
        let content = match classify(raw) {
            Line::Skip => return,
            Line::ScopeClose => {
                self.state = State::TopLevel;
                return;
            }
            Line::Content(content) => content,
        };

        let fragment = match self.state {
            State::InBody(_) => first_match(BODY_MATCHERS, content),
            State::TopLevel => None,
        }
        .or_else(|| first_match(TOP_LEVEL_MATCHERS, content));

        match fragment {
            Some(fragment) => self.apply(fragment),
            None => self.unmatched(line_no, content),
        }
    }

    fn apply(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::EntityHeader(name) => {
                if self.model.entities.contains_key(&name) {
                    tracing::debug!(entity = %name, "redeclared entity replaces earlier one");
                }
                let index = self.model.open_entity(&name);
                tracing::debug!(entity = %name, "entity body opened");
                self.state = State::InBody(index);
            }
            Fragment::Attribute(attribute) => {
                if let Some(entity) = self.open_entity() {
                    entity.attributes.push(attribute);
                }
            }
            Fragment::Method(method) => {
                if let Some(entity) = self.open_entity() {
                    entity.methods.push(method);
                }
            }
            Fragment::Relationship(relationship) => self.model.relationships.push(relationship),
            Fragment::Constraint(constraint) => self.model.constraints.push(constraint),
        }
    }

    fn open_entity(&mut self) -> Option<&mut Entity> {
        match self.state {
            State::InBody(index) => self.model.entity_at_mut(index),
            State::TopLevel => None,
        }
    }

    fn unmatched(&mut self, line_no: usize, content: &str) {
        if self.strict {
            tracing::debug!(line = line_no, text = content, "unrecognized line");
            self.warnings.push(Warning {
                line: line_no,
                text: content.to_string(),
            });
        } else {
            tracing::trace!(line = line_no, text = content, "dropping unrecognized line");
        }
    }

    fn finish(self) -> Parsed {
        tracing::debug!(
            entities = self.model.entities.len(),
            relationships = self.model.relationships.len(),
            constraints = self.model.constraints.len(),
            warnings = self.warnings.len(),
            "parse complete"
        );
        Parsed {
            model: self.model,
            warnings: self.warnings,
        }
    }
}
