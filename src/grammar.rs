use winnow::prelude::*;
use winnow::ascii::{space0, space1};
use winnow::combinator::{alt, delimited, eof, opt, preceded, repeat_till};
use winnow::token::{any, take_while};

use crate::model::{Attribute, Constraint, Method, Relationship};

/// A single recognized line, before it is folded into the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    EntityHeader(String),
    Attribute(Attribute),
    Method(Method),
    Relationship(Relationship),
    Constraint(Constraint),
}

/// Recognizes a whole trimmed line or declines with `None`.
pub type Matcher = fn(&str) -> Option<Fragment>;

/// Tried, in order, while an entity body is open.
pub const BODY_MATCHERS: &[Matcher] = &[attribute, method];

/// Tried, in order, at top level and after the body matchers decline.
pub const TOP_LEVEL_MATCHERS: &[Matcher] = &[entity_header, relationship, constraint];

/// Runs `matchers` in order and returns the first fragment produced.
pub fn first_match(matchers: &[Matcher], line: &str) -> Option<Fragment> {
    matchers.iter().find_map(|m| m(line))
}

pub fn entity_header(line: &str) -> Option<Fragment> {
    entity_header_line
        .parse(line)
        .ok()
        .map(|name| Fragment::EntityHeader(name.to_string()))
}

pub fn attribute(line: &str) -> Option<Fragment> {
    attribute_line.parse(line).ok().map(|(name, attr_type)| {
        Fragment::Attribute(Attribute {
            name: name.to_string(),
            attr_type: attr_type.to_string(),
        })
    })
}

pub fn method(line: &str) -> Option<Fragment> {
    method_line.parse(line).ok().map(|(name, return_type)| {
        Fragment::Method(Method {
            name: name.to_string(),
            return_type: return_type.to_string(),
        })
    })
}

pub fn relationship(line: &str) -> Option<Fragment> {
    relationship_line.parse(line).ok().map(Fragment::Relationship)
}

pub fn constraint(line: &str) -> Option<Fragment> {
    constraint_line.parse(line).ok().map(Fragment::Constraint)
}

// `class Name {`, brace optional
fn entity_header_line<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    alt(("class", "entity", "object")).parse_next(input)?;
    space1.parse_next(input)?;
    let name = identifier.parse_next(input)?;
    space0.parse_next(input)?;
    opt('{').parse_next(input)?;
    Ok(name)
}

fn attribute_line<'s>(input: &mut &'s str) -> winnow::Result<(&'s str, &'s str)> {
    let name = identifier.parse_next(input)?;
    let attr_type = type_annotation.parse_next(input)?;
    Ok((name, attr_type))
}

fn method_line<'s>(input: &mut &'s str) -> winnow::Result<(&'s str, &'s str)> {
    let name = identifier.parse_next(input)?;
    '('.parse_next(input)?;
    // Parameters run up to the last `)` that is followed by `: Type` and
    // nothing else, so nested parentheses are fine.
    let ((), return_type): ((), &str) = repeat_till(0.., any, method_tail).parse_next(input)?;
    Ok((name, return_type))
}

fn method_tail<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    ')'.parse_next(input)?;
    let return_type = type_annotation.parse_next(input)?;
    eof.parse_next(input)?;
    Ok(return_type)
}

fn type_annotation<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    preceded((space0, ':', space0), identifier).parse_next(input)
}

fn relationship_line(input: &mut &str) -> winnow::Result<Relationship> {
    let from = identifier.parse_next(input)?;
    let from_multiplicity = spaced_multiplicity.parse_next(input)?;
    let relation_kind = connector.parse_next(input)?;
    let to_multiplicity = spaced_multiplicity.parse_next(input)?;
    let to = identifier.parse_next(input)?;
    let label = opt(preceded((space0, ':', space0), rest_of_line)).parse_next(input)?;

    Ok(Relationship {
        from: from.to_string(),
        to: to.to_string(),
        relation_kind: relation_kind.to_string(),
        from_multiplicity: from_multiplicity.unwrap_or_default().to_string(),
        to_multiplicity: to_multiplicity.unwrap_or_default().to_string(),
        label: label.unwrap_or_default().to_string(),
    })
}

/// An optional quoted multiplicity, always followed by at least one space.
fn spaced_multiplicity<'s>(input: &mut &'s str) -> winnow::Result<Option<&'s str>> {
    alt((
        (space0, multiplicity, space1).map(|(_, m, _)| Some(m)),
        space1.value(None),
    ))
    .parse_next(input)
}

fn multiplicity<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    delimited('"', take_while(1.., |c: char| c != '"'), '"').parse_next(input)
}

fn connector<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., ['-', '.', 'o', '*', '<', '|']).parse_next(input)
}

fn constraint_line(input: &mut &str) -> winnow::Result<Constraint> {
    "constraint".parse_next(input)?;
    space1.parse_next(input)?;
    let kind = identifier.parse_next(input)?;
    (space1, "on", space1).parse_next(input)?;
    let target = identifier.parse_next(input)?;
    let expression = preceded((space0, ':', space0), rest_of_line).parse_next(input)?;

    Ok(Constraint {
        kind: kind.to_string(),
        target: target.to_string(),
        expression: expression.to_string(),
    })
}

fn rest_of_line<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |_: char| true).parse_next(input)
}

fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}
