//! Utterance expansion and entity slot annotations
//!
//! Source lines use `(a|b)` alternation groups, which expand into every
//! combination of their branches. Groups may nest, and an empty branch makes a
//! group optional: `(please|) call me` expands to `please call me` and
//! `call me`. Curly braces are literal to the expander and are handled by
//! [`parse_annotations`] afterwards: `{colors}` or `{colors:color}` marks an
//! entity slot with an optional parameter alias.

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::{all_consuming, map, opt};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};

/// A parsed piece of a source line, before expansion
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    /// Alternatives, each a sequence of nodes
    Group(Vec<Vec<Node>>),
}

/// A piece of an expanded utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, sent to the platform verbatim
    Text(String),
    /// An entity slot; `alias` is the parameter name it fills
    Slot { entity: String, alias: String },
}

/// Expand every alternation group in `line`
///
/// Whitespace runs are collapsed, empty results dropped and duplicates
/// removed, keeping first-appearance order.
pub fn expand(line: &str) -> Result<Vec<String>, String> {
    let (_, nodes) = all_consuming(sequence)
        .parse(line)
        .map_err(|_| format!("unbalanced '(', ')' or stray '|' in {:?}", line))?;

    let mut expanded: Vec<String> = Vec::new();
    for candidate in expand_sequence(&nodes) {
        let normalized = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
        if !normalized.is_empty() && !expanded.contains(&normalized) {
            expanded.push(normalized);
        }
    }
    Ok(expanded)
}

/// Expand every line of `lines`, concatenating the results in order
pub fn expand_all<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>, String> {
    let mut out = Vec::new();
    for line in lines {
        out.extend(expand(line.as_ref())?);
    }
    Ok(out)
}

/// Split an expanded utterance into text and entity slots
pub fn parse_annotations(utterance: &str) -> Result<Vec<Segment>, String> {
    let (_, segments) = all_consuming(many0(alt((slot, plain_text))))
        .parse(utterance)
        .map_err(|_| format!("malformed entity slot in {:?}", utterance))?;
    Ok(segments)
}

fn sequence(input: &str) -> IResult<&str, Vec<Node>> {
    many0(alt((group, literal))).parse(input)
}

fn group(input: &str) -> IResult<&str, Node> {
    map(
        delimited(char('('), separated_list1(char('|'), sequence), char(')')),
        Node::Group,
    )
    .parse(input)
}

fn literal(input: &str) -> IResult<&str, Node> {
    map(take_while1(|c: char| !matches!(c, '(' | ')' | '|')), |s: &str| {
        Node::Text(s.to_string())
    })
    .parse(input)
}

fn slot_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')).parse(input)
}

fn slot(input: &str) -> IResult<&str, Segment> {
    map(
        delimited(
            char('{'),
            pair(slot_name, opt(preceded(char(':'), slot_name))),
            char('}'),
        ),
        |(entity, alias): (&str, Option<&str>)| Segment::Slot {
            entity: entity.to_string(),
            alias: alias.unwrap_or(entity).to_string(),
        },
    )
    .parse(input)
}

fn plain_text(input: &str) -> IResult<&str, Segment> {
    map(take_while1(|c: char| c != '{' && c != '}'), |s: &str| {
        Segment::Text(s.to_string())
    })
    .parse(input)
}

fn expand_sequence(nodes: &[Node]) -> Vec<String> {
    let mut results = vec![String::new()];
    for node in nodes {
        let options = match node {
            Node::Text(text) => vec![text.clone()],
            Node::Group(branches) => branches.iter().flat_map(|b| expand_sequence(b)).collect(),
        };
        results = results
            .iter()
            .flat_map(|prefix| options.iter().map(move |choice| format!("{}{}", prefix, choice)))
            .collect();
    }
    results
}
