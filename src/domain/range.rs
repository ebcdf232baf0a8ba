//! Version range predicates
//!
//! A range is a list of alternatives separated by `||`. Each alternative is a
//! set of comparators separated by whitespace or commas, all of which must
//! match. A comparator without an operator means exact equality.

use crate::domain::version::Version;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn comparator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(>=|<=|!=|==|=|>|<|~|\^)?\s*(.*)$").expect("comparator regex is valid")
    })
}

/// A single comparator inside an alternative
#[derive(Debug, Clone)]
enum Constraint {
    /// A lone `*`, `x` or `X`
    Any,
    Matches(semver::Comparator),
    Excludes(semver::Comparator),
}

impl Constraint {
    fn matches(&self, version: &semver::Version) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Matches(c) => c.matches(version),
            Constraint::Excludes(c) => !c.matches(version),
        }
    }
}

/// Predicate over versions, built from a range expression like ">=1.0.0 <2.0.0"
#[derive(Debug, Clone)]
pub struct VersionRange {
    expression: String,
    alternatives: Vec<Vec<Constraint>>,
}

impl VersionRange {
    /// Parse a range expression
    pub fn parse(expression: &str) -> Result<Self> {
        if expression.trim().is_empty() {
            return Err(ReleaseError::range("empty range expression"));
        }

        let alternatives = expression
            .split("||")
            .map(|alternative| parse_alternative(alternative, expression))
            .collect::<Result<Vec<_>>>()?;

        Ok(VersionRange {
            expression: expression.to_string(),
            alternatives,
        })
    }

    /// Whether `version` satisfies the range
    pub fn matches(&self, version: &Version) -> bool {
        let version = version.to_semver();
        self.alternatives
            .iter()
            .any(|constraints| constraints.iter().all(|c| c.matches(&version)))
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}

fn parse_alternative(alternative: &str, expression: &str) -> Result<Vec<Constraint>> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending_op: Option<String> = None;

    for token in alternative
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let is_bare_op = matches!(token, ">=" | "<=" | "!=" | "==" | "=" | ">" | "<" | "~" | "^");
        match (pending_op.take(), is_bare_op) {
            (Some(op), false) => tokens.push(format!("{}{}", op, token)),
            (Some(op), true) => {
                return Err(ReleaseError::range(format!(
                    "'{}' - operator '{}' is followed by another operator",
                    expression, op
                )))
            }
            (None, true) => pending_op = Some(token.to_string()),
            (None, false) => tokens.push(token.to_string()),
        }
    }

    if let Some(op) = pending_op {
        return Err(ReleaseError::range(format!(
            "'{}' - operator '{}' has no version",
            expression, op
        )));
    }
    if tokens.is_empty() {
        return Err(ReleaseError::range(format!(
            "'{}' - empty alternative",
            expression
        )));
    }

    tokens
        .iter()
        .map(|token| parse_constraint(token, expression))
        .collect()
}

fn parse_constraint(token: &str, expression: &str) -> Result<Constraint> {
    let captures = comparator_regex()
        .captures(token)
        .ok_or_else(|| {
            ReleaseError::range(format!("'{}' - bad comparator '{}'", expression, token))
        })?;

    let op = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    let raw_version = captures.get(2).map(|m| m.as_str()).unwrap_or("");
    let version = raw_version
        .strip_prefix('v')
        .or_else(|| raw_version.strip_prefix('V'))
        .unwrap_or(raw_version);

    if version.is_empty() {
        return Err(ReleaseError::range(format!(
            "'{}' - comparator '{}' has no version",
            expression, token
        )));
    }

    // semver::Comparator has no form for a bare wildcard
    if matches!(version, "*" | "x" | "X") {
        return match op {
            "" | "=" | "==" => Ok(Constraint::Any),
            _ => Err(ReleaseError::range(format!(
                "'{}' - wildcard '{}' cannot take operator '{}'",
                expression, version, op
            ))),
        };
    }

    let is_wildcard = version.contains(['x', 'X', '*']);
    let (normalized, negate) = match op {
        "" if is_wildcard => (version.to_string(), false),
        "" | "=" | "==" => (format!("={}", version), false),
        "!=" => (format!("={}", version), true),
        other => (format!("{}{}", other, version), false),
    };

    let comparator = semver::Comparator::from_str(&normalized).map_err(|e| {
        ReleaseError::range(format!("'{}' - comparator '{}': {}", expression, token, e))
    })?;

    Ok(if negate {
        Constraint::Excludes(comparator)
    } else {
        Constraint::Matches(comparator)
    })
}

impl FromStr for VersionRange {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        VersionRange::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
