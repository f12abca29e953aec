//! Finder identifier grammar.
//!
//! A finder identifier packs an ordered filter list into a single camelCase
//! name: `firstNameAndLastNameOrEmailOrFail` filters on `first_name` and
//! `last_name`, or alternatively on `email`, and errors when nothing matches.
//!
//! The grammar is fixed and applied in this order:
//!
//! 1. A trailing `OrFail` arms the "error on empty result" behavior and is
//!    stripped.
//! 2. A leading `or` (immediately followed by an uppercase letter) flips the
//!    first clause's conjunction to OR and is stripped.
//! 3. The remainder splits on each `And`/`Or` token that is immediately
//!    followed by an uppercase letter; the token names the conjunction of the
//!    clause *after* it.
//! 4. Each segment is normalized to snake_case and validated against the
//!    model schema under both its snake_case and camelCase spelling.
//!
//! Parsing is pure: no state, no I/O, identical inputs yield identical
//! outputs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{FinderError, FinderResult},
    schema::SchemaView,
};

/// Suffix arming the "error on empty result" behavior, ex. `firstNameOrFail`.
const FAIL_SUFFIX: &str = "OrFail";

static LEADING_OR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^or[A-Z]").unwrap());
static CLAUSE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:And|Or)[A-Z]").unwrap());

/// How a clause combines with the clauses before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }
}

/// One (conjunction, field) filter unit extracted from an identifier.
///
/// `field` is always the normalized snake_case form, even when the schema
/// declared the field in camelCase. At application time each clause consumes
/// exactly one positional argument, in clause order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub conjunction: Conjunction,
    pub field: String,
}

/// Validated parse result for one finder identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFinder {
    /// Clauses in the order they appear in the identifier.
    pub clauses: Vec<Clause>,
    /// Set when the identifier carried the `OrFail` suffix.
    pub require_non_empty: bool,
}

/// Parse a finder identifier against a model schema.
///
/// Returns the ordered clause list plus the `OrFail` flag, or the first
/// validation failure. No partial result is ever produced: an unknown field
/// aborts immediately.
///
/// # Examples
///
/// ```
/// use dynafind::{parse, Conjunction, FieldSchema};
///
/// let schema = FieldSchema::new("person", ["first_name", "last_name"]);
/// let parsed = parse("firstNameAndLastName", &schema).unwrap();
///
/// assert_eq!(parsed.clauses.len(), 2);
/// assert_eq!(parsed.clauses[1].field, "last_name");
/// assert_eq!(parsed.clauses[1].conjunction, Conjunction::And);
/// assert!(!parsed.require_non_empty);
/// ```
pub fn parse(identifier: &str, schema: &impl SchemaView) -> FinderResult<ParsedFinder> {
    let mut remaining = identifier;
    let mut require_non_empty = false;

    if remaining.ends_with(FAIL_SUFFIX) {
        require_non_empty = true;
        remaining = &remaining[..remaining.len() - FAIL_SUFFIX.len()];
    }

    let mut conjunction = Conjunction::And;
    let body = if LEADING_OR.is_match(remaining) {
        conjunction = Conjunction::Or;
        lowercase_first(&remaining[2..])
    } else {
        remaining.to_string()
    };

    if body.is_empty() {
        return Err(FinderError::InvalidFinder {
            identifier: identifier.to_string(),
        });
    }

    let mut clauses = Vec::new();
    let mut segment_start = 0;
    for token in CLAUSE_BOUNDARY.find_iter(&body) {
        let segment = &body[segment_start..token.start()];
        if segment.is_empty() {
            return Err(FinderError::InvalidFinder {
                identifier: identifier.to_string(),
            });
        }
        clauses.push(build_clause(conjunction, segment, schema)?);
        conjunction = if body[token.start()..].starts_with("And") {
            Conjunction::And
        } else {
            Conjunction::Or
        };
        // The uppercase letter that closed the token opens the next segment.
        segment_start = token.end() - 1;
    }
    clauses.push(build_clause(conjunction, &body[segment_start..], schema)?);

    Ok(ParsedFinder {
        clauses,
        require_non_empty,
    })
}

/// Normalize one segment and validate it against the schema.
///
/// Membership is checked under both the snake_case and camelCase spelling;
/// the produced clause always carries the snake_case form.
fn build_clause(conjunction: Conjunction, segment: &str, schema: &impl SchemaView) -> FinderResult<Clause> {
    let camel = lowercase_first(segment);
    let field = to_snake_case(&camel);

    if !schema.has_field(&field) && !schema.has_field(&camel) {
        return Err(FinderError::UnknownField { field });
    }

    Ok(Clause { conjunction, field })
}

fn lowercase_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Insert `_` before each interior uppercase letter and lowercase it,
/// ex. `lastName` → `last_name`.
fn to_snake_case(camel: &str) -> String {
    let mut snake = String::with_capacity(camel.len() + 4);
    for ch in camel.chars() {
        if ch.is_uppercase() {
            snake.push('_');
            snake.extend(ch.to_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}
