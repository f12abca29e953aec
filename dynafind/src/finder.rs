//! Dispatch adapter: resolve finder identifiers against a schema and apply
//! them to a query builder.
//!
//! The entry point is explicit rather than intercepted: callers hand the
//! identifier to [`Finder::begin`] (or the one-shot [`Finder::find`]) as a
//! string and get back a bound, inspectable [`FinderHandle`]. The handle owns
//! the transient per-access state, so nothing is shared across concurrently
//! in-flight builders.

use serde_json::Value;

use crate::{
    errors::{FinderError, FinderResult},
    parser::{self, Clause, Conjunction, ParsedFinder},
    query::{FinderQuery, NotFoundGuard},
    schema::SchemaView,
};

/// Finder dispatcher bound to one model schema.
///
/// Construction enforces the schema precondition: a model without any
/// declared fields cannot use dynamic finders at all.
///
/// # Examples
///
/// ```
/// use dynafind::{FieldSchema, Finder, MemoryQuery};
/// use serde_json::json;
///
/// let schema = FieldSchema::new("person", ["first_name", "last_name"]);
/// let finder = Finder::new(&schema)?;
///
/// let mut query = MemoryQuery::new([
///     json!({ "first_name": "John", "last_name": "Smith" }),
///     json!({ "first_name": "John", "last_name": "Adams" }),
/// ]);
/// let guard = finder.find(&mut query, "firstNameAndLastName", &[json!("John"), json!("Smith")])?;
///
/// let people = guard.ensure(query.run()?)?;
/// assert_eq!(people.len(), 1);
/// assert_eq!(people[0]["last_name"], json!("Smith"));
/// # Ok::<(), dynafind::FinderError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Finder<'s, S: SchemaView> {
    schema: &'s S,
}

impl<'s, S: SchemaView> Finder<'s, S> {
    /// Bind a dispatcher to a model schema.
    ///
    /// Fails with [`FinderError::MissingSchema`] when the schema declares no
    /// fields, before any identifier is looked at.
    pub fn new(schema: &'s S) -> FinderResult<Self> {
        if schema.is_empty() {
            return Err(FinderError::MissingSchema);
        }
        Ok(Self { schema })
    }

    /// Parse and validate an identifier, returning a bound handle.
    ///
    /// Unknown fields error here, synchronously, before the query is touched.
    pub fn begin(&self, identifier: &str) -> FinderResult<FinderHandle> {
        let parsed = parser::parse(identifier, self.schema)?;
        Ok(FinderHandle {
            identifier: identifier.to_string(),
            parsed,
        })
    }

    /// One-shot convenience: [`begin`](Self::begin) followed by
    /// [`FinderHandle::apply`].
    pub fn find<Q: FinderQuery>(&self, query: &mut Q, identifier: &str, args: &[Value]) -> FinderResult<NotFoundGuard> {
        self.begin(identifier)?.apply(query, args)
    }
}

/// A parsed, validated finder bound to its identifier.
///
/// The handle is an inert value: it can be inspected, cloned, and applied to
/// any number of builders. Application is where arguments are consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderHandle {
    identifier: String,
    parsed: ParsedFinder,
}

impl FinderHandle {
    /// The identifier this handle was parsed from.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Clauses in application order.
    pub fn clauses(&self) -> &[Clause] {
        &self.parsed.clauses
    }

    /// Whether the identifier carried the `OrFail` suffix.
    pub fn requires_result(&self) -> bool {
        self.parsed.require_non_empty
    }

    /// Apply the clauses to a builder, consuming one argument per clause in
    /// clause order.
    ///
    /// The builder is mutated in place and keeps its identity, so callers can
    /// continue chaining on it. When the finder demands a non-empty result,
    /// the builder's native hook is preferred; a builder without one receives
    /// nothing, and the returned [`NotFoundGuard`] comes back armed for the
    /// caller to run over the executed result.
    ///
    /// Supplying fewer arguments than clauses is an error; surplus arguments
    /// are ignored. Nothing is applied on any failure path.
    pub fn apply<Q: FinderQuery>(&self, query: &mut Q, args: &[Value]) -> FinderResult<NotFoundGuard> {
        let expected = self.parsed.clauses.len();
        if args.len() < expected {
            return Err(FinderError::ArgumentCount {
                expected,
                supplied: args.len(),
            });
        }

        let guard = if self.parsed.require_non_empty && !query.fail_if_not_found() {
            NotFoundGuard::armed()
        } else {
            NotFoundGuard::disarmed()
        };

        for (clause, value) in self.parsed.clauses.iter().zip(args) {
            match clause.conjunction {
                Conjunction::And => query.and_where(&clause.field, value.clone()),
                Conjunction::Or => query.or_where(&clause.field, value.clone()),
            }
        }

        Ok(guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSchema;
    use serde_json::json;

    /// Minimal builder recording calls; deliberately has no native
    /// fail-if-not-found hook.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(&'static str, String, Value)>,
    }

    impl FinderQuery for Recorder {
        fn and_where(&mut self, field: &str, value: Value) {
            self.calls.push(("where", field.to_string(), value));
        }

        fn or_where(&mut self, field: &str, value: Value) {
            self.calls.push(("orWhere", field.to_string(), value));
        }
    }

    fn person_schema() -> FieldSchema {
        FieldSchema::new("person", ["first_name", "last_name", "email"])
    }

    #[test]
    fn empty_schema_is_a_configuration_error() {
        let schema = FieldSchema::new("person", Vec::<String>::new());
        assert!(matches!(Finder::new(&schema), Err(FinderError::MissingSchema)));
    }

    #[test]
    fn arguments_bind_to_clauses_in_order() {
        let schema = person_schema();
        let finder = Finder::new(&schema).unwrap();
        let mut query = Recorder::default();

        finder
            .find(
                &mut query,
                "firstNameAndLastNameOrEmail",
                &[json!("John"), json!("Smith"), json!("john@xyz.com")],
            )
            .unwrap();

        assert_eq!(
            query.calls,
            vec![
                ("where", "first_name".to_string(), json!("John")),
                ("where", "last_name".to_string(), json!("Smith")),
                ("orWhere", "email".to_string(), json!("john@xyz.com")),
            ]
        );
    }

    #[test]
    fn too_few_arguments_apply_nothing() {
        let schema = person_schema();
        let finder = Finder::new(&schema).unwrap();
        let mut query = Recorder::default();

        let outcome = finder.find(&mut query, "firstNameAndLastName", &[json!("John")]);
        assert_eq!(
            outcome,
            Err(FinderError::ArgumentCount {
                expected: 2,
                supplied: 1,
            })
        );
        assert!(query.calls.is_empty());
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        let schema = person_schema();
        let finder = Finder::new(&schema).unwrap();
        let mut query = Recorder::default();

        finder
            .find(&mut query, "firstName", &[json!("John"), json!("leftover")])
            .unwrap();
        assert_eq!(query.calls.len(), 1);
    }

    #[test]
    fn unknown_field_leaves_the_query_untouched() {
        let schema = person_schema();
        let finder = Finder::new(&schema).unwrap();
        let mut query = Recorder::default();

        let outcome = finder.find(&mut query, "asdfField", &[json!("x")]);
        assert_eq!(
            outcome,
            Err(FinderError::UnknownField {
                field: "asdf_field".to_string(),
            })
        );
        assert!(query.calls.is_empty());
    }

    #[test]
    fn hookless_builder_receives_an_armed_guard() {
        let schema = person_schema();
        let finder = Finder::new(&schema).unwrap();
        let mut query = Recorder::default();

        let guard = finder.find(&mut query, "firstNameOrFail", &[json!("Jim")]).unwrap();
        assert!(guard.is_armed());
        assert_eq!(guard.ensure(Vec::<Value>::new()), Err(FinderError::NotFound));
    }

    #[test]
    fn handle_exposes_its_parts() {
        let schema = person_schema();
        let finder = Finder::new(&schema).unwrap();

        let handle = finder.begin("orFirstNameOrFail").unwrap();
        assert_eq!(handle.identifier(), "orFirstNameOrFail");
        assert!(handle.requires_result());
        assert_eq!(handle.clauses().len(), 1);
        assert_eq!(handle.clauses()[0].conjunction, Conjunction::Or);
    }
}
