//! Dynamic finder parsing and dispatch for query builders.
//!
//! Decomposes identifiers like `firstNameAndLastNameOrEmailOrFail` into an
//! ordered list of filter clauses, validates every referenced field against
//! the model's schema, and applies the clauses to anything speaking the
//! `where`/`orWhere` contract — consuming one positional argument per clause,
//! in clause order.
//!
//! ```
//! use dynafind::{FieldSchema, Finder, MemoryQuery};
//! use serde_json::json;
//!
//! let schema = FieldSchema::new("person", ["first_name", "last_name", "email"]);
//! let finder = Finder::new(&schema)?;
//!
//! let mut people = MemoryQuery::new([
//!     json!({ "first_name": "John", "last_name": "Smith" }),
//!     json!({ "first_name": "John", "last_name": "Adams" }),
//!     json!({ "first_name": "Jane", "last_name": "Quincy" }),
//! ]);
//!
//! let guard = finder.find(
//!     &mut people,
//!     "firstNameAndLastName",
//!     &[json!("John"), json!("Smith")],
//! )?;
//! let found = guard.ensure(people.run()?)?;
//!
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0]["last_name"], json!("Smith"));
//! # Ok::<(), dynafind::FinderError>(())
//! ```

pub mod errors;
pub mod finder;
pub mod memory;
pub mod parser;
pub mod query;
pub mod schema;

pub use errors::{FinderError, FinderResult};
pub use finder::{Finder, FinderHandle};
pub use memory::MemoryQuery;
pub use parser::{Clause, Conjunction, ParsedFinder, parse};
pub use query::{FinderQuery, NotFoundGuard, ResultSet};
pub use schema::{FieldSchema, SchemaView};
