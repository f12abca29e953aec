use thiserror::Error;

/// Top-level error type returned by finder parsing and dispatch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FinderError {
    /// The model declares no schema fields, so finders cannot be validated.
    #[error("attempting to use dynamic finders without a schema. Please define one")]
    MissingSchema,

    /// A finder segment referenced a field the schema does not declare.
    #[error("querying invalid field: {field}. Please fix the query or update the schema")]
    UnknownField { field: String },

    /// The identifier named no field at all (empty, or empty after stripping
    /// its modifiers).
    #[error("finder '{identifier}' does not name any field")]
    InvalidFinder { identifier: String },

    /// Fewer positional arguments were supplied than the finder has clauses.
    #[error("finder takes {expected} argument(s) but {supplied} were supplied")]
    ArgumentCount { expected: usize, supplied: usize },

    /// An `OrFail` finder executed and matched nothing.
    #[error("no models found")]
    NotFound,
}

/// Convenience alias for fallible finder operations.
pub type FinderResult<T> = Result<T, FinderError>;
