//! Contracts consumed from the external query-builder collaborator.
//!
//! This crate never executes queries. It speaks to the underlying builder
//! through [`FinderQuery`] and hands the "error when nothing matched"
//! obligation back to the caller as a [`NotFoundGuard`] whenever the builder
//! has no native hook for it.

use serde_json::Value;

use crate::errors::{FinderError, FinderResult};

/// The query-builder surface finders are applied to.
///
/// Both filter methods mutate the builder in place; identity is preserved so
/// callers can keep chaining on the same instance afterwards.
pub trait FinderQuery {
    /// AND-conjunction filter.
    fn and_where(&mut self, field: &str, value: Value);

    /// OR-conjunction filter.
    fn or_where(&mut self, field: &str, value: Value);

    /// Arm the builder's native "error when the query matches nothing"
    /// behavior, when it has one.
    ///
    /// Returns `true` when the builder took ownership of the check. The
    /// default declines, in which case the finder layer returns an armed
    /// [`NotFoundGuard`] for the caller to run over the eventual result.
    fn fail_if_not_found(&mut self) -> bool {
        false
    }
}

/// Emptiness contract over executed query results.
///
/// An empty sequence and a null/zero scalar both count as "nothing found",
/// matching the post-execution rule `OrFail` finders arm.
pub trait ResultSet {
    fn is_empty_result(&self) -> bool;
}

impl<T> ResultSet for Vec<T> {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

impl<T> ResultSet for &[T] {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

impl<T> ResultSet for Option<T> {
    fn is_empty_result(&self) -> bool {
        self.is_none()
    }
}

impl ResultSet for u64 {
    fn is_empty_result(&self) -> bool {
        *self == 0
    }
}

impl ResultSet for i64 {
    fn is_empty_result(&self) -> bool {
        *self == 0
    }
}

impl ResultSet for Value {
    fn is_empty_result(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Number(number) => number.as_f64() == Some(0.0),
            _ => false,
        }
    }
}

/// Deferred empty-result check returned by
/// [`FinderHandle::apply`](crate::FinderHandle::apply).
///
/// The guard is armed only when the finder carried the `OrFail` suffix and
/// the builder declined [`FinderQuery::fail_if_not_found`]; a disarmed guard
/// passes every result through untouched. Run the executed result through
/// [`ensure`](Self::ensure) to convert emptiness into
/// [`FinderError::NotFound`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotFoundGuard {
    armed: bool,
}

impl NotFoundGuard {
    pub(crate) const fn armed() -> Self {
        Self { armed: true }
    }

    pub(crate) const fn disarmed() -> Self {
        Self { armed: false }
    }

    /// Whether the caller still owes the post-execution check.
    #[inline]
    pub const fn is_armed(self) -> bool {
        self.armed
    }

    /// Check an executed result, failing with [`FinderError::NotFound`] when
    /// the guard is armed and the result is empty.
    pub fn ensure<R: ResultSet>(self, result: R) -> FinderResult<R> {
        if self.armed && result.is_empty_result() {
            return Err(FinderError::NotFound);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn armed_guard_rejects_empty_results() {
        let guard = NotFoundGuard::armed();
        assert_eq!(guard.ensure(Vec::<u8>::new()), Err(FinderError::NotFound));
        assert_eq!(guard.ensure(None::<u8>), Err(FinderError::NotFound));
        assert_eq!(guard.ensure(0_u64), Err(FinderError::NotFound));
        assert_eq!(guard.ensure(json!(null)), Err(FinderError::NotFound));
        assert_eq!(guard.ensure(json!([])), Err(FinderError::NotFound));
    }

    #[test]
    fn armed_guard_passes_real_results() {
        let guard = NotFoundGuard::armed();
        assert_eq!(guard.ensure(vec![1, 2]), Ok(vec![1, 2]));
        assert_eq!(guard.ensure(Some(7)), Ok(Some(7)));
        assert_eq!(guard.ensure(json!([{ "id": 1 }])), Ok(json!([{ "id": 1 }])));
    }

    #[test]
    fn disarmed_guard_is_a_pass_through() {
        let guard = NotFoundGuard::disarmed();
        assert_eq!(guard.ensure(Vec::<u8>::new()), Ok(Vec::new()));
        assert_eq!(guard.ensure(json!(null)), Ok(json!(null)));
    }
}
