//! In-memory query target.
//!
//! Stands in for the external ORM in tests and examples: rows are JSON
//! objects, filters accumulate through the [`FinderQuery`] contract, and
//! [`run`](MemoryQuery::run) evaluates them with the conventional
//! `where`/`orWhere` grouping — an OR filter starts a new alternative, and a
//! row matches when any alternative matches completely.

use serde_json::Value;

use crate::{
    errors::{FinderError, FinderResult},
    parser::Conjunction,
    query::{FinderQuery, ResultSet},
};

#[derive(Debug, Clone)]
struct Filter {
    conjunction: Conjunction,
    field: String,
    value: Value,
}

/// Chainable in-memory query over JSON rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryQuery {
    rows: Vec<Value>,
    filters: Vec<Filter>,
    fail_if_not_found: bool,
}

impl MemoryQuery {
    /// Build a query over a fixed row set. Rows are JSON objects; anything
    /// else never matches a filter.
    pub fn new(rows: impl IntoIterator<Item = Value>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            filters: Vec::new(),
            fail_if_not_found: false,
        }
    }

    /// Execute the accumulated filters and return the matching rows.
    ///
    /// Honors the armed fail-if-not-found demand: an empty match set becomes
    /// [`FinderError::NotFound`].
    pub fn run(self) -> FinderResult<Vec<Value>> {
        let Self {
            rows,
            filters,
            fail_if_not_found,
        } = self;

        let groups = filter_groups(&filters);
        let matched: Vec<Value> = rows
            .into_iter()
            .filter(|row| groups.is_empty() || groups.iter().any(|group| group_matches(group, row)))
            .collect();

        if fail_if_not_found && matched.is_empty_result() {
            return Err(FinderError::NotFound);
        }
        Ok(matched)
    }
}

/// Split the filter chain into disjunctive groups: each OR filter opens a new
/// group, AND filters extend the current one.
fn filter_groups(filters: &[Filter]) -> Vec<Vec<&Filter>> {
    let mut groups: Vec<Vec<&Filter>> = Vec::new();
    for filter in filters {
        let start_new = groups.is_empty() || filter.conjunction == Conjunction::Or;
        if start_new {
            groups.push(vec![filter]);
        } else if let Some(group) = groups.last_mut() {
            group.push(filter);
        }
    }
    groups
}

fn group_matches(group: &[&Filter], row: &Value) -> bool {
    group.iter().all(|filter| row.get(&filter.field) == Some(&filter.value))
}

impl FinderQuery for MemoryQuery {
    fn and_where(&mut self, field: &str, value: Value) {
        self.filters.push(Filter {
            conjunction: Conjunction::And,
            field: field.to_string(),
            value,
        });
    }

    fn or_where(&mut self, field: &str, value: Value) {
        self.filters.push(Filter {
            conjunction: Conjunction::Or,
            field: field.to_string(),
            value,
        });
    }

    fn fail_if_not_found(&mut self) -> bool {
        self.fail_if_not_found = true;
        true
    }
}
