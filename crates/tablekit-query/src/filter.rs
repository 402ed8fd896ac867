//! Filter combinator.
//!
//! [`FilterSet`] holds a list of conditions and the [`FilterLogic`] that
//! combines them, and runs them over collections. [`apply_filters`] is the
//! one-shot form for borrowed condition lists.
//!
//! A filter pass:
//! 1. With no conditions at all, every row passes.
//! 2. Inert conditions are dropped (see [`FilterCondition::is_active`]).
//! 3. With no active conditions left, every row passes.
//! 4. `And` keeps rows passing every active condition, `Or` keeps rows
//!    passing at least one.
//!
//! Row order is always preserved.

use serde::{Deserialize, Serialize};

use crate::condition::FilterCondition;
use crate::op::{FilterLogic, FilterOperator};
use crate::traits::Row;
use crate::value::{CellValue, Value};

/// A set of conditions combined with one logic.
///
/// # Example
///
/// ```
/// use tablekit_query::{FilterSet, FilterLogic, FilterOperator};
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"name": "Alice", "status": "Active", "amount": 100}),
///     json!({"name": "Bob", "status": "Pending", "amount": 200}),
///     json!({"name": "Eve", "status": "Active", "amount": 300}),
/// ];
///
/// let filters = FilterSet::new()
///     .condition("status", FilterOperator::Equals, "active")
///     .condition("amount", FilterOperator::GreaterThan, 150)
///     .build();
///
/// let results = filters.filter_rows(&rows);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0]["name"], "Eve");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    conditions: Vec<FilterCondition>,
    #[serde(default)]
    logic: FilterLogic,
}

impl FilterSet {
    /// Creates an empty `And` filter set, which passes every row.
    pub fn new() -> Self {
        FilterSet::default()
    }

    /// Creates a filter set from existing conditions.
    pub fn from_conditions(conditions: Vec<FilterCondition>, logic: FilterLogic) -> Self {
        FilterSet { conditions, logic }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the combination logic.
    pub fn logic(mut self, logic: FilterLogic) -> Self {
        self.logic = logic;
        self
    }

    /// Adds a condition built from its parts.
    pub fn condition(
        self,
        field: &str,
        operator: FilterOperator,
        value: impl Into<CellValue>,
    ) -> Self {
        self.push(FilterCondition::new(field, operator, value))
    }

    /// Adds an existing condition.
    pub fn push(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Finalizes the filter set.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns every condition, including inert ones.
    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    /// Returns the combination logic.
    pub fn get_logic(&self) -> FilterLogic {
        self.logic
    }

    /// Returns the conditions that take part in filtering.
    pub fn active_conditions(&self) -> Vec<&FilterCondition> {
        active(&self.conditions)
    }

    /// Returns `true` if no condition is active (every row passes).
    pub fn is_empty(&self) -> bool {
        !self.conditions.iter().any(FilterCondition::is_active)
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single item passes.
    ///
    /// The accessor function extracts field values from the item.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        passes(&self.active_conditions(), self.logic, item, &accessor)
    }

    /// Filters a slice, returning references to passing items in their
    /// original order.
    pub fn filter<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        run(items, &self.active_conditions(), self.logic, &accessor)
    }

    /// Filters rows that expose their own fields.
    pub fn filter_rows<'a, R: Row>(&self, rows: &'a [R]) -> Vec<&'a R> {
        self.filter(rows, R::accessor)
    }

    /// Filters and clones passing items.
    pub fn filter_cloned<T, F>(&self, items: &[T], accessor: F) -> Vec<T>
    where
        T: Clone,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.filter(items, accessor).into_iter().cloned().collect()
    }

    /// Counts the passing items.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let conditions = self.active_conditions();
        items
            .iter()
            .filter(|item| passes(&conditions, self.logic, *item, &accessor))
            .count()
    }
}

/// Filters rows by a list of conditions combined with `logic`.
///
/// Returns references to the passing rows in their original order. An empty
/// condition list, or one where every condition is inert, passes every row.
///
/// ```
/// use tablekit_query::{apply_filters, FilterCondition, FilterLogic, FilterOperator};
/// use serde_json::json;
///
/// let rows = vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 3})];
/// let conditions = [FilterCondition::new("a", FilterOperator::GreaterThan, 2)];
///
/// let results = apply_filters(&rows, &conditions, FilterLogic::And);
/// assert_eq!(results, vec![&json!({"a": 3})]);
/// ```
pub fn apply_filters<'a, R: Row>(
    rows: &'a [R],
    conditions: &[FilterCondition],
    logic: FilterLogic,
) -> Vec<&'a R> {
    apply_filters_with(rows, conditions, logic, R::accessor)
}

/// Filters arbitrary items by a list of conditions, reading fields through
/// `accessor`.
pub fn apply_filters_with<'a, T, F>(
    items: &'a [T],
    conditions: &[FilterCondition],
    logic: FilterLogic,
    accessor: F,
) -> Vec<&'a T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    run(items, &active(conditions), logic, &accessor)
}

fn active(conditions: &[FilterCondition]) -> Vec<&FilterCondition> {
    conditions.iter().filter(|c| c.is_active()).collect()
}

fn run<'a, T, F>(
    items: &'a [T],
    conditions: &[&FilterCondition],
    logic: FilterLogic,
    accessor: &F,
) -> Vec<&'a T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    if conditions.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| passes(conditions, logic, *item, accessor))
        .collect()
}

fn passes<T, F>(
    conditions: &[&FilterCondition],
    logic: FilterLogic,
    item: &T,
    accessor: &F,
) -> bool
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    let check =
        |condition: &&FilterCondition| condition.evaluate(&accessor(item, &condition.field));

    match logic {
        FilterLogic::And => conditions.iter().all(check),
        FilterLogic::Or => conditions.is_empty() || conditions.iter().any(check),
    }
}
