//! Filter conditions and their evaluation.
//!
//! A [`FilterCondition`] is one row-level predicate: a field name, an
//! operator, and a comparison value. Evaluation never fails. Operand
//! coercion follows the rules on [`Value`]: text operators compare
//! lower-cased text forms, numeric operators compare numeric forms under
//! IEEE-754 rules (NaN never compares), and date operators require both
//! sides to parse as dates.

use serde::{Deserialize, Serialize};

use crate::op::FilterOperator;
use crate::value::{CellValue, Value};

/// A single filter predicate.
///
/// # Example
///
/// ```
/// use tablekit_query::{FilterCondition, FilterOperator, Value};
///
/// let condition = FilterCondition::new("status", FilterOperator::Contains, "act");
/// assert!(condition.evaluate(&Value::String("Active")));
/// assert!(!condition.evaluate(&Value::None));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Opaque identifier assigned by the caller.
    #[serde(default)]
    pub id: String,
    /// The row field to read.
    #[serde(default)]
    pub field: String,
    /// The comparison operator.
    pub operator: FilterOperator,
    /// The value to compare against.
    #[serde(default)]
    pub value: CellValue,
}

impl FilterCondition {
    /// Creates a condition with an empty id.
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<CellValue>,
    ) -> Self {
        FilterCondition {
            id: String::new(),
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Sets the condition id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns `true` if this condition takes part in filtering.
    ///
    /// A condition is inert when its field is empty, or when its operator
    /// needs a comparison value and the value is blank.
    pub fn is_active(&self) -> bool {
        if self.field.is_empty() {
            return false;
        }
        !self.operator.requires_value() || !self.value.is_blank()
    }

    /// Evaluates this condition against a row value.
    pub fn evaluate(&self, row_value: &Value<'_>) -> bool {
        let filter_value = self.value.as_value();

        match self.operator {
            FilterOperator::Equals
            | FilterOperator::NotEquals
            | FilterOperator::Contains
            | FilterOperator::NotContains
            | FilterOperator::StartsWith
            | FilterOperator::EndsWith => self.match_text(row_value, &filter_value),

            FilterOperator::IsEmpty => is_empty(row_value),
            FilterOperator::IsNotEmpty => !is_empty(row_value),

            FilterOperator::GreaterThan
            | FilterOperator::LessThan
            | FilterOperator::GreaterOrEqual
            | FilterOperator::LessOrEqual => self.match_number(row_value, &filter_value),

            FilterOperator::IsBefore | FilterOperator::IsAfter => {
                self.match_date(row_value, &filter_value)
            }

            // Unknown operators pass rather than hide rows.
            FilterOperator::Unrecognized => true,
        }
    }

    fn match_text(&self, row_value: &Value<'_>, filter_value: &Value<'_>) -> bool {
        let row = row_value.to_text().to_lowercase();
        let filter = filter_value.to_text().to_lowercase();

        match self.operator {
            FilterOperator::Equals => row == filter,
            FilterOperator::NotEquals => row != filter,
            FilterOperator::Contains => row.contains(&filter),
            FilterOperator::NotContains => !row.contains(&filter),
            FilterOperator::StartsWith => row.starts_with(&filter),
            FilterOperator::EndsWith => row.ends_with(&filter),
            _ => true,
        }
    }

    fn match_number(&self, row_value: &Value<'_>, filter_value: &Value<'_>) -> bool {
        let row = row_value.to_number();
        let filter = filter_value.to_number();

        // Every comparison involving NaN is false.
        match self.operator {
            FilterOperator::GreaterThan => row > filter,
            FilterOperator::LessThan => row < filter,
            FilterOperator::GreaterOrEqual => row >= filter,
            FilterOperator::LessOrEqual => row <= filter,
            _ => true,
        }
    }

    fn match_date(&self, row_value: &Value<'_>, filter_value: &Value<'_>) -> bool {
        let (Some(row), Some(filter)) = (row_value.to_timestamp(), filter_value.to_timestamp())
        else {
            return false;
        };

        match self.operator {
            FilterOperator::IsBefore => row < filter,
            FilterOperator::IsAfter => row > filter,
            _ => true,
        }
    }
}

fn is_empty(value: &Value<'_>) -> bool {
    value.is_falsy() || value.to_text().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    fn cond(operator: FilterOperator, value: impl Into<CellValue>) -> FilterCondition {
        FilterCondition::new("field", operator, value).with_id("1")
    }

    #[test]
    fn text_equality_ignores_case() {
        let c = cond(FilterOperator::Equals, "active");
        assert!(c.evaluate(&Value::String("Active")));
        assert!(!c.evaluate(&Value::String("Inactive")));

        let c = cond(FilterOperator::NotEquals, "active");
        assert!(!c.evaluate(&Value::String("ACTIVE")));
        assert!(c.evaluate(&Value::String("pending")));
    }

    #[test]
    fn text_substring_operators() {
        let contains = cond(FilterOperator::Contains, "LLO");
        assert!(contains.evaluate(&Value::String("hello")));
        assert!(!contains.evaluate(&Value::String("helo")));

        let not_contains = cond(FilterOperator::NotContains, "llo");
        assert!(not_contains.evaluate(&Value::String("helo")));
        assert!(!not_contains.evaluate(&Value::String("hello")));

        let starts = cond(FilterOperator::StartsWith, "hel");
        assert!(starts.evaluate(&Value::String("Hello world")));
        assert!(!starts.evaluate(&Value::String("say hello")));

        let ends = cond(FilterOperator::EndsWith, "World");
        assert!(ends.evaluate(&Value::String("hello world")));
        assert!(!ends.evaluate(&Value::String("world!")));
    }

    #[test]
    fn text_operators_coerce_non_strings() {
        let c = cond(FilterOperator::Equals, "42");
        assert!(c.evaluate(&Value::Number(Number::I64(42))));

        let c = cond(FilterOperator::Equals, "0");
        assert!(c.evaluate(&Value::Number(Number::I64(0))));

        let c = cond(FilterOperator::Equals, true);
        assert!(c.evaluate(&Value::String("TRUE")));

        // A missing value reads as the empty string.
        let c = cond(FilterOperator::Contains, "x");
        assert!(!c.evaluate(&Value::None));
        let c = cond(FilterOperator::NotContains, "x");
        assert!(c.evaluate(&Value::None));
    }

    #[test]
    fn contains_is_reflexive() {
        for text in ["", "abc", "Mixed Case", "ß"] {
            let c = cond(FilterOperator::Contains, text);
            assert!(c.evaluate(&Value::String(text)));
        }
    }

    #[test]
    fn emptiness() {
        let empty = cond(FilterOperator::IsEmpty, CellValue::Null);
        assert!(empty.evaluate(&Value::None));
        assert!(empty.evaluate(&Value::String("")));
        assert!(empty.evaluate(&Value::Number(Number::I64(0))));
        assert!(empty.evaluate(&Value::Bool(false)));
        assert!(!empty.evaluate(&Value::String(" ")));
        assert!(!empty.evaluate(&Value::Number(Number::F64(0.5))));

        let not_empty = cond(FilterOperator::IsNotEmpty, CellValue::Null);
        assert!(not_empty.evaluate(&Value::String("x")));
        assert!(not_empty.evaluate(&Value::Timestamp(Timestamp(0))));
        assert!(!not_empty.evaluate(&Value::None));
        assert!(!not_empty.evaluate(&Value::Bool(false)));
    }

    #[test]
    fn numeric_comparisons() {
        let gt = cond(FilterOperator::GreaterThan, 2i64);
        assert!(gt.evaluate(&Value::Number(Number::I64(3))));
        assert!(!gt.evaluate(&Value::Number(Number::I64(2))));
        assert!(gt.evaluate(&Value::String("10")));

        let gte = cond(FilterOperator::GreaterOrEqual, "2");
        assert!(gte.evaluate(&Value::Number(Number::F64(2.0))));
        assert!(!gte.evaluate(&Value::Number(Number::U64(1))));

        let lt = cond(FilterOperator::LessThan, 2.5f64);
        assert!(lt.evaluate(&Value::Number(Number::I64(2))));
        assert!(!lt.evaluate(&Value::Number(Number::I64(3))));

        let lte = cond(FilterOperator::LessOrEqual, 2i64);
        assert!(lte.evaluate(&Value::Number(Number::I64(2))));
        assert!(lte.evaluate(&Value::Bool(true)));
    }

    #[test]
    fn numeric_comparisons_against_nan_are_false() {
        for op in [
            FilterOperator::GreaterThan,
            FilterOperator::LessThan,
            FilterOperator::GreaterOrEqual,
            FilterOperator::LessOrEqual,
        ] {
            let c = cond(op, 5i64);
            assert!(!c.evaluate(&Value::String("abc")), "{op}");
            assert!(!c.evaluate(&Value::None), "{op}");

            let c = cond(op, "not a number");
            assert!(!c.evaluate(&Value::Number(Number::I64(5))), "{op}");
        }
    }

    #[test]
    fn null_and_blank_rows_compare_as_zero() {
        let lt = cond(FilterOperator::LessThan, 5i64);
        assert!(lt.evaluate(&Value::Null));
        assert!(lt.evaluate(&Value::String("")));
        assert!(lt.evaluate(&Value::String("   ")));

        let gte = cond(FilterOperator::GreaterOrEqual, 0i64);
        assert!(gte.evaluate(&Value::Null));
        assert!(gte.evaluate(&Value::String(" ")));

        let gt = cond(FilterOperator::GreaterThan, 0i64);
        assert!(!gt.evaluate(&Value::Null));

        // Only a missing field is NaN.
        assert!(!lt.evaluate(&Value::None));
        assert!(!gte.evaluate(&Value::None));
    }

    #[test]
    fn is_before() {
        let c = cond(FilterOperator::IsBefore, "2024-06-15");
        assert!(c.evaluate(&Value::String("2024-06-01")));
        assert!(!c.evaluate(&Value::String("2024-06-20")));
        assert!(!c.evaluate(&Value::String("2024-06-15")));
        assert!(!c.evaluate(&Value::String("not-a-date")));
        assert!(!c.evaluate(&Value::None));

        let bad_filter = cond(FilterOperator::IsBefore, "not-a-date");
        assert!(!bad_filter.evaluate(&Value::String("2024-06-01")));
    }

    #[test]
    fn is_after() {
        let c = cond(FilterOperator::IsAfter, "2024-06-15");
        assert!(c.evaluate(&Value::String("2024-06-20")));
        assert!(!c.evaluate(&Value::String("2024-06-01")));
        assert!(!c.evaluate(&Value::String("2024-06-15")));
    }

    #[test]
    fn date_values_and_timestamps_mix() {
        let filter = Timestamp::parse("2024-06-15").unwrap();
        let row = Timestamp::parse("2024-06-20").unwrap();

        let c = cond(FilterOperator::IsAfter, filter);
        assert!(c.evaluate(&Value::Timestamp(row)));
        assert!(c.evaluate(&Value::String("2024-06-20T08:00:00Z")));
    }

    #[test]
    fn unrecognized_operator_passes() {
        let c = cond(FilterOperator::Unrecognized, "anything");
        assert!(c.evaluate(&Value::None));
        assert!(c.evaluate(&Value::String("x")));
    }

    #[test]
    fn active_conditions() {
        assert!(cond(FilterOperator::Equals, "x").is_active());
        assert!(cond(FilterOperator::Equals, 0i64).is_active());
        assert!(!cond(FilterOperator::Equals, "").is_active());
        assert!(!cond(FilterOperator::Equals, CellValue::Null).is_active());
        assert!(cond(FilterOperator::IsEmpty, CellValue::Null).is_active());
        assert!(!FilterCondition::new("", FilterOperator::IsEmpty, CellValue::Null).is_active());
    }

    #[test]
    fn deserializes_from_ui_json() {
        let c: FilterCondition = serde_json::from_value(serde_json::json!({
            "id": "filter-1",
            "field": "amount",
            "operator": "greater_than",
            "value": 100
        }))
        .unwrap();
        assert_eq!(c.operator, FilterOperator::GreaterThan);
        assert_eq!(c.value, CellValue::Number(Number::I64(100)));

        let partial: FilterCondition =
            serde_json::from_value(serde_json::json!({"operator": "is_empty"})).unwrap();
        assert_eq!(partial.field, "");
        assert!(!partial.is_active());
    }
}
