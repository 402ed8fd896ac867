//! Filter operators, combination logic and column data types.
//!
//! The [`FilterOperator`] enum defines every comparison a filter condition
//! can make, organized by family. Which operators a column offers is decided
//! by its [`ColumnDataType`] (see [`operators_for_type`](crate::operators_for_type)),
//! but evaluation accepts any operator against any value.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Comparison operator for a filter condition.
///
/// Operators are grouped by family:
/// - **Equality**: `Equals`, `NotEquals`
/// - **Text**: `Contains`, `NotContains`, `StartsWith`, `EndsWith`
/// - **Emptiness**: `IsEmpty`, `IsNotEmpty`
/// - **Numeric**: `GreaterThan`, `LessThan`, `GreaterOrEqual`, `LessOrEqual`
/// - **Date**: `IsBefore`, `IsAfter`
///
/// `Unrecognized` is only produced when deserializing an operator name this
/// version does not know. It always evaluates to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    // Equality
    /// Case-insensitive text equality.
    Equals,
    /// Case-insensitive text inequality.
    NotEquals,

    // Text
    /// Value contains the filter text.
    Contains,
    /// Value does not contain the filter text.
    NotContains,
    /// Value starts with the filter text.
    StartsWith,
    /// Value ends with the filter text.
    EndsWith,

    // Emptiness
    /// Value is missing, blank, zero or false.
    IsEmpty,
    /// Value is present and not blank.
    IsNotEmpty,

    // Numeric
    /// Greater than.
    GreaterThan,
    /// Less than.
    LessThan,
    /// Greater than or equal.
    GreaterOrEqual,
    /// Less than or equal.
    LessOrEqual,

    // Date
    /// Strictly earlier than.
    IsBefore,
    /// Strictly later than.
    IsAfter,

    /// Operator name not known to this version.
    #[serde(other)]
    Unrecognized,
}

impl FilterOperator {
    /// Every known operator, in catalog order.
    pub const ALL: [FilterOperator; 14] = [
        FilterOperator::Equals,
        FilterOperator::NotEquals,
        FilterOperator::Contains,
        FilterOperator::NotContains,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::IsEmpty,
        FilterOperator::IsNotEmpty,
        FilterOperator::GreaterThan,
        FilterOperator::LessThan,
        FilterOperator::GreaterOrEqual,
        FilterOperator::LessOrEqual,
        FilterOperator::IsBefore,
        FilterOperator::IsAfter,
    ];

    /// Returns `true` for the operators that compare lower-cased text.
    pub fn is_text_op(self) -> bool {
        matches!(
            self,
            FilterOperator::Equals
                | FilterOperator::NotEquals
                | FilterOperator::Contains
                | FilterOperator::NotContains
                | FilterOperator::StartsWith
                | FilterOperator::EndsWith
        )
    }

    /// Returns `true` for `IsEmpty` and `IsNotEmpty`.
    pub fn is_emptiness_op(self) -> bool {
        matches!(self, FilterOperator::IsEmpty | FilterOperator::IsNotEmpty)
    }

    /// Returns `true` for the numeric comparison operators.
    pub fn is_numeric_op(self) -> bool {
        matches!(
            self,
            FilterOperator::GreaterThan
                | FilterOperator::LessThan
                | FilterOperator::GreaterOrEqual
                | FilterOperator::LessOrEqual
        )
    }

    /// Returns `true` for the date comparison operators.
    pub fn is_date_op(self) -> bool {
        matches!(self, FilterOperator::IsBefore | FilterOperator::IsAfter)
    }

    /// Returns `true` if conditions using this operator need a comparison value.
    ///
    /// Emptiness operators only need a field.
    pub fn requires_value(self) -> bool {
        !self.is_emptiness_op()
    }

    /// Returns the human-readable label shown in operator pickers.
    pub fn label(self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "does not equal",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "does not contain",
            FilterOperator::StartsWith => "starts with",
            FilterOperator::EndsWith => "ends with",
            FilterOperator::IsEmpty => "is empty",
            FilterOperator::IsNotEmpty => "is not empty",
            FilterOperator::GreaterThan => ">",
            FilterOperator::LessThan => "<",
            FilterOperator::GreaterOrEqual => ">=",
            FilterOperator::LessOrEqual => "<=",
            FilterOperator::IsBefore => "is before",
            FilterOperator::IsAfter => "is after",
            FilterOperator::Unrecognized => "unrecognized",
        }
    }

    /// Returns the wire name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "not_equals",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "not_contains",
            FilterOperator::StartsWith => "starts_with",
            FilterOperator::EndsWith => "ends_with",
            FilterOperator::IsEmpty => "is_empty",
            FilterOperator::IsNotEmpty => "is_not_empty",
            FilterOperator::GreaterThan => "greater_than",
            FilterOperator::LessThan => "less_than",
            FilterOperator::GreaterOrEqual => "greater_or_equal",
            FilterOperator::LessOrEqual => "less_or_equal",
            FilterOperator::IsBefore => "is_before",
            FilterOperator::IsAfter => "is_after",
            FilterOperator::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

/// How the conditions of one filter pass are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterLogic {
    /// Every condition must pass.
    #[default]
    And,
    /// At least one condition must pass.
    Or,
}

impl FilterLogic {
    /// Returns the wire name of this logic.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterLogic::And => "and",
            FilterLogic::Or => "or",
        }
    }
}

impl std::fmt::Display for FilterLogic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterLogic {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(FilterLogic::And),
            "or" => Ok(FilterLogic::Or),
            other => Err(QueryError::UnknownLogic(other.to_string())),
        }
    }
}

/// Logical data type of a column, used to pick the operators it offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDataType {
    /// Free text (the default).
    #[default]
    Text,
    /// Numeric values.
    Number,
    /// Calendar dates.
    Date,
    /// True/false values.
    Boolean,
    /// One of a fixed set of options.
    Select,
}

impl ColumnDataType {
    /// Returns the wire name of this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnDataType::Text => "text",
            ColumnDataType::Number => "number",
            ColumnDataType::Date => "date",
            ColumnDataType::Boolean => "boolean",
            ColumnDataType::Select => "select",
        }
    }

    /// Resolves an optional type name, falling back to `Text` for unknown
    /// or omitted names.
    pub fn from_name(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }
}

impl std::fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnDataType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ColumnDataType::Text),
            "number" => Ok(ColumnDataType::Number),
            "date" => Ok(ColumnDataType::Date),
            "boolean" => Ok(ColumnDataType::Boolean),
            "select" => Ok(ColumnDataType::Select),
            other => Err(QueryError::UnknownDataType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_families() {
        assert!(FilterOperator::Contains.is_text_op());
        assert!(FilterOperator::Equals.is_text_op());
        assert!(!FilterOperator::GreaterThan.is_text_op());

        assert!(FilterOperator::IsEmpty.is_emptiness_op());
        assert!(!FilterOperator::IsEmpty.requires_value());
        assert!(FilterOperator::Equals.requires_value());

        assert!(FilterOperator::LessOrEqual.is_numeric_op());
        assert!(!FilterOperator::IsBefore.is_numeric_op());

        assert!(FilterOperator::IsAfter.is_date_op());
        assert!(!FilterOperator::Unrecognized.is_date_op());
    }

    #[test]
    fn operator_names_round_trip() {
        for op in FilterOperator::ALL {
            assert_eq!(op.as_str().parse::<FilterOperator>(), Ok(op));
        }
        assert_eq!(
            "between".parse::<FilterOperator>(),
            Err(QueryError::UnknownOperator("between".to_string()))
        );
    }

    #[test]
    fn operator_serde_names() {
        let json = serde_json::to_string(&FilterOperator::GreaterOrEqual).unwrap();
        assert_eq!(json, "\"greater_or_equal\"");

        let op: FilterOperator = serde_json::from_str("\"not_contains\"").unwrap();
        assert_eq!(op, FilterOperator::NotContains);
    }

    #[test]
    fn unknown_operator_deserializes_as_unrecognized() {
        let op: FilterOperator = serde_json::from_str("\"matches_regex\"").unwrap();
        assert_eq!(op, FilterOperator::Unrecognized);
    }

    #[test]
    fn logic_parsing() {
        assert_eq!("and".parse::<FilterLogic>(), Ok(FilterLogic::And));
        assert_eq!("or".parse::<FilterLogic>(), Ok(FilterLogic::Or));
        assert!("xor".parse::<FilterLogic>().is_err());
        assert_eq!(FilterLogic::default(), FilterLogic::And);
        assert_eq!(FilterLogic::Or.to_string(), "or");
    }

    #[test]
    fn data_type_lenient_names() {
        assert_eq!(ColumnDataType::from_name(Some("date")), ColumnDataType::Date);
        assert_eq!(ColumnDataType::from_name(Some("unknown")), ColumnDataType::Text);
        assert_eq!(ColumnDataType::from_name(None), ColumnDataType::Text);
        assert!("currency".parse::<ColumnDataType>().is_err());
    }
}
