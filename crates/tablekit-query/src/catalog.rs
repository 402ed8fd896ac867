//! Operator catalog: which operators each column data type offers.

use serde::Serialize;

use crate::op::{ColumnDataType, FilterOperator};

/// An operator choice as shown in a filter builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorOption {
    /// The operator.
    #[serde(rename = "value")]
    pub operator: FilterOperator,
    /// Its display label.
    pub label: &'static str,
}

impl OperatorOption {
    const fn new(operator: FilterOperator, label: &'static str) -> Self {
        OperatorOption { operator, label }
    }
}

use FilterOperator as F;

const TEXT_OPERATORS: &[OperatorOption] = &[
    OperatorOption::new(F::Equals, "equals"),
    OperatorOption::new(F::NotEquals, "does not equal"),
    OperatorOption::new(F::Contains, "contains"),
    OperatorOption::new(F::NotContains, "does not contain"),
    OperatorOption::new(F::StartsWith, "starts with"),
    OperatorOption::new(F::EndsWith, "ends with"),
    OperatorOption::new(F::IsEmpty, "is empty"),
    OperatorOption::new(F::IsNotEmpty, "is not empty"),
];

const NUMBER_OPERATORS: &[OperatorOption] = &[
    OperatorOption::new(F::Equals, "equals"),
    OperatorOption::new(F::NotEquals, "does not equal"),
    OperatorOption::new(F::GreaterThan, ">"),
    OperatorOption::new(F::LessThan, "<"),
    OperatorOption::new(F::GreaterOrEqual, ">="),
    OperatorOption::new(F::LessOrEqual, "<="),
    OperatorOption::new(F::IsEmpty, "is empty"),
    OperatorOption::new(F::IsNotEmpty, "is not empty"),
];

const DATE_OPERATORS: &[OperatorOption] = &[
    OperatorOption::new(F::Equals, "equals"),
    OperatorOption::new(F::NotEquals, "does not equal"),
    OperatorOption::new(F::IsBefore, "is before"),
    OperatorOption::new(F::IsAfter, "is after"),
    OperatorOption::new(F::IsEmpty, "is empty"),
    OperatorOption::new(F::IsNotEmpty, "is not empty"),
];

const BOOLEAN_OPERATORS: &[OperatorOption] = &[
    OperatorOption::new(F::Equals, "equals"),
    OperatorOption::new(F::IsEmpty, "is empty"),
    OperatorOption::new(F::IsNotEmpty, "is not empty"),
];

const SELECT_OPERATORS: &[OperatorOption] = &[
    OperatorOption::new(F::Equals, "equals"),
    OperatorOption::new(F::NotEquals, "does not equal"),
    OperatorOption::new(F::IsEmpty, "is empty"),
    OperatorOption::new(F::IsNotEmpty, "is not empty"),
];

/// Returns the ordered operator choices permitted for a column data type.
///
/// ```
/// use tablekit_query::{operators_for_type, ColumnDataType, FilterOperator};
///
/// let ops = operators_for_type(ColumnDataType::Boolean);
/// assert_eq!(ops.len(), 3);
/// assert_eq!(ops[0].operator, FilterOperator::Equals);
/// ```
pub fn operators_for_type(data_type: ColumnDataType) -> &'static [OperatorOption] {
    match data_type {
        ColumnDataType::Text => TEXT_OPERATORS,
        ColumnDataType::Number => NUMBER_OPERATORS,
        ColumnDataType::Date => DATE_OPERATORS,
        ColumnDataType::Boolean => BOOLEAN_OPERATORS,
        ColumnDataType::Select => SELECT_OPERATORS,
    }
}
