//! Tablekit query engine - filtering, fuzzy search and column ordering for
//! interactive data tables.
//!
//! The engine is pure and stateless. It takes rows, filter conditions and
//! column definitions from a UI layer and answers the questions a table
//! widget asks:
//!
//! - Which operators does a column of this data type offer?
//! - Which rows pass the current filter conditions?
//! - Which field names match what the user typed, best first?
//! - Which characters of a field name should be highlighted?
//! - In which order should the columns be listed?
//!
//! # Quick Start
//!
//! ```rust
//! use tablekit_query::{apply_filters, FilterCondition, FilterLogic, FilterOperator};
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"name": "Alice", "status": "Active", "amount": 100}),
//!     json!({"name": "Bob", "status": "Pending", "amount": 200}),
//!     json!({"name": "Eve", "status": "Active", "amount": 300}),
//! ];
//!
//! let conditions = vec![
//!     FilterCondition::new("status", FilterOperator::Equals, "active"),
//!     FilterCondition::new("amount", FilterOperator::GreaterThan, 150),
//! ];
//!
//! let both = apply_filters(&rows, &conditions, FilterLogic::And);
//! assert_eq!(both.len(), 1);
//!
//! let either = apply_filters(&rows, &conditions, FilterLogic::Or);
//! assert_eq!(either.len(), 3);
//! ```
//!
//! # Filter Semantics
//!
//! ```text
//! conditions empty or all inert   => every row passes
//! And                             => row passes every active condition
//! Or                              => row passes at least one active condition
//! ```
//!
//! A condition is inert when its field is empty, or when its operator needs
//! a value and the value is blank. Evaluation never fails: values that
//! cannot be read as numbers or dates simply don't match. For numeric
//! operators a null or blank field reads as zero, while a missing field
//! never matches.
//!
//! # Operators by Data Type
//!
//! | Type | Operators |
//! |------|-----------|
//! | text | `equals`, `not_equals`, `contains`, `not_contains`, `starts_with`, `ends_with`, `is_empty`, `is_not_empty` |
//! | number | `equals`, `not_equals`, `greater_than`, `less_than`, `greater_or_equal`, `less_or_equal`, `is_empty`, `is_not_empty` |
//! | date | `equals`, `not_equals`, `is_before`, `is_after`, `is_empty`, `is_not_empty` |
//! | boolean | `equals`, `is_empty`, `is_not_empty` |
//! | select | `equals`, `not_equals`, `is_empty`, `is_not_empty` |
//!
//! # Reading Rows
//!
//! Rows are read through the [`Row`] trait, implemented for JSON objects and
//! maps of [`CellValue`]. Every row-taking function also has a `*_with` form
//! that takes an accessor function, so plain structs work without a trait
//! impl:
//!
//! ```rust
//! use tablekit_query::{
//!     apply_filters_with, CellValue, FilterCondition, FilterLogic, FilterOperator, Value,
//! };
//!
//! struct Task {
//!     title: String,
//!     done: bool,
//! }
//!
//! fn accessor<'a>(task: &'a Task, field: &str) -> Value<'a> {
//!     match field {
//!         "title" => Value::String(&task.title),
//!         "done" => Value::Bool(task.done),
//!         _ => Value::None,
//!     }
//! }
//!
//! let tasks = vec![
//!     Task { title: "Write docs".into(), done: false },
//!     Task { title: "Fix bug".into(), done: true },
//! ];
//!
//! let open = [FilterCondition::new("done", FilterOperator::IsEmpty, CellValue::Null)];
//! let results = apply_filters_with(&tasks, &open, FilterLogic::And, accessor);
//! assert_eq!(results[0].title, "Write docs");
//! ```
//!
//! # Fuzzy Search
//!
//! ```rust
//! use tablekit_query::{fuzzy_search, highlight_matches};
//!
//! let fields = ["Status", "Created Date", "Description"];
//! let results = fuzzy_search("cd", &fields, None);
//! assert_eq!(results[0].text, "Created Date");
//!
//! let segments = highlight_matches(&results[0].text, &results[0].matched_indices);
//! assert_eq!(segments[0].text, "C");
//! assert!(segments[0].is_match);
//! ```

mod catalog;
mod collate;
mod condition;
mod error;
mod filter;
mod fuzzy;
mod highlight;
mod op;
mod ordering;
mod suggest;
mod traits;
mod value;

// Re-export public API
pub use catalog::{operators_for_type, OperatorOption};
pub use collate::compare_labels;
pub use condition::FilterCondition;
pub use error::{QueryError, Result};
pub use filter::{apply_filters, apply_filters_with, FilterSet};
pub use fuzzy::{fuzzy_match, fuzzy_search, FuzzyMatch};
pub use highlight::{highlight_matches, HighlightSegment};
pub use op::{ColumnDataType, FilterLogic, FilterOperator};
pub use ordering::{order_columns, ColumnDef, ColumnMeta, ColumnOrderMode};
pub use suggest::{
    column_values, column_values_with, is_numeric_column, is_numeric_column_with, numeric_range,
    numeric_range_with, NumericRange,
};
pub use traits::Row;
pub use value::{CellValue, Number, Timestamp, Value};
