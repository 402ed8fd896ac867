//! Value suggestions for the filter builder.
//!
//! Once a field is picked, the builder asks what kind of values it holds
//! and which ones to offer. Each function here has a [`Row`] form and an
//! accessor form, mirroring [`apply_filters`](crate::apply_filters).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::collate::compare_labels;
use crate::traits::Row;
use crate::value::Value;

/// Upper bound on the number of non-blank values inspected when guessing
/// whether a column is numeric.
const NUMERIC_SAMPLE_SIZE: usize = 10;

/// Share of sampled values that must be numeric.
const NUMERIC_THRESHOLD: f64 = 0.8;

/// Smallest and largest numeric value of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

/// Returns `true` if the first non-blank values of `field` are mostly
/// numeric.
///
/// ```
/// use tablekit_query::is_numeric_column;
/// use serde_json::json;
///
/// let rows = vec![json!({"amount": 100}), json!({"amount": "200"}), json!({"amount": null})];
/// assert!(is_numeric_column(&rows, "amount"));
/// ```
pub fn is_numeric_column<R: Row>(rows: &[R], field: &str) -> bool {
    is_numeric_column_with(rows, field, R::accessor)
}

/// Accessor form of [`is_numeric_column`].
pub fn is_numeric_column_with<T, F>(items: &[T], field: &str, accessor: F) -> bool
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    if field.is_empty() || items.is_empty() {
        return false;
    }

    let sample_size = NUMERIC_SAMPLE_SIZE.min(items.len());
    let mut sampled = 0usize;
    let mut numeric = 0usize;

    for item in items {
        if sampled >= sample_size {
            break;
        }
        let value = accessor(item, field);
        if value.is_blank() {
            continue;
        }
        sampled += 1;
        if is_numeric(&value) {
            numeric += 1;
        }
    }

    sampled > 0 && numeric as f64 / sampled as f64 >= NUMERIC_THRESHOLD
}

/// Returns the numeric range of `field`, or `None` when the column is not
/// numeric or holds no numeric value.
///
/// ```
/// use tablekit_query::{numeric_range, NumericRange};
/// use serde_json::json;
///
/// let rows = vec![json!({"amount": 100}), json!({"amount": 50}), json!({"amount": 200})];
/// assert_eq!(numeric_range(&rows, "amount"), Some(NumericRange { min: 50.0, max: 200.0 }));
/// ```
pub fn numeric_range<R: Row>(rows: &[R], field: &str) -> Option<NumericRange> {
    numeric_range_with(rows, field, R::accessor)
}

/// Accessor form of [`numeric_range`].
pub fn numeric_range_with<T, F>(items: &[T], field: &str, accessor: F) -> Option<NumericRange>
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    if !is_numeric_column_with(items, field, &accessor) {
        return None;
    }

    let mut range: Option<NumericRange> = None;
    for item in items {
        let value = accessor(item, field);
        if value.is_blank() {
            continue;
        }
        let n = value.to_number();
        if n.is_nan() {
            continue;
        }
        range = Some(match range {
            None => NumericRange { min: n, max: n },
            Some(r) => NumericRange {
                min: r.min.min(n),
                max: r.max.max(n),
            },
        });
    }
    range
}

/// Returns the distinct text forms of the non-blank values of `field`,
/// sorted case- and accent-insensitively.
///
/// ```
/// use tablekit_query::column_values;
/// use serde_json::json;
///
/// let rows = vec![json!({"s": "Pending"}), json!({"s": "Active"}), json!({"s": "Active"})];
/// assert_eq!(column_values(&rows, "s"), vec!["Active", "Pending"]);
/// ```
pub fn column_values<R: Row>(rows: &[R], field: &str) -> Vec<String> {
    column_values_with(rows, field, R::accessor)
}

/// Accessor form of [`column_values`].
pub fn column_values_with<T, F>(items: &[T], field: &str, accessor: F) -> Vec<String>
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    if field.is_empty() {
        return Vec::new();
    }

    let unique: BTreeSet<String> = items
        .iter()
        .map(|item| accessor(item, field))
        .filter(|value| !value.is_blank())
        .map(|value| value.to_text().into_owned())
        .collect();

    let mut values: Vec<String> = unique.into_iter().collect();
    values.sort_by(|a, b| compare_labels(a, b));
    values
}

fn is_numeric(value: &Value<'_>) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(_) => !value.to_number().is_nan(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn rows(field: &str, values: Vec<Json>) -> Vec<Json> {
        values.into_iter().map(|v| json!({ field: v })).collect()
    }

    #[test]
    fn numeric_column_detection() {
        assert!(is_numeric_column(&rows("a", vec![json!(100), json!(200), json!(300)]), "a"));
        assert!(is_numeric_column(&rows("a", vec![json!("100"), json!("200")]), "a"));
        assert!(is_numeric_column(&rows("a", vec![json!(100), json!("200"), json!(300)]), "a"));
        assert!(!is_numeric_column(
            &rows("a", vec![json!("Alice"), json!("Bob"), json!("Charlie")]),
            "a"
        ));
    }

    #[test]
    fn numeric_threshold() {
        let below = rows(
            "v",
            vec![json!("Alice"), json!("Bob"), json!(100), json!("Charlie"), json!("Dave")],
        );
        assert!(!is_numeric_column(&below, "v"));

        let at = rows(
            "v",
            vec![json!(100), json!(200), json!(300), json!(400), json!("N/A")],
        );
        assert!(is_numeric_column(&at, "v"));
    }

    #[test]
    fn numeric_column_degenerate_inputs() {
        let empty: Vec<Json> = Vec::new();
        assert!(!is_numeric_column(&empty, "amount"));
        assert!(!is_numeric_column(&rows("amount", vec![json!(100)]), ""));
        assert!(!is_numeric_column(&rows("amount", vec![json!(null), json!("")]), "amount"));
    }

    #[test]
    fn numeric_column_skips_blanks() {
        let data = vec![
            json!({"amount": null}),
            json!({}),
            json!({"amount": 100}),
            json!({"amount": 200}),
        ];
        assert!(is_numeric_column(&data, "amount"));
    }

    #[test]
    fn numeric_column_samples_first_ten() {
        let data: Vec<Json> = (0..100)
            .map(|i| {
                if i < 10 {
                    json!({"amount": 100})
                } else {
                    json!({"amount": "text"})
                }
            })
            .collect();
        assert!(is_numeric_column(&data, "amount"));
    }

    #[test]
    fn whitespace_reads_as_zero() {
        let data = rows("a", vec![json!("  "), json!(40), json!("15")]);
        assert!(is_numeric_column(&data, "a"));
        assert_eq!(
            numeric_range(&data, "a"),
            Some(NumericRange { min: 0.0, max: 40.0 })
        );
    }

    #[test]
    fn booleans_are_not_numeric() {
        assert!(!is_numeric_column(&rows("f", vec![json!(true), json!(false)]), "f"));
    }

    #[test]
    fn range_of_numbers() {
        let range = |values| numeric_range(&rows("a", values), "a");

        assert_eq!(
            range(vec![json!(100), json!(50), json!(200)]),
            Some(NumericRange { min: 50.0, max: 200.0 })
        );
        assert_eq!(
            range(vec![json!("100"), json!("50"), json!("200")]),
            Some(NumericRange { min: 50.0, max: 200.0 })
        );
        assert_eq!(
            range(vec![json!(-50), json!(0), json!(100)]),
            Some(NumericRange { min: -50.0, max: 100.0 })
        );
        assert_eq!(
            range(vec![json!(100)]),
            Some(NumericRange { min: 100.0, max: 100.0 })
        );
        assert_eq!(
            range(vec![json!(1.5), json!(2.7), json!(0.3)]),
            Some(NumericRange { min: 0.3, max: 2.7 })
        );
        assert_eq!(
            range(vec![json!(null), json!(100), json!(null), json!(200)]),
            Some(NumericRange { min: 100.0, max: 200.0 })
        );
    }

    #[test]
    fn range_none_cases() {
        let empty: Vec<Json> = Vec::new();
        assert_eq!(numeric_range(&empty, "a"), None);
        assert_eq!(numeric_range(&rows("a", vec![json!(1)]), ""), None);
        assert_eq!(
            numeric_range(&rows("a", vec![json!("Alice"), json!("Bob")]), "a"),
            None
        );
    }

    #[test]
    fn range_ignores_unparsable_values_in_numeric_column() {
        let data = rows(
            "v",
            vec![json!(100), json!(200), json!(300), json!(400), json!("N/A")],
        );
        assert_eq!(
            numeric_range(&data, "v"),
            Some(NumericRange { min: 100.0, max: 400.0 })
        );
    }

    #[test]
    fn values_unique_and_sorted() {
        let data = rows("s", vec![json!("Active"), json!("Pending"), json!("Active")]);
        assert_eq!(column_values(&data, "s"), vec!["Active", "Pending"]);

        let data = rows("n", vec![json!("Zara"), json!("Alice"), json!("bob")]);
        assert_eq!(column_values(&data, "n"), vec!["Alice", "bob", "Zara"]);
    }

    #[test]
    fn values_use_text_form() {
        let data = rows("a", vec![json!(100), json!(200), json!(100), json!(false)]);
        assert_eq!(column_values(&data, "a"), vec!["100", "200", "false"]);
    }

    #[test]
    fn values_skip_blanks_and_degenerate_inputs() {
        let data = rows("s", vec![json!(null), json!(""), json!("x")]);
        assert_eq!(column_values(&data, "s"), vec!["x"]);
        assert!(column_values(&data, "").is_empty());

        let empty: Vec<Json> = Vec::new();
        assert!(column_values(&empty, "s").is_empty());
    }

    #[test]
    fn accessor_forms() {
        struct Item {
            price: f64,
        }
        fn accessor<'a>(item: &'a Item, field: &str) -> Value<'a> {
            match field {
                "price" => Value::Number(item.price.into()),
                _ => Value::None,
            }
        }

        let items = vec![Item { price: 9.5 }, Item { price: 2.0 }];
        assert!(is_numeric_column_with(&items, "price", accessor));
        assert_eq!(
            numeric_range_with(&items, "price", accessor),
            Some(NumericRange { min: 2.0, max: 9.5 })
        );
        assert_eq!(column_values_with(&items, "price", accessor), vec!["2", "9.5"]);
        assert!(column_values_with(&items, "missing", accessor).is_empty());
    }
}
