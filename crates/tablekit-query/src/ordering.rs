//! Column display ordering.
//!
//! Provides [`ColumnOrderMode`] for the three ordering policies, the
//! [`ColumnMeta`] trait through which columns expose their identifier and
//! label, and [`order_columns`] which applies a policy.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collate::compare_labels;
use crate::error::QueryError;

/// Policy governing the displayed sequence of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnOrderMode {
    /// Declaration order.
    #[default]
    Definition,
    /// The user-arranged order persisted by the UI.
    Ui,
    /// Alphabetical by display label.
    Alphabetical,
}

impl ColumnOrderMode {
    /// Returns the next mode in the cycle definition → ui → alphabetical.
    pub fn next(self) -> Self {
        match self {
            ColumnOrderMode::Definition => ColumnOrderMode::Ui,
            ColumnOrderMode::Ui => ColumnOrderMode::Alphabetical,
            ColumnOrderMode::Alphabetical => ColumnOrderMode::Definition,
        }
    }

    /// Returns the wire name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnOrderMode::Definition => "definition",
            ColumnOrderMode::Ui => "ui",
            ColumnOrderMode::Alphabetical => "alphabetical",
        }
    }
}

impl std::fmt::Display for ColumnOrderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnOrderMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "definition" => Ok(ColumnOrderMode::Definition),
            "ui" => Ok(ColumnOrderMode::Ui),
            "alphabetical" => Ok(ColumnOrderMode::Alphabetical),
            other => Err(QueryError::UnknownOrderMode(other.to_string())),
        }
    }
}

/// Identifier and label sources of a column.
///
/// Empty strings count as absent, so an empty accessor key falls back to
/// the explicit id, and an empty header falls back to the identifier.
pub trait ColumnMeta {
    /// The key the column reads from each row, if any.
    fn accessor_key(&self) -> Option<&str>;

    /// The explicit column id, if any.
    fn explicit_id(&self) -> Option<&str>;

    /// The header text, if any.
    fn header(&self) -> Option<&str>;

    /// Returns the accessor key, else the explicit id, else `""`.
    fn column_id(&self) -> &str {
        non_empty(self.accessor_key())
            .or_else(|| non_empty(self.explicit_id()))
            .unwrap_or("")
    }

    /// Returns the header, else the column id.
    fn column_label(&self) -> &str {
        non_empty(self.header()).unwrap_or_else(|| self.column_id())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// A column definition as handed over by the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Row key this column reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor_key: Option<String>,
    /// Explicit column id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Header text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl ColumnDef {
    /// Creates a column reading `accessor_key`, with no header.
    pub fn accessor(accessor_key: impl Into<String>) -> Self {
        ColumnDef {
            accessor_key: Some(accessor_key.into()),
            ..ColumnDef::default()
        }
    }

    /// Creates a column with an explicit id and no accessor key.
    pub fn with_id(id: impl Into<String>) -> Self {
        ColumnDef {
            id: Some(id.into()),
            ..ColumnDef::default()
        }
    }

    /// Sets the header text.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

impl ColumnMeta for ColumnDef {
    fn accessor_key(&self) -> Option<&str> {
        self.accessor_key.as_deref()
    }

    fn explicit_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }
}

/// Orders columns under `mode`, leaving the input untouched.
///
/// - `Definition` keeps declaration order.
/// - `Alphabetical` sorts by label, ignoring case and accents.
/// - `Ui` sorts by position in `ui_order`; columns missing from it follow
///   all present ones, in their original relative order.
///
/// ```
/// use tablekit_query::{order_columns, ColumnDef, ColumnMeta, ColumnOrderMode};
///
/// let columns = vec![
///     ColumnDef::accessor("name").header("Name"),
///     ColumnDef::accessor("age"),
///     ColumnDef::accessor("email").header("Email Address"),
/// ];
///
/// let ordered = order_columns(&columns, ColumnOrderMode::Alphabetical, &[] as &[&str]);
/// let ids: Vec<_> = ordered.iter().map(|c| c.column_id()).collect();
/// assert_eq!(ids, vec!["age", "email", "name"]);
/// ```
pub fn order_columns<'a, C, S>(
    columns: &'a [C],
    mode: ColumnOrderMode,
    ui_order: &[S],
) -> Vec<&'a C>
where
    C: ColumnMeta,
    S: AsRef<str>,
{
    let mut ordered: Vec<&'a C> = columns.iter().collect();

    match mode {
        ColumnOrderMode::Definition => {}
        ColumnOrderMode::Alphabetical => {
            ordered.sort_by(|a, b| compare_labels(a.column_label(), b.column_label()));
        }
        ColumnOrderMode::Ui => {
            let mut positions: HashMap<&str, usize> = HashMap::with_capacity(ui_order.len());
            for (index, id) in ui_order.iter().enumerate() {
                positions.entry(id.as_ref()).or_insert(index);
            }
            ordered.sort_by_key(|column| {
                positions
                    .get(column.column_id())
                    .copied()
                    .unwrap_or(usize::MAX)
            });
        }
    }

    ordered
}
