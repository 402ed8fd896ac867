//! Persisted table UI state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tablekit_query::{ColumnOrderMode, FilterCondition, FilterLogic};

/// Page size used when neither the caller nor a config names one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One entry of a multi-column sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Current page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Pagination {
    /// First page with the given size.
    pub fn first_page(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first_page(DEFAULT_PAGE_SIZE)
    }
}

/// Everything a table persists between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableState {
    /// Column id to visibility. Unlisted columns are visible.
    pub column_visibility: BTreeMap<String, bool>,
    /// User-arranged column ids.
    pub column_order: Vec<String>,
    /// Column id to width.
    pub column_sizing: BTreeMap<String, f64>,
    pub column_filters: Vec<FilterCondition>,
    pub sorting: Vec<SortConfig>,
    pub pagination: Pagination,
    /// Order of the columns offered by the filter builder.
    pub filter_column_order_mode: ColumnOrderMode,
    pub filter_logic: FilterLogic,
}
