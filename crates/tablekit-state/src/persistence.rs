//! Typed load/save of table state under a storage key prefix.
//!
//! Each piece of state lives under its own key, `{prefix}_{suffix}`, as a
//! JSON string. Loads never fail: a missing key yields the default, and
//! unreadable storage or corrupt JSON yields the default with a warning.
//! Saves report errors to the caller.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tablekit_query::{ColumnOrderMode, FilterCondition, FilterLogic};

use crate::error::Result;
use crate::store::StateStore;
use crate::types::{Pagination, SortConfig, TableState};

const COLUMN_VISIBILITY: &str = "column_visibility";
const COLUMN_SIZING: &str = "column_sizing";
const COLUMN_FILTERS: &str = "column_filters";
const COLUMN_ORDER: &str = "column_order";
const SORTING: &str = "sorting";
const PAGINATION: &str = "pagination";
const FILTER_COLUMN_ORDER_MODE: &str = "filter_column_order_mode";
const FILTER_LOGIC: &str = "filter_logic";

/// Every suffix written by [`TableStateStore`].
pub const STATE_SUFFIXES: [&str; 8] = [
    COLUMN_VISIBILITY,
    COLUMN_SIZING,
    COLUMN_FILTERS,
    COLUMN_ORDER,
    SORTING,
    PAGINATION,
    FILTER_COLUMN_ORDER_MODE,
    FILTER_LOGIC,
];

/// Table state bound to a store and a storage key prefix.
///
/// # Example
///
/// ```
/// use tablekit_state::{MemoryStore, TableStateStore};
/// use tablekit_query::ColumnOrderMode;
///
/// let state = TableStateStore::new(MemoryStore::new(), "orders");
/// assert_eq!(state.load_filter_column_order_mode(), ColumnOrderMode::Definition);
///
/// state.save_filter_column_order_mode(ColumnOrderMode::Ui).unwrap();
/// assert_eq!(state.load_filter_column_order_mode(), ColumnOrderMode::Ui);
/// ```
#[derive(Debug, Clone)]
pub struct TableStateStore<S> {
    store: S,
    prefix: String,
}

impl<S: StateStore> TableStateStore<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// The storage key prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The full storage key for a suffix.
    pub fn key_for(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    // ========================================================================
    // Column layout
    // ========================================================================

    pub fn load_column_visibility(&self) -> BTreeMap<String, bool> {
        self.load(COLUMN_VISIBILITY, BTreeMap::new())
    }

    pub fn save_column_visibility(&self, visibility: &BTreeMap<String, bool>) -> Result<()> {
        self.save(COLUMN_VISIBILITY, visibility)
    }

    pub fn load_column_sizing(&self) -> BTreeMap<String, f64> {
        self.load(COLUMN_SIZING, BTreeMap::new())
    }

    pub fn save_column_sizing(&self, sizing: &BTreeMap<String, f64>) -> Result<()> {
        self.save(COLUMN_SIZING, sizing)
    }

    pub fn load_column_order(&self) -> Vec<String> {
        self.load(COLUMN_ORDER, Vec::new())
    }

    pub fn save_column_order(&self, order: &[String]) -> Result<()> {
        self.save(COLUMN_ORDER, order)
    }

    // ========================================================================
    // Filtering and sorting
    // ========================================================================

    pub fn load_column_filters(&self) -> Vec<FilterCondition> {
        self.load(COLUMN_FILTERS, Vec::new())
    }

    pub fn save_column_filters(&self, filters: &[FilterCondition]) -> Result<()> {
        self.save(COLUMN_FILTERS, filters)
    }

    pub fn load_filter_logic(&self) -> FilterLogic {
        self.load(FILTER_LOGIC, FilterLogic::default())
    }

    pub fn save_filter_logic(&self, logic: FilterLogic) -> Result<()> {
        self.save(FILTER_LOGIC, &logic)
    }

    /// Load the order of the columns offered by the filter builder.
    pub fn load_filter_column_order_mode(&self) -> ColumnOrderMode {
        self.load(FILTER_COLUMN_ORDER_MODE, ColumnOrderMode::default())
    }

    pub fn save_filter_column_order_mode(&self, mode: ColumnOrderMode) -> Result<()> {
        self.save(FILTER_COLUMN_ORDER_MODE, &mode)
    }

    pub fn load_sorting(&self) -> Vec<SortConfig> {
        self.load(SORTING, Vec::new())
    }

    pub fn save_sorting(&self, sorting: &[SortConfig]) -> Result<()> {
        self.save(SORTING, sorting)
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Load the page position, defaulting to the first page of
    /// `default_page_size` rows.
    pub fn load_pagination(&self, default_page_size: usize) -> Pagination {
        self.load(PAGINATION, Pagination::first_page(default_page_size))
    }

    pub fn save_pagination(&self, pagination: Pagination) -> Result<()> {
        self.save(PAGINATION, &pagination)
    }

    // ========================================================================
    // Whole state
    // ========================================================================

    /// Load every piece of state.
    pub fn load_all(&self, default_page_size: usize) -> TableState {
        TableState {
            column_visibility: self.load_column_visibility(),
            column_order: self.load_column_order(),
            column_sizing: self.load_column_sizing(),
            column_filters: self.load_column_filters(),
            sorting: self.load_sorting(),
            pagination: self.load_pagination(default_page_size),
            filter_column_order_mode: self.load_filter_column_order_mode(),
            filter_logic: self.load_filter_logic(),
        }
    }

    /// Save every piece of state, stopping at the first failure.
    pub fn save_all(&self, state: &TableState) -> Result<()> {
        self.save_column_visibility(&state.column_visibility)?;
        self.save_column_order(&state.column_order)?;
        self.save_column_sizing(&state.column_sizing)?;
        self.save_column_filters(&state.column_filters)?;
        self.save_sorting(&state.sorting)?;
        self.save_pagination(state.pagination)?;
        self.save_filter_column_order_mode(state.filter_column_order_mode)?;
        self.save_filter_logic(state.filter_logic)
    }

    /// Remove every key this table writes.
    pub fn clear(&self) -> Result<()> {
        for suffix in STATE_SUFFIXES {
            self.store.remove(&self.key_for(suffix))?;
        }
        tracing::debug!(prefix = %self.prefix, "Cleared table state");
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, suffix: &str, default: T) -> T {
        let key = self.key_for(suffix);

        let raw = match self.store.get(&key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read table state; using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Corrupt table state; using default");
                default
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, suffix: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(&self.key_for(suffix), &json)
    }
}
