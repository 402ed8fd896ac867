//! Declarative table configuration.
//!
//! A [`TableConfig`] describes a table's starting state: which columns are
//! shown and in what order, their widths, pinned columns, default filters
//! and sorting, and pagination. Configs are read from JSON or YAML, can be
//! layered with [`TableConfig::merge`], and may carry named view presets.
//!
//! ```
//! use tablekit_state::TableConfig;
//!
//! let config = TableConfig::from_yaml(r#"
//! id: orders
//! version: "1.0.0"
//! defaultColumnOrder: [id, customer, amount]
//! pagination:
//!   pageSize: 25
//! "#).unwrap();
//!
//! config.validate().unwrap();
//! let state = config.initial_state();
//! assert_eq!(state.pagination.page_size, 25);
//! assert_eq!(state.column_order, vec!["id", "customer", "amount"]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tablekit_query::FilterCondition;

use crate::error::{Result, StateError};
use crate::types::{Pagination, SortConfig, TableState, DEFAULT_PAGE_SIZE};

/// Columns pinned to either edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedColumns {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Vec<String>>,
}

/// Page size and the sizes offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size_options: Option<Vec<usize>>,
}

/// A named partial config layered over the base config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPreset {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub config: TableConfig,
}

/// Table configuration. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_visible_columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_column_order: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_column_sizing: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_columns: Option<PinnedColumns>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_filters: Option<Vec<FilterCondition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sorting: Option<Vec<SortConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<ViewPreset>>,
}

impl TableConfig {
    /// Create a config with just an id and version.
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the config is usable. Only a non-empty `id` is required.
    pub fn validate(&self) -> Result<()> {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => Ok(()),
            _ => Err(StateError::invalid("missing id")),
        }
    }

    /// Whether [`validate`](Self::validate) would succeed.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Layer configs left to right over `{id: "merged", version: "1.0.0"}`.
    ///
    /// The merge is shallow: each field present in a later config replaces
    /// the whole field of the result, lists and maps included.
    pub fn merge<'a>(configs: impl IntoIterator<Item = &'a TableConfig>) -> TableConfig {
        let mut merged = TableConfig::new("merged", "1.0.0");
        for config in configs {
            merged.overlay(config);
        }
        merged
    }

    /// Return this config with the named preset layered on top.
    pub fn with_preset(&self, preset_id: &str) -> Result<TableConfig> {
        let preset = self
            .presets
            .iter()
            .flatten()
            .find(|p| p.id == preset_id)
            .ok_or_else(|| StateError::UnknownPreset(preset_id.to_string()))?;

        let mut config = self.clone();
        config.overlay(&preset.config);
        Ok(config)
    }

    /// The page size to start with.
    pub fn page_size(&self) -> usize {
        self.pagination
            .as_ref()
            .map(|p| p.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Build the state a table starts in under this config.
    pub fn initial_state(&self) -> TableState {
        let column_visibility = self
            .default_visible_columns
            .iter()
            .flatten()
            .map(|column| (column.clone(), true))
            .collect();

        TableState {
            column_visibility,
            column_order: self.default_column_order.clone().unwrap_or_default(),
            column_sizing: self.default_column_sizing.clone().unwrap_or_default(),
            column_filters: self.default_filters.clone().unwrap_or_default(),
            sorting: self.default_sorting.clone().unwrap_or_default(),
            pagination: Pagination::first_page(self.page_size()),
            ..TableState::default()
        }
    }

    fn overlay(&mut self, other: &TableConfig) {
        fn take<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
            if source.is_some() {
                target.clone_from(source);
            }
        }

        take(&mut self.id, &other.id);
        take(&mut self.version, &other.version);
        take(&mut self.default_visible_columns, &other.default_visible_columns);
        take(&mut self.default_column_order, &other.default_column_order);
        take(&mut self.default_column_sizing, &other.default_column_sizing);
        take(&mut self.pinned_columns, &other.pinned_columns);
        take(&mut self.default_filters, &other.default_filters);
        take(&mut self.default_sorting, &other.default_sorting);
        take(&mut self.pagination, &other.pagination);
        take(&mut self.presets, &other.presets);
    }
}

/// Built-in configs for common table roles.
pub mod presets {
    use super::{PaginationConfig, TableConfig};

    fn with_pagination(id: &str, page_size: usize, options: &[usize]) -> TableConfig {
        TableConfig {
            pagination: Some(PaginationConfig {
                page_size,
                page_size_options: Some(options.to_vec()),
            }),
            ..TableConfig::new(id, "1.0.0")
        }
    }

    /// Small pages for summary widgets.
    pub fn dashboard() -> TableConfig {
        with_pagination("dashboard", 10, &[10, 25, 50])
    }

    /// Large pages for data exploration.
    pub fn data_grid() -> TableConfig {
        with_pagination("data-grid", 50, &[25, 50, 100, 200])
    }

    /// Medium pages for read-only listings.
    pub fn readonly() -> TableConfig {
        with_pagination("readonly", 25, &[25, 50, 100])
    }

    /// Look up a built-in config by id.
    pub fn builtin(id: &str) -> Option<TableConfig> {
        match id {
            "dashboard" => Some(dashboard()),
            "data-grid" => Some(data_grid()),
            "readonly" => Some(readonly()),
            _ => None,
        }
    }
}
