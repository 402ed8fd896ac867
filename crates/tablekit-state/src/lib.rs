//! Tablekit state - persistence and configuration for table UI state.
//!
//! The [`tablekit_query`] engine is stateless. This crate holds what a table
//! remembers between sessions and how it is configured:
//!
//! - [`StateStore`]: a string key-value seam with [`MemoryStore`],
//!   [`FileStore`] and [`NullStore`] backends.
//! - [`TableStateStore`]: typed load/save of column visibility, sizing and
//!   order, filters, sorting, pagination, the filter builder's column order
//!   mode and filter logic, under a caller-chosen key prefix.
//! - [`TableConfig`]: declarative defaults read from JSON or YAML, with
//!   merging, validation, view presets and built-in [`presets`].
//!
//! # Persistence
//!
//! ```rust
//! use tablekit_state::{FileStore, TableStateStore};
//! use tablekit_query::{FilterCondition, FilterOperator};
//!
//! let dir = std::env::temp_dir().join("tablekit-doc-example");
//! let state = TableStateStore::new(FileStore::new(&dir), "orders");
//!
//! let filters = vec![FilterCondition::new("status", FilterOperator::Equals, "active")];
//! state.save_column_filters(&filters).unwrap();
//! assert_eq!(state.load_column_filters(), filters);
//!
//! state.clear().unwrap();
//! assert!(state.load_column_filters().is_empty());
//! ```
//!
//! Loading never fails. Missing keys yield defaults; unreadable storage and
//! corrupt values yield defaults and log a `tracing` warning naming the key.

mod config;
mod error;
mod persistence;
mod store;
mod types;

// Re-export public API
pub use config::{presets, PaginationConfig, PinnedColumns, TableConfig, ViewPreset};
pub use error::{Result, StateError};
pub use persistence::{TableStateStore, STATE_SUFFIXES};
pub use store::{FileStore, MemoryStore, NullStore, StateStore};
pub use types::{Pagination, SortConfig, SortDirection, TableState, DEFAULT_PAGE_SIZE};
