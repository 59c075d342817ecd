//! Core types for the datagen synthetic table source.
//!
//! This crate provides the foundational types shared by the generator and
//! the source:
//!
//! - [`DataType`] - Closed set of column types, nested to any depth
//! - [`TableSchema`] - Validated, immutable column list plus table options
//! - [`Value`] - Generated values, including nested collections and rows
//! - [`Row`] - One produced row, values in column order
//!
//! # Architecture
//!
//! ```text
//! datagen-core (this crate)
//!    │
//!    ├─── datagen-generator  (value generators, registry, row assembler)
//!    │
//!    └─── datagen-source     (row budget, limit push-down, producer)
//! ```
//!
//! # Example
//!
//! ```rust
//! use datagen_core::{DataType, TableSchema};
//!
//! let schema = TableSchema::from_declared(
//!     "datagen_t",
//!     &[("f0", "CHAR(1)"), ("f18", "ROW<a BIGINT, c ROW<d TIMESTAMP>>")],
//! )
//! .unwrap();
//!
//! assert_eq!(schema.columns()[0].column_type, DataType::char(1));
//! ```

pub mod parser;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{ColumnDefinition, SchemaError, TableSchema};
pub use types::{DataType, RowField};
pub use values::{DecimalValue, Row, RowConverter, Value};
