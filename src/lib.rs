//! datagen: a synthetic row-generating table source.
//!
//! The library side of the `datagen` binary. The workspace crates carry the
//! engine; this crate adds the output writers used by the CLI.
//!
//! - [`datagen_core`] - type tree, type strings, table schemas, values
//! - [`datagen_generator`] - value generators, registry, row assembler
//! - [`datagen_source`] - row budget, limit push-down, producer, explain

pub mod output;

pub use datagen_core::{DataType, Row, RowConverter, TableSchema, Value};
pub use datagen_source::{push_down_limit, DatagenSource, SourceError, SupportsLimitPushDown};
pub use output::{write_rows, OutputError, OutputFormat, WriteMetrics};
