//! Type-driven value generation for the datagen table source.
//!
//! The [`GeneratorRegistry`] turns a [`TableSchema`](datagen_core::TableSchema)
//! into a [`GeneratorTree`]: one generator per column, mirroring the column
//! type at every depth. The [`RowAssembler`] owns that tree together with a
//! random source and produces one [`Row`](datagen_core::Row) per call.
//!
//! # Example
//!
//! ```rust
//! use datagen_core::TableSchema;
//! use datagen_generator::{GeneratorRegistry, RowAssembler};
//!
//! let schema = TableSchema::from_declared("t", &[("f0", "CHAR(1)"), ("f15", "INT ARRAY")]).unwrap();
//! let tree = GeneratorRegistry::default().build(&schema).unwrap();
//! let mut assembler = RowAssembler::new(tree, Some(42));
//!
//! let row = assembler.produce_row();
//! assert_eq!(row.len(), 2);
//! ```

pub mod assembler;
pub mod error;
pub mod generators;
pub mod options;
pub mod registry;

pub use assembler::RowAssembler;
pub use error::{GeneratorError, UnsupportedTypeError};
pub use generators::{Generator, ValueGenerator};
pub use options::{FieldOptions, GeneratorOptions};
pub use registry::{ColumnGenerator, GeneratorRegistry, GeneratorTree};
