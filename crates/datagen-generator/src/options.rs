//! Per-column generator options.

use std::collections::BTreeMap;

/// Overrides for one top-level column (`fields.<column>.*`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOptions {
    /// Lower bound literal for numeric columns
    pub min: Option<String>,
    /// Upper bound literal for numeric columns
    pub max: Option<String>,
    /// Maximum string length or collection size
    pub length: Option<usize>,
    /// Probability of emitting NULL
    pub null_rate: Option<f64>,
}

impl FieldOptions {
    pub fn is_empty(&self) -> bool {
        self == &FieldOptions::default()
    }
}

/// Options consumed while building generator trees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorOptions {
    pub fields: BTreeMap<String, FieldOptions>,
}

impl GeneratorOptions {
    /// Options for `column`, if any were given.
    pub fn field(&self, column: &str) -> Option<&FieldOptions> {
        self.fields.get(column)
    }

    /// Mutable options for `column`, created on first use.
    pub fn field_mut(&mut self, column: &str) -> &mut FieldOptions {
        self.fields.entry(column.to_string()).or_default()
    }
}
