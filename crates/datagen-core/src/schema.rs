//! Table schema definitions for the datagen source.
//!
//! A `TableSchema` is the immutable column list of one datagen table together
//! with its identifier and the raw `WITH (...)` style options. It is built
//! once, validated, and never mutated afterwards.
//!
//! ## YAML format
//!
//! ```yaml
//! name: datagen_t
//! columns:
//!   - name: f0
//!     type: CHAR(1)
//!   - name: f4
//!     type:
//!       type: decimal
//!       precision: 32
//!       scale: 2
//! options:
//!   number-of-rows: 10
//! ```

use crate::types::{default_nullable, DataType};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Malformed type string
    #[error("Invalid type '{input}': {message}")]
    InvalidType { input: String, message: String },

    /// Type kind the source does not know
    #[error("Unsupported type kind: {0}")]
    UnsupportedKind(String),

    /// Type parameters out of range
    #[error("Invalid parameters for {type_name}: {message}")]
    InvalidParameter { type_name: String, message: String },

    /// Table declares no columns
    #[error("Table '{0}' declares no columns")]
    NoColumns(String),

    /// Column or field with an empty name
    #[error("Column and field names must not be empty")]
    EmptyName,

    /// Column declared twice
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// ROW field declared twice
    #[error("Duplicate ROW field: {0}")]
    DuplicateField(String),
}

// ============================================================================
// Columns
// ============================================================================

/// Column definition: name, type and nullability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: DataType,

    /// Whether this column may hold NULL
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

impl ColumnDefinition {
    /// Create a new nullable column definition.
    pub fn new(name: impl Into<String>, column_type: DataType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
        }
    }

    /// Create a new NOT NULL column definition.
    pub fn not_null(name: impl Into<String>, column_type: DataType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
        }
    }
}

// ============================================================================
// Tables
// ============================================================================

fn default_catalog() -> String {
    "default_catalog".to_string()
}

fn default_database() -> String {
    "default_database".to_string()
}

/// Validated, immutable schema of one datagen table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSchema {
    /// Catalog the table is registered in
    #[serde(default = "default_catalog")]
    catalog: String,

    /// Database the table is registered in
    #[serde(default = "default_database")]
    database: String,

    /// Table name
    name: String,

    /// Top-level columns in declaration order
    columns: Vec<ColumnDefinition>,

    /// Table options (`number-of-rows`, `fields.<column>.<key>`, ...)
    #[serde(default, deserialize_with = "deserialize_options")]
    options: BTreeMap<String, String>,
}

impl TableSchema {
    /// Create and validate a table schema.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<ColumnDefinition>,
    ) -> Result<Self, SchemaError> {
        let schema = Self {
            catalog: default_catalog(),
            database: default_database(),
            name: name.into(),
            columns,
            options: BTreeMap::new(),
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Create a table schema from `(column name, type string)` pairs.
    ///
    /// ```rust
    /// use datagen_core::TableSchema;
    ///
    /// let schema = TableSchema::from_declared(
    ///     "datagen_t",
    ///     &[("f0", "CHAR(1)"), ("f1", "MAP<STRING, DATE>")],
    /// )
    /// .unwrap();
    /// assert_eq!(schema.column_names(), vec!["f0", "f1"]);
    /// ```
    pub fn from_declared(name: impl Into<String>, columns: &[(&str, &str)]) -> Result<Self, SchemaError> {
        let columns = columns
            .iter()
            .map(|(column, declared)| Ok(ColumnDefinition::new(*column, declared.parse()?)))
            .collect::<Result<Vec<_>, SchemaError>>()?;
        Self::new(name, columns)
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let schema: TableSchema = serde_yaml::from_str(yaml)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Register the table under another catalog and database.
    pub fn with_catalog(mut self, catalog: impl Into<String>, database: impl Into<String>) -> Self {
        self.catalog = catalog.into();
        self.database = database.into();
        self
    }

    /// Add a table option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.name.clone()));
            }
            column.column_type.validate()?;
        }
        Ok(())
    }

    /// Catalog name.
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level columns in declaration order.
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Raw table options.
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }
}

// Option values are strings, but YAML users write `number-of-rows: 10`
fn deserialize_options<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw: BTreeMap<String, serde_yaml::Value> = BTreeMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(D::Error::custom(format!(
                        "option '{key}' must be a scalar, got {other:?}"
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowField;

    const SAMPLE_SCHEMA: &str = r#"
name: datagen_t
columns:
  - name: f0
    type: CHAR(1)
  - name: f4
    type:
      type: decimal
      precision: 32
      scale: 2
    nullable: false
  - name: f18
    type: ROW<a BIGINT, b TIME, c ROW<d TIMESTAMP>>
options:
  number-of-rows: 10
  fields.f4.min: "-5.5"
"#;

    #[test]
    fn test_parse_table_schema() {
        let schema = TableSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        assert_eq!(schema.catalog(), "default_catalog");
        assert_eq!(schema.database(), "default_database");
        assert_eq!(schema.name(), "datagen_t");
        assert_eq!(schema.column_names(), vec!["f0", "f4", "f18"]);

        let f4 = schema.column("f4").unwrap();
        assert_eq!(f4.column_type, DataType::decimal(32, 2));
        assert!(!f4.nullable);
        assert!(schema.column("f0").unwrap().nullable);

        assert_eq!(
            schema.options().get("number-of-rows").map(String::as_str),
            Some("10")
        );
        assert_eq!(
            schema.options().get("fields.f4.min").map(String::as_str),
            Some("-5.5")
        );
    }

    #[test]
    fn test_from_declared() {
        let schema = TableSchema::from_declared(
            "t",
            &[("f15", "INT ARRAY"), ("f16", "MAP<STRING, DATE>")],
        )
        .unwrap();

        assert_eq!(
            schema.column("f15").unwrap().column_type,
            DataType::array(DataType::Int)
        );
        assert_eq!(
            schema.column("f16").unwrap().column_type,
            DataType::map(DataType::string(), DataType::Date)
        );
    }

    #[test]
    fn test_rejects_empty_table() {
        let result = TableSchema::new("t", vec![]);
        assert!(matches!(result, Err(SchemaError::NoColumns(name)) if name == "t"));
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let result = TableSchema::new(
            "t",
            vec![
                ColumnDefinition::new("a", DataType::Int),
                ColumnDefinition::new("a", DataType::BigInt),
            ],
        );
        assert!(matches!(result, Err(SchemaError::DuplicateColumn(name)) if name == "a"));
    }

    #[test]
    fn test_rejects_invalid_nested_parameters() {
        let result = TableSchema::new(
            "t",
            vec![ColumnDefinition::new(
                "r",
                DataType::row(vec![RowField::new("d", DataType::decimal(2, 5))]),
            )],
        );
        assert!(matches!(result, Err(SchemaError::InvalidParameter { .. })));
    }

    #[test]
    fn test_rejects_negative_scale_in_yaml() {
        let yaml = r#"
name: t
columns:
  - name: d
    type: DECIMAL(10, -2)
"#;
        assert!(matches!(
            TableSchema::from_yaml(yaml),
            Err(SchemaError::YamlError(_))
        ));
    }

    #[test]
    fn test_options_must_be_scalars() {
        let yaml = r#"
name: t
columns:
  - name: a
    type: INT
options:
  number-of-rows: [1, 2]
"#;
        assert!(TableSchema::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_builders() {
        let schema = TableSchema::from_declared("t", &[("a", "INT")])
            .unwrap()
            .with_catalog("cat", "db")
            .with_option("number-of-rows", "3");

        assert_eq!(schema.catalog(), "cat");
        assert_eq!(schema.database(), "db");
        assert_eq!(
            schema.options().get("number-of-rows").map(String::as_str),
            Some("3")
        );
    }
}
