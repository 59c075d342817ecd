//! Column type descriptors for the datagen table source.
//!
//! This module defines `DataType`, the closed set of column types a datagen
//! table can declare. Composite kinds own their children, so a single value
//! describes an arbitrarily nested column type.

use crate::schema::SchemaError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Largest decimal precision the source can represent (unscaled values fit in `i128`).
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// Largest fractional-second precision (nanoseconds).
pub const MAX_FRACTIONAL_PRECISION: u8 = 9;

/// Declared length of `STRING` and `BYTES`.
pub const MAX_LENGTH: u32 = i32::MAX as u32;

/// Precision used by `DECIMAL` without arguments.
pub const DEFAULT_DECIMAL_PRECISION: u8 = 10;

/// Precision used by `TIME` without arguments.
pub const DEFAULT_TIME_PRECISION: u8 = 0;

/// Precision used by `TIMESTAMP` without arguments.
pub const DEFAULT_TIMESTAMP_PRECISION: u8 = 6;

/// Column type of a datagen table.
///
/// # YAML Format
///
/// Types can be written as SQL-style strings:
/// ```yaml
/// type: BIGINT
/// type: DECIMAL(32, 2)
/// type: MAP<STRING, DATE>
/// type: ROW<a BIGINT, b TIME, c ROW<d TIMESTAMP>>
/// ```
///
/// or in tagged object format:
/// ```yaml
/// type:
///   type: decimal
///   precision: 32
///   scale: 2
/// type:
///   type: array
///   element_type: int
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    /// Boolean value
    Boolean,

    /// Fixed-length character string
    Char {
        /// Exact length
        length: u32,
    },

    /// Variable-length character string (`STRING` is `VARCHAR(MAX_LENGTH)`)
    VarChar {
        /// Maximum length
        length: u32,
    },

    /// Fixed-length byte string
    Binary {
        /// Exact length
        length: u32,
    },

    /// Variable-length byte string (`BYTES` is `VARBINARY(MAX_LENGTH)`)
    VarBinary {
        /// Maximum length
        length: u32,
    },

    /// Exact decimal with specified precision and scale
    Decimal {
        /// Total number of digits
        precision: u8,
        /// Number of digits after the decimal point
        scale: u8,
    },

    /// 8-bit signed integer
    TinyInt,

    /// 16-bit signed integer
    SmallInt,

    /// 32-bit signed integer
    Int,

    /// 64-bit signed integer
    BigInt,

    /// 32-bit IEEE 754 floating point
    Float,

    /// 64-bit IEEE 754 floating point
    Double,

    /// Calendar date
    Date,

    /// Time of day
    Time {
        /// Fractional-second digits
        precision: u8,
    },

    /// Timestamp without time zone
    Timestamp {
        /// Fractional-second digits
        precision: u8,
    },

    /// Timestamp with local time zone (an instant)
    TimestampLtz {
        /// Fractional-second digits
        precision: u8,
    },

    /// Ordered sequence of elements
    Array {
        /// Element type
        element_type: Box<DataType>,
    },

    /// Key/value mapping
    Map {
        /// Key type
        key_type: Box<DataType>,
        /// Value type
        value_type: Box<DataType>,
    },

    /// Unordered bag of elements
    Multiset {
        /// Element type
        element_type: Box<DataType>,
    },

    /// Nested record of named fields
    Row {
        /// Fields in declaration order
        fields: Vec<RowField>,
    },

    /// The SQL `NULL` type
    Null,

    /// Opaque engine-specific type
    Raw {
        /// Name of the wrapped class
        class_name: String,
    },
}

/// Named field of a `ROW` type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowField {
    /// Field name
    pub name: String,

    /// Field type
    #[serde(rename = "type")]
    pub data_type: DataType,

    /// Whether this field may hold NULL
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

pub(crate) fn default_nullable() -> bool {
    true
}

impl RowField {
    /// Create a new nullable field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// Create a new NOT NULL field.
    pub fn not_null(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
        }
    }
}

impl DataType {
    /// Create a new Char type with the given length.
    pub fn char(length: u32) -> Self {
        Self::Char { length }
    }

    /// Create a new VarChar type with the given length.
    pub fn varchar(length: u32) -> Self {
        Self::VarChar { length }
    }

    /// Create the unbounded `STRING` type.
    pub fn string() -> Self {
        Self::VarChar { length: MAX_LENGTH }
    }

    /// Create a new Binary type with the given length.
    pub fn binary(length: u32) -> Self {
        Self::Binary { length }
    }

    /// Create a new VarBinary type with the given length.
    pub fn varbinary(length: u32) -> Self {
        Self::VarBinary { length }
    }

    /// Create the unbounded `BYTES` type.
    pub fn bytes() -> Self {
        Self::VarBinary { length: MAX_LENGTH }
    }

    /// Create a new Decimal type with the given precision and scale.
    pub fn decimal(precision: u8, scale: u8) -> Self {
        Self::Decimal { precision, scale }
    }

    /// Create a new Time type with the given fractional precision.
    pub fn time(precision: u8) -> Self {
        Self::Time { precision }
    }

    /// Create a new Timestamp type with the given fractional precision.
    pub fn timestamp(precision: u8) -> Self {
        Self::Timestamp { precision }
    }

    /// Create a new local-zone Timestamp type with the given fractional precision.
    pub fn timestamp_ltz(precision: u8) -> Self {
        Self::TimestampLtz { precision }
    }

    /// Create a new Array type with the given element type.
    pub fn array(element_type: DataType) -> Self {
        Self::Array {
            element_type: Box::new(element_type),
        }
    }

    /// Create a new Map type with the given key and value types.
    pub fn map(key_type: DataType, value_type: DataType) -> Self {
        Self::Map {
            key_type: Box::new(key_type),
            value_type: Box::new(value_type),
        }
    }

    /// Create a new Multiset type with the given element type.
    pub fn multiset(element_type: DataType) -> Self {
        Self::Multiset {
            element_type: Box::new(element_type),
        }
    }

    /// Create a new Row type with the given fields.
    pub fn row(fields: Vec<RowField>) -> Self {
        Self::Row { fields }
    }

    /// Name of this type's kind, without parameters.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Char { .. } => "CHAR",
            Self::VarChar { .. } => "VARCHAR",
            Self::Binary { .. } => "BINARY",
            Self::VarBinary { .. } => "VARBINARY",
            Self::Decimal { .. } => "DECIMAL",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Int => "INT",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Date => "DATE",
            Self::Time { .. } => "TIME",
            Self::Timestamp { .. } => "TIMESTAMP",
            Self::TimestampLtz { .. } => "TIMESTAMP_LTZ",
            Self::Array { .. } => "ARRAY",
            Self::Map { .. } => "MAP",
            Self::Multiset { .. } => "MULTISET",
            Self::Row { .. } => "ROW",
            Self::Null => "NULL",
            Self::Raw { .. } => "RAW",
        }
    }

    /// Direct children of a composite type (empty for leaf types).
    pub fn children(&self) -> Vec<&DataType> {
        match self {
            Self::Array { element_type } | Self::Multiset { element_type } => {
                vec![element_type.as_ref()]
            }
            Self::Map {
                key_type,
                value_type,
            } => vec![key_type.as_ref(), value_type.as_ref()],
            Self::Row { fields } => fields.iter().map(|f| &f.data_type).collect(),
            _ => Vec::new(),
        }
    }

    /// Check if this type represents an integer type.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::TinyInt | Self::SmallInt | Self::Int | Self::BigInt)
    }

    /// Check if this type represents a numeric type.
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::Float | Self::Double | Self::Decimal { .. })
    }

    /// Check if this type represents a string type.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Char { .. } | Self::VarChar { .. })
    }

    /// Check if this type represents a binary type.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary { .. } | Self::VarBinary { .. })
    }

    /// Check if this type represents a temporal type.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Time { .. } | Self::Timestamp { .. } | Self::TimestampLtz { .. }
        )
    }

    /// Check if this type is a collection (array, map or multiset).
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::Array { .. } | Self::Map { .. } | Self::Multiset { .. }
        )
    }

    /// Check if this type has children.
    pub fn is_composite(&self) -> bool {
        self.is_collection() || matches!(self, Self::Row { .. })
    }

    /// Validate type parameters recursively.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let invalid = |message: String| SchemaError::InvalidParameter {
            type_name: self.to_string(),
            message,
        };

        match self {
            Self::Char { length }
            | Self::VarChar { length }
            | Self::Binary { length }
            | Self::VarBinary { length } => {
                if *length == 0 {
                    return Err(invalid("length must be at least 1".to_string()));
                }
                if *length > MAX_LENGTH {
                    return Err(invalid(format!("length must not exceed {MAX_LENGTH}")));
                }
            }
            Self::Decimal { precision, scale } => {
                if *precision == 0 || *precision > MAX_DECIMAL_PRECISION {
                    return Err(invalid(format!(
                        "precision must be between 1 and {MAX_DECIMAL_PRECISION}"
                    )));
                }
                if scale > precision {
                    return Err(invalid(format!(
                        "scale {scale} must not exceed precision {precision}"
                    )));
                }
            }
            Self::Time { precision }
            | Self::Timestamp { precision }
            | Self::TimestampLtz { precision } => {
                if *precision > MAX_FRACTIONAL_PRECISION {
                    return Err(invalid(format!(
                        "fractional precision must be between 0 and {MAX_FRACTIONAL_PRECISION}"
                    )));
                }
            }
            Self::Row { fields } => {
                if fields.is_empty() {
                    return Err(invalid("a ROW needs at least one field".to_string()));
                }
                let mut seen = HashSet::new();
                for field in fields {
                    if field.name.is_empty() {
                        return Err(SchemaError::EmptyName);
                    }
                    if !seen.insert(field.name.as_str()) {
                        return Err(SchemaError::DuplicateField(field.name.clone()));
                    }
                }
            }
            _ => {}
        }

        for child in self.children() {
            child.validate()?;
        }
        Ok(())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char { length } => write!(f, "CHAR({length})"),
            Self::VarChar { length } if *length == MAX_LENGTH => f.write_str("STRING"),
            Self::VarChar { length } => write!(f, "VARCHAR({length})"),
            Self::Binary { length } => write!(f, "BINARY({length})"),
            Self::VarBinary { length } if *length == MAX_LENGTH => f.write_str("BYTES"),
            Self::VarBinary { length } => write!(f, "VARBINARY({length})"),
            Self::Decimal { precision, scale } => write!(f, "DECIMAL({precision}, {scale})"),
            Self::Time { precision } => write!(f, "TIME({precision})"),
            Self::Timestamp { precision } => write!(f, "TIMESTAMP({precision})"),
            Self::TimestampLtz { precision } => {
                write!(f, "TIMESTAMP({precision}) WITH LOCAL TIME ZONE")
            }
            Self::Array { element_type } => write!(f, "ARRAY<{element_type}>"),
            Self::Map {
                key_type,
                value_type,
            } => write!(f, "MAP<{key_type}, {value_type}>"),
            Self::Multiset { element_type } => write!(f, "MULTISET<{element_type}>"),
            Self::Row { fields } => {
                f.write_str("ROW<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "`{}` {}", field.name.replace('`', "``"), field.data_type)?;
                    if !field.nullable {
                        f.write_str(" NOT NULL")?;
                    }
                }
                f.write_str(">")
            }
            Self::Raw { class_name } => write!(f, "RAW('{}')", class_name.replace('\'', "''")),
            other => f.write_str(other.kind_name()),
        }
    }
}

impl FromStr for DataType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_data_type(s)
    }
}

// Serialized as the tagged object format; strings are accepted on input as well.

impl Serialize for DataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Boolean => serializer.serialize_str("boolean"),
            Self::TinyInt => serializer.serialize_str("tinyint"),
            Self::SmallInt => serializer.serialize_str("smallint"),
            Self::Int => serializer.serialize_str("int"),
            Self::BigInt => serializer.serialize_str("bigint"),
            Self::Float => serializer.serialize_str("float"),
            Self::Double => serializer.serialize_str("double"),
            Self::Date => serializer.serialize_str("date"),
            Self::Null => serializer.serialize_str("null"),

            Self::Char { length } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "char")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::VarChar { length } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "varchar")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::Binary { length } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "binary")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::VarBinary { length } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "varbinary")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::Decimal { precision, scale } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "decimal")?;
                map.serialize_entry("precision", precision)?;
                map.serialize_entry("scale", scale)?;
                map.end()
            }
            Self::Time { precision } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "time")?;
                map.serialize_entry("precision", precision)?;
                map.end()
            }
            Self::Timestamp { precision } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "timestamp")?;
                map.serialize_entry("precision", precision)?;
                map.end()
            }
            Self::TimestampLtz { precision } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "timestamp_ltz")?;
                map.serialize_entry("precision", precision)?;
                map.end()
            }
            Self::Array { element_type } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("element_type", element_type)?;
                map.end()
            }
            Self::Map {
                key_type,
                value_type,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "map")?;
                map.serialize_entry("key_type", key_type)?;
                map.serialize_entry("value_type", value_type)?;
                map.end()
            }
            Self::Multiset { element_type } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "multiset")?;
                map.serialize_entry("element_type", element_type)?;
                map.end()
            }
            Self::Row { fields } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "row")?;
                map.serialize_entry("fields", fields)?;
                map.end()
            }
            Self::Raw { class_name } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "raw")?;
                map.serialize_entry("class_name", class_name)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct DataTypeVisitor;

        impl<'de> Visitor<'de> for DataTypeVisitor {
            type Value = DataType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a type string or a map describing a column type")
            }

            // Handle string format: "INT", "DECIMAL(10, 2)", "ROW<a INT>", etc.
            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                value.parse().map_err(E::custom)
            }

            // Handle map format: {"type": "varchar", "length": 255}
            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                match type_name.to_ascii_lowercase().as_str() {
                    "char" => {
                        let length = get_field::<_, M::Error>(&fields, "length")?.unwrap_or(1);
                        Ok(DataType::Char { length })
                    }
                    "varchar" | "var_char" => {
                        let length = get_field::<_, M::Error>(&fields, "length")?.unwrap_or(MAX_LENGTH);
                        Ok(DataType::VarChar { length })
                    }
                    "binary" => {
                        let length = get_field::<_, M::Error>(&fields, "length")?.unwrap_or(1);
                        Ok(DataType::Binary { length })
                    }
                    "varbinary" | "var_binary" => {
                        let length = get_field::<_, M::Error>(&fields, "length")?.unwrap_or(MAX_LENGTH);
                        Ok(DataType::VarBinary { length })
                    }
                    "decimal" => {
                        let precision = get_field_required::<_, M::Error>(&fields, "precision")?;
                        let scale = get_field::<_, M::Error>(&fields, "scale")?.unwrap_or(0);
                        Ok(DataType::Decimal { precision, scale })
                    }
                    "time" => {
                        let precision =
                            get_field::<_, M::Error>(&fields, "precision")?.unwrap_or(DEFAULT_TIME_PRECISION);
                        Ok(DataType::Time { precision })
                    }
                    "timestamp" => {
                        let precision = get_field::<_, M::Error>(&fields, "precision")?
                            .unwrap_or(DEFAULT_TIMESTAMP_PRECISION);
                        Ok(DataType::Timestamp { precision })
                    }
                    "timestamp_ltz" => {
                        let precision = get_field::<_, M::Error>(&fields, "precision")?
                            .unwrap_or(DEFAULT_TIMESTAMP_PRECISION);
                        Ok(DataType::TimestampLtz { precision })
                    }
                    "array" => {
                        let element_type: DataType = get_field_required::<_, M::Error>(&fields, "element_type")?;
                        Ok(DataType::array(element_type))
                    }
                    "multiset" => {
                        let element_type: DataType = get_field_required::<_, M::Error>(&fields, "element_type")?;
                        Ok(DataType::multiset(element_type))
                    }
                    "map" => {
                        let key_type: DataType = get_field_required::<_, M::Error>(&fields, "key_type")?;
                        let value_type: DataType = get_field_required::<_, M::Error>(&fields, "value_type")?;
                        Ok(DataType::map(key_type, value_type))
                    }
                    "row" => {
                        let fields: Vec<RowField> = get_field_required::<_, M::Error>(&fields, "fields")?;
                        Ok(DataType::Row { fields })
                    }
                    "raw" => {
                        let class_name = get_field_required::<_, M::Error>(&fields, "class_name")?;
                        Ok(DataType::Raw { class_name })
                    }
                    // Parameterless kinds may appear in map format too
                    simple => simple.parse().map_err(M::Error::custom),
                }
            }
        }

        deserializer.deserialize_any(DataTypeVisitor)
    }
}

// Helper functions for deserialization
fn get_field<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<Option<T>, E> {
    fields
        .get(key)
        .map(|value| {
            serde_yaml::from_value(value.clone())
                .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
        })
        .transpose()
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    get_field(fields, key)?.ok_or_else(|| E::missing_field(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_constructors() {
        assert_eq!(DataType::char(1), DataType::Char { length: 1 });
        assert_eq!(
            DataType::decimal(32, 2),
            DataType::Decimal {
                precision: 32,
                scale: 2
            }
        );
        assert_eq!(DataType::string(), DataType::VarChar { length: MAX_LENGTH });
        assert_eq!(
            DataType::array(DataType::Int),
            DataType::Array {
                element_type: Box::new(DataType::Int)
            }
        );
    }

    #[test]
    fn test_type_categories() {
        assert!(DataType::Int.is_integer());
        assert!(DataType::decimal(10, 2).is_numeric());
        assert!(!DataType::string().is_numeric());

        assert!(DataType::varchar(10).is_string());
        assert!(DataType::bytes().is_binary());
        assert!(DataType::timestamp_ltz(3).is_temporal());

        assert!(DataType::map(DataType::string(), DataType::Date).is_collection());
        assert!(DataType::row(vec![RowField::new("a", DataType::Int)]).is_composite());
        assert!(!DataType::Int.is_composite());
    }

    #[test]
    fn test_children_follow_declaration_order() {
        let row = DataType::row(vec![
            RowField::new("a", DataType::BigInt),
            RowField::new("b", DataType::time(0)),
        ]);
        assert_eq!(row.children(), vec![&DataType::BigInt, &DataType::time(0)]);

        let map = DataType::map(DataType::string(), DataType::Date);
        assert_eq!(map.children(), vec![&DataType::string(), &DataType::Date]);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(DataType::decimal(0, 0).validate().is_err());
        assert!(DataType::decimal(39, 0).validate().is_err());
        assert!(DataType::decimal(5, 6).validate().is_err());
        assert!(DataType::char(0).validate().is_err());
        assert!(DataType::timestamp(10).validate().is_err());
        assert!(DataType::decimal(38, 38).validate().is_ok());
    }

    #[test]
    fn test_validate_recurses_into_children() {
        let nested = DataType::array(DataType::row(vec![RowField::new(
            "d",
            DataType::decimal(3, 4),
        )]));
        assert!(matches!(
            nested.validate(),
            Err(SchemaError::InvalidParameter { .. })
        ));

        let duplicate = DataType::row(vec![
            RowField::new("a", DataType::Int),
            RowField::new("a", DataType::BigInt),
        ]);
        assert!(matches!(
            duplicate.validate(),
            Err(SchemaError::DuplicateField(name)) if name == "a"
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::decimal(32, 2).to_string(), "DECIMAL(32, 2)");
        assert_eq!(DataType::string().to_string(), "STRING");
        assert_eq!(
            DataType::timestamp_ltz(3).to_string(),
            "TIMESTAMP(3) WITH LOCAL TIME ZONE"
        );
        assert_eq!(
            DataType::row(vec![
                RowField::new("a", DataType::BigInt),
                RowField::not_null("b", DataType::array(DataType::Int)),
            ])
            .to_string(),
            "ROW<`a` BIGINT, `b` ARRAY<INT> NOT NULL>"
        );
    }

    #[test]
    fn test_deserialize_string_format() {
        let parsed: DataType = serde_yaml::from_str("int").unwrap();
        assert_eq!(parsed, DataType::Int);

        let parsed: DataType = serde_yaml::from_str("\"DECIMAL(32, 2)\"").unwrap();
        assert_eq!(parsed, DataType::decimal(32, 2));

        let parsed: DataType = serde_yaml::from_str("MAP<STRING, DATE>").unwrap();
        assert_eq!(parsed, DataType::map(DataType::string(), DataType::Date));
    }

    #[test]
    fn test_deserialize_map_format() {
        let yaml = r#"
type: decimal
precision: 10
scale: 2
"#;
        let parsed: DataType = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, DataType::decimal(10, 2));

        let yaml = r#"
type: row
fields:
  - name: a
    type: bigint
  - name: c
    type:
      type: row
      fields:
        - name: d
          type: timestamp
          nullable: false
"#;
        let parsed: DataType = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            DataType::row(vec![
                RowField::new("a", DataType::BigInt),
                RowField::new(
                    "c",
                    DataType::row(vec![RowField::not_null(
                        "d",
                        DataType::timestamp(DEFAULT_TIMESTAMP_PRECISION)
                    )])
                ),
            ])
        );
    }

    #[test]
    fn test_deserialize_negative_scale_fails() {
        let yaml = r#"
type: decimal
precision: 10
scale: -1
"#;
        let result: Result<DataType, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let types = vec![
            DataType::Boolean,
            DataType::decimal(32, 2),
            DataType::varchar(10),
            DataType::timestamp_ltz(3),
            DataType::map(DataType::string(), DataType::Date),
            DataType::multiset(DataType::decimal(32, 2)),
            DataType::row(vec![
                RowField::new("a", DataType::BigInt),
                RowField::not_null("b", DataType::time(0)),
            ]),
        ];

        for ty in types {
            let yaml = serde_yaml::to_string(&ty).unwrap();
            let parsed: DataType = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(ty, parsed);
        }
    }
}
