//! Value representations for the datagen source.
//!
//! This module defines the values produced by the generators and the `Row`
//! handed to consumers, plus a schema-aware converter for JSON output.

use crate::schema::TableSchema;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// Exact decimal value: an unscaled integer and its scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalValue {
    /// Unscaled value (`value = unscaled * 10^-scale`)
    pub unscaled: i128,
    /// Total number of digits allowed
    pub precision: u8,
    /// Number of digits after the decimal point
    pub scale: u8,
}

impl DecimalValue {
    /// Create a new decimal value.
    pub fn new(unscaled: i128, precision: u8, scale: u8) -> Self {
        Self {
            unscaled,
            precision,
            scale,
        }
    }

    /// Largest unscaled magnitude representable with `precision` digits.
    pub fn max_unscaled(precision: u8) -> i128 {
        10i128.pow(u32::from(precision)) - 1
    }

    /// Number of digits in the unscaled magnitude.
    pub fn digits(&self) -> u32 {
        let magnitude = self.unscaled.unsigned_abs();
        if magnitude == 0 {
            1
        } else {
            magnitude.ilog10() + 1
        }
    }

    /// Parse a decimal literal into an unscaled integer at `scale`.
    ///
    /// Extra fractional digits are dropped and integer overflow saturates, so
    /// the result can be clamped by the caller. Returns `None` for malformed
    /// literals.
    pub fn parse_unscaled(literal: &str, scale: u8) -> Option<i128> {
        let literal = literal.trim();
        let (negative, digits) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal.strip_prefix('+').unwrap_or(literal)),
        };
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (digits, ""),
        };
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }
        if !integer.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let scale = usize::from(scale);
        let padded: String = fraction
            .chars()
            .chain(std::iter::repeat('0'))
            .take(scale)
            .collect();

        let mut unscaled: i128 = 0;
        for c in integer.chars().chain(padded.chars()) {
            let digit = i128::from(c.to_digit(10)?);
            unscaled = match unscaled.checked_mul(10).and_then(|v| v.checked_add(digit)) {
                Some(v) => v,
                None => return Some(if negative { i128::MIN } else { i128::MAX }),
            };
        }
        Some(if negative { -unscaled } else { unscaled })
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let magnitude = self.unscaled.unsigned_abs();
        if self.scale == 0 {
            return write!(f, "{sign}{magnitude}");
        }
        let divisor = 10u128.pow(u32::from(self.scale));
        write!(
            f,
            "{sign}{}.{:0width$}",
            magnitude / divisor,
            magnitude % divisor,
            width = usize::from(self.scale)
        )
    }
}

/// A single generated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value
    Null,

    /// Boolean value
    Boolean(bool),

    /// 8-bit signed integer
    TinyInt(i8),

    /// 16-bit signed integer
    SmallInt(i16),

    /// 32-bit signed integer
    Int(i32),

    /// 64-bit signed integer
    BigInt(i64),

    /// 32-bit floating point
    Float(f32),

    /// 64-bit floating point
    Double(f64),

    /// Exact decimal
    Decimal(DecimalValue),

    /// Character string (CHAR, VARCHAR, STRING)
    String(String),

    /// Byte string (BINARY, VARBINARY, BYTES)
    Binary(Vec<u8>),

    /// Calendar date
    Date(NaiveDate),

    /// Time of day
    Time(NaiveTime),

    /// Timestamp without time zone
    Timestamp(NaiveDateTime),

    /// Instant (timestamp with local time zone)
    TimestampLtz(DateTime<Utc>),

    /// Ordered elements
    Array(Vec<Value>),

    /// Key/value entries with unique keys, in insertion order
    Map(Vec<(Value, Value)>),

    /// Bag of elements
    Multiset(Vec<Value>),

    /// Named fields in declaration order
    Row(Vec<(String, Value)>),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64 (any integer width).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::TinyInt(i) => Some(i64::from(*i)),
            Self::SmallInt(i) => Some(i64::from(*i)),
            Self::Int(i) => Some(i64::from(*i)),
            Self::BigInt(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64 (either float width).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(f64::from(*f)),
            Self::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a decimal.
    pub fn as_decimal(&self) -> Option<&DecimalValue> {
        match self {
            Self::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get this value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get this value as a time of day.
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Try to get this value as a timestamp.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Try to get this value as an instant.
    pub fn as_timestamp_ltz(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::TimestampLtz(ts) => Some(ts),
            _ => None,
        }
    }

    /// Try to get this value as an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Try to get this value as map entries.
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Try to get this value as a multiset.
    pub fn as_multiset(&self) -> Option<&[Value]> {
        match self {
            Self::Multiset(values) => Some(values),
            _ => None,
        }
    }

    /// Try to get this value as nested row fields.
    pub fn as_row(&self) -> Option<&[(String, Value)]> {
        match self {
            Self::Row(fields) => Some(fields),
            _ => None,
        }
    }
}

// JSON rendering: temporal values as ISO strings, decimals as exact strings,
// maps as `[key, value]` pairs since keys are not always strings.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::TinyInt(i) => serializer.serialize_i8(*i),
            Self::SmallInt(i) => serializer.serialize_i16(*i),
            Self::Int(i) => serializer.serialize_i32(*i),
            Self::BigInt(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f32(*f),
            Self::Double(f) => serializer.serialize_f64(*f),
            Self::Decimal(d) => serializer.collect_str(d),
            Self::String(s) => serializer.serialize_str(s),
            Self::Binary(b) => serializer.serialize_bytes(b),
            Self::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            Self::Time(t) => serializer.collect_str(&t.format("%H:%M:%S%.f")),
            Self::Timestamp(ts) => serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::TimestampLtz(ts) => serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.fZ")),
            Self::Array(values) | Self::Multiset(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for (key, value) in entries {
                    seq.serialize_element(&(key, value))?;
                }
                seq.end()
            }
            Self::Row(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// One produced row: column values in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Position of this row in the output stream
    pub index: u64,

    /// Column values, one per top-level column
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row.
    pub fn new(index: u64, values: Vec<Value>) -> Self {
        Self { index, values }
    }

    /// Get a column value by position.
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Number of column values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Pairs a `Row` with its schema so it serializes as `{column: value, ...}`.
pub struct RowConverter<'a> {
    /// The row to convert
    pub row: &'a Row,

    /// Schema providing the column names
    pub schema: &'a TableSchema,
}

impl<'a> RowConverter<'a> {
    /// Create a new row converter.
    pub fn new(row: &'a Row, schema: &'a TableSchema) -> Self {
        Self { row, schema }
    }

    /// Look up a column value by name.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let position = self.schema.columns().iter().position(|c| c.name == column)?;
        self.row.get(position)
    }
}

impl Serialize for RowConverter<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let columns = self.schema.columns();
        let mut map = serializer.serialize_map(Some(columns.len()))?;
        for (column, value) in columns.iter().zip(&self.row.values) {
            map.serialize_entry(&column.name, value)?;
        }
        map.end()
    }
}
