//! Builds generator trees from table schemas.
//!
//! The registry walks each column type bottom-up: children first, then the
//! composite that owns them. Construction is pure, so building the same
//! schema twice yields equal trees.

use crate::error::{GeneratorError, UnsupportedTypeError};
use crate::generators::{
    BinaryGenerator, BooleanGenerator, CharGenerator, CollectionGenerator, DateGenerator,
    DecimalGenerator, DoubleGenerator, FloatGenerator, Generator, IntegerGenerator, IntegerWidth,
    MapGenerator, NullableGenerator, RowGenerator, TimeGenerator, TimestampGenerator,
    ValueGenerator, VarBinaryGenerator, VarCharGenerator, DEFAULT_COLLECTION_SIZE,
    DEFAULT_STRING_LENGTH, MAX_FIXED_LENGTH,
};
use crate::options::{FieldOptions, GeneratorOptions};
use datagen_core::{ColumnDefinition, DataType, DecimalValue, TableSchema, Value};
use rand::Rng;
use tracing::debug;

/// Generator for one top-level column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGenerator {
    pub name: String,
    pub generator: Generator,
}

/// One generator per top-level column, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorTree {
    columns: Vec<ColumnGenerator>,
}

impl GeneratorTree {
    pub fn columns(&self) -> &[ColumnGenerator] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Generate one value per column, in column order.
    pub fn generate_values<R: Rng>(&self, rng: &mut R) -> Vec<Value> {
        self.columns
            .iter()
            .map(|column| column.generator.generate(rng))
            .collect()
    }
}

/// Maps column types to generators.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    options: GeneratorOptions,
}

impl GeneratorRegistry {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Build the generator tree for every column of `schema`.
    ///
    /// Fails with [`UnsupportedTypeError`] if any node at any depth has no
    /// generator, and with `InvalidOption` if a `fields.*` option names a
    /// missing column or does not fit its column's type.
    pub fn build(&self, schema: &TableSchema) -> Result<GeneratorTree, GeneratorError> {
        for column in self.options.fields.keys() {
            if schema.column(column).is_none() {
                return Err(GeneratorError::InvalidOption {
                    key: format!("fields.{column}"),
                    message: format!("table '{}' has no column '{column}'", schema.name()),
                });
            }
        }

        let columns = schema
            .columns()
            .iter()
            .map(|column| {
                let generator = self.build_column(column)?;
                debug!(
                    column = %column.name,
                    generator = %generator.describe(),
                    "Built column generator"
                );
                Ok(ColumnGenerator {
                    name: column.name.clone(),
                    generator,
                })
            })
            .collect::<Result<Vec<_>, GeneratorError>>()?;

        Ok(GeneratorTree { columns })
    }

    fn build_column(&self, column: &ColumnDefinition) -> Result<Generator, GeneratorError> {
        let field = self.options.field(&column.name);
        let generator = build_node(&column.column_type, &column.name, field)?;

        match field.and_then(|f| f.null_rate) {
            Some(_) if !column.nullable => Err(GeneratorError::invalid_option(
                &column.name,
                "null-rate",
                "column is declared NOT NULL",
            )),
            Some(rate) if !(0.0..=1.0).contains(&rate) => Err(GeneratorError::invalid_option(
                &column.name,
                "null-rate",
                format!("{rate} is not a probability"),
            )),
            Some(rate) if rate > 0.0 => {
                Ok(Generator::Nullable(NullableGenerator::new(generator, rate)))
            }
            _ => Ok(generator),
        }
    }
}

fn build_node(
    data_type: &DataType,
    path: &str,
    field: Option<&FieldOptions>,
) -> Result<Generator, GeneratorError> {
    let length = match field.and_then(|f| f.length) {
        Some(_) if !accepts_length(data_type) => {
            return Err(GeneratorError::invalid_option(
                path,
                "length",
                format!("not applicable to {data_type}"),
            ))
        }
        Some(0) if !data_type.is_collection() => {
            return Err(GeneratorError::invalid_option(
                path,
                "length",
                "must be at least 1",
            ))
        }
        other => other,
    };
    let bounds = field
        .map(|f| (f.min.as_deref(), f.max.as_deref()))
        .unwrap_or((None, None));
    if (bounds.0.is_some() || bounds.1.is_some()) && !data_type.is_numeric() {
        let option = if bounds.0.is_some() { "min" } else { "max" };
        return Err(GeneratorError::invalid_option(
            path,
            option,
            format!("not applicable to {data_type}"),
        ));
    }

    let generator = match data_type {
        DataType::Boolean => Generator::Boolean(BooleanGenerator),
        DataType::Char { length } => Generator::Char(CharGenerator {
            length: fixed_length(data_type, *length, path)?,
        }),
        DataType::VarChar { length: declared } => Generator::VarChar(VarCharGenerator::new(
            *declared as usize,
            length.unwrap_or(DEFAULT_STRING_LENGTH),
        )),
        DataType::Binary { length } => Generator::Binary(BinaryGenerator {
            length: fixed_length(data_type, *length, path)?,
        }),
        DataType::VarBinary { length: declared } => {
            Generator::VarBinary(VarBinaryGenerator::new(
                *declared as usize,
                length.unwrap_or(DEFAULT_STRING_LENGTH),
            ))
        }
        DataType::Decimal { precision, scale } => {
            Generator::Decimal(decimal_generator(path, *precision, *scale, bounds)?)
        }
        DataType::TinyInt => Generator::Integer(integer_generator(path, IntegerWidth::Tiny, bounds)?),
        DataType::SmallInt => {
            Generator::Integer(integer_generator(path, IntegerWidth::Small, bounds)?)
        }
        DataType::Int => Generator::Integer(integer_generator(path, IntegerWidth::Int, bounds)?),
        DataType::BigInt => Generator::Integer(integer_generator(path, IntegerWidth::Big, bounds)?),
        DataType::Float => {
            let default = FloatGenerator::default();
            let (min, max) = float_bounds(
                path,
                bounds,
                f64::from(default.min),
                f64::from(default.max),
            )?;
            Generator::Float(FloatGenerator {
                min: min as f32,
                max: max as f32,
            })
        }
        DataType::Double => {
            let default = DoubleGenerator::default();
            let (min, max) = float_bounds(path, bounds, default.min, default.max)?;
            Generator::Double(DoubleGenerator { min, max })
        }
        DataType::Date => Generator::Date(DateGenerator::default()),
        DataType::Time { precision } => Generator::Time(TimeGenerator {
            precision: *precision,
        }),
        DataType::Timestamp { precision } => {
            Generator::Timestamp(TimestampGenerator::new(*precision))
        }
        DataType::TimestampLtz { precision } => {
            Generator::TimestampLtz(TimestampGenerator::new(*precision))
        }
        DataType::Array { element_type } => {
            let element = build_node(element_type, &format!("{path}.element"), None)?;
            Generator::Array(CollectionGenerator::new(
                element,
                length.unwrap_or(DEFAULT_COLLECTION_SIZE),
            ))
        }
        DataType::Multiset { element_type } => {
            let element = build_node(element_type, &format!("{path}.element"), None)?;
            Generator::Multiset(CollectionGenerator::new(
                element,
                length.unwrap_or(DEFAULT_COLLECTION_SIZE),
            ))
        }
        DataType::Map {
            key_type,
            value_type,
        } => {
            let key = build_node(key_type, &format!("{path}.key"), None)?;
            let value = build_node(value_type, &format!("{path}.value"), None)?;
            Generator::Map(MapGenerator::new(
                key,
                value,
                length.unwrap_or(DEFAULT_COLLECTION_SIZE),
            ))
        }
        DataType::Row { fields } => {
            let fields = fields
                .iter()
                .map(|f| {
                    let child = build_node(&f.data_type, &format!("{path}.{}", f.name), None)?;
                    Ok((f.name.clone(), child))
                })
                .collect::<Result<Vec<_>, GeneratorError>>()?;
            Generator::Row(RowGenerator { fields })
        }
        DataType::Null | DataType::Raw { .. } => {
            return Err(UnsupportedTypeError {
                path: path.to_string(),
                type_name: data_type.to_string(),
            }
            .into())
        }
    };

    Ok(generator)
}

fn accepts_length(data_type: &DataType) -> bool {
    data_type.is_collection()
        || matches!(data_type, DataType::VarChar { .. } | DataType::VarBinary { .. })
}

type Bounds<'a> = (Option<&'a str>, Option<&'a str>);

fn integer_generator(
    column: &str,
    width: IntegerWidth,
    (min, max): Bounds<'_>,
) -> Result<IntegerGenerator, GeneratorError> {
    if min.is_none() && max.is_none() {
        return Ok(IntegerGenerator::new(width));
    }

    let (lo, hi) = width.bounds();
    let parse = |option: &str, literal: Option<&str>, default: i64| match literal {
        None => Ok(default),
        Some(s) => s.trim().parse::<i64>().map_err(|_| {
            GeneratorError::invalid_option(column, option, format!("'{s}' is not an integer"))
        }),
    };
    let blamed = if min.is_some() { "min" } else { "max" };
    let min = parse("min", min, lo)?;
    let max = parse("max", max, hi)?;

    IntegerGenerator::with_range(width, min, max).ok_or_else(|| {
        GeneratorError::invalid_option(
            column,
            blamed,
            format!(
                "range {min}..={max} is empty or exceeds {} bounds {lo}..={hi}",
                width.type_name()
            ),
        )
    })
}

fn float_bounds(
    column: &str,
    (min, max): Bounds<'_>,
    lo: f64,
    hi: f64,
) -> Result<(f64, f64), GeneratorError> {
    let parse = |option: &str, literal: Option<&str>, default: f64| match literal {
        None => Ok(default),
        Some(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= lo && v <= hi => Ok(v),
            _ => Err(GeneratorError::invalid_option(
                column,
                option,
                format!("'{s}' is not a finite number in range"),
            )),
        },
    };
    let min = parse("min", min, lo)?;
    let max = parse("max", max, hi)?;
    if min > max {
        return Err(GeneratorError::invalid_option(
            column,
            "min",
            format!("min {min} is greater than max {max}"),
        ));
    }
    Ok((min, max))
}

fn decimal_generator(
    column: &str,
    precision: u8,
    scale: u8,
    (min, max): Bounds<'_>,
) -> Result<DecimalGenerator, GeneratorError> {
    if min.is_none() && max.is_none() {
        return Ok(DecimalGenerator::new(precision, scale));
    }

    let limit = DecimalValue::max_unscaled(precision);
    let parse = |option: &str, literal: Option<&str>, default: i128| match literal {
        None => Ok(default),
        Some(s) => DecimalValue::parse_unscaled(s, scale).ok_or_else(|| {
            GeneratorError::invalid_option(column, option, format!("'{s}' is not a decimal"))
        }),
    };
    let min = parse("min", min, -limit)?;
    let max = parse("max", max, limit)?;

    DecimalGenerator::with_range(precision, scale, min, max).ok_or_else(|| {
        GeneratorError::invalid_option(column, "min", format!("min {min} is greater than max {max}"))
    })
}

fn fixed_length(data_type: &DataType, declared: u32, path: &str) -> Result<usize, GeneratorError> {
    let length = declared as usize;
    if length > MAX_FIXED_LENGTH {
        return Err(GeneratorError::invalid_option(
            path,
            "length",
            format!("{data_type} exceeds the fixed-length limit of {MAX_FIXED_LENGTH}"),
        ));
    }
    Ok(length)
}
