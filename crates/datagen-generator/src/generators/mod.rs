//! Individual value generators for the supported column types.
//!
//! Every type kind maps to one generator struct. [`Generator`] is the closed
//! union over them; composite generators own their children as boxed
//! `Generator`s, so a whole column is one tree dispatched by `match`.

pub mod boolean;
pub mod collection;
pub mod numeric;
pub mod row;
pub mod string;
pub mod temporal;

use datagen_core::Value;
use rand::Rng;

pub use boolean::BooleanGenerator;
pub use collection::{CollectionGenerator, MapGenerator, DEFAULT_COLLECTION_SIZE};
pub use numeric::{
    DecimalGenerator, DoubleGenerator, FloatGenerator, IntegerGenerator, IntegerWidth,
};
pub use row::{NullableGenerator, RowGenerator};
pub use string::{
    BinaryGenerator, CharGenerator, VarBinaryGenerator, VarCharGenerator, ALPHABET,
    DEFAULT_STRING_LENGTH, MAX_FIXED_LENGTH,
};
pub use temporal::{DateGenerator, TimeGenerator, TimestampGenerator};

/// Trait for generating values.
pub trait ValueGenerator {
    /// Generate one value using the given RNG.
    fn generate<R: Rng>(&self, rng: &mut R) -> Value;
}

/// Generator bound to one node of a column type.
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    Boolean(BooleanGenerator),
    Char(CharGenerator),
    VarChar(VarCharGenerator),
    Binary(BinaryGenerator),
    VarBinary(VarBinaryGenerator),
    Decimal(DecimalGenerator),
    Integer(IntegerGenerator),
    Float(FloatGenerator),
    Double(DoubleGenerator),
    Date(DateGenerator),
    Time(TimeGenerator),
    Timestamp(TimestampGenerator),
    TimestampLtz(TimestampGenerator),
    Array(CollectionGenerator),
    Multiset(CollectionGenerator),
    Map(MapGenerator),
    Row(RowGenerator),
    Nullable(NullableGenerator),
}

impl ValueGenerator for Generator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        match self {
            Generator::Boolean(g) => g.generate(rng),
            Generator::Char(g) => g.generate(rng),
            Generator::VarChar(g) => g.generate(rng),
            Generator::Binary(g) => g.generate(rng),
            Generator::VarBinary(g) => g.generate(rng),
            Generator::Decimal(g) => g.generate(rng),
            Generator::Integer(g) => g.generate(rng),
            Generator::Float(g) => g.generate(rng),
            Generator::Double(g) => g.generate(rng),
            Generator::Date(g) => Value::Date(g.generate_date(rng)),
            Generator::Time(g) => Value::Time(g.generate_time(rng)),
            Generator::Timestamp(g) => Value::Timestamp(g.generate_timestamp(rng)),
            Generator::TimestampLtz(g) => Value::TimestampLtz(g.generate_timestamp(rng).and_utc()),
            Generator::Array(g) => Value::Array(g.generate_elements(rng)),
            Generator::Multiset(g) => Value::Multiset(g.generate_elements(rng)),
            Generator::Map(g) => g.generate(rng),
            Generator::Row(g) => g.generate(rng),
            Generator::Nullable(g) => g.generate(rng),
        }
    }
}

impl Generator {
    /// Structural description of this generator tree, e.g. `ARRAY<ROW<a: BIGINT>>`.
    ///
    /// Two trees built from the same type describe identically.
    pub fn describe(&self) -> String {
        match self {
            Generator::Boolean(_) => "BOOLEAN".to_string(),
            Generator::Char(g) => format!("CHAR({})", g.length),
            Generator::VarChar(g) => format!("VARCHAR(<={})", g.max_length),
            Generator::Binary(g) => format!("BINARY({})", g.length),
            Generator::VarBinary(g) => format!("VARBINARY(<={})", g.max_length),
            Generator::Decimal(g) => format!("DECIMAL({}, {})", g.precision, g.scale),
            Generator::Integer(g) => g.width.type_name().to_string(),
            Generator::Float(_) => "FLOAT".to_string(),
            Generator::Double(_) => "DOUBLE".to_string(),
            Generator::Date(_) => "DATE".to_string(),
            Generator::Time(g) => format!("TIME({})", g.precision),
            Generator::Timestamp(g) => format!("TIMESTAMP({})", g.time.precision),
            Generator::TimestampLtz(g) => format!("TIMESTAMP_LTZ({})", g.time.precision),
            Generator::Array(g) => format!("ARRAY<{}>", g.element.describe()),
            Generator::Multiset(g) => format!("MULTISET<{}>", g.element.describe()),
            Generator::Map(g) => format!("MAP<{}, {}>", g.key.describe(), g.value.describe()),
            Generator::Row(g) => {
                let fields: Vec<String> = g
                    .fields
                    .iter()
                    .map(|(name, field)| format!("{name}: {}", field.describe()))
                    .collect();
                format!("ROW<{}>", fields.join(", "))
            }
            Generator::Nullable(g) => format!("NULLABLE<{}>", g.inner.describe()),
        }
    }
}
