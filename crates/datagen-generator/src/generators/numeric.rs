//! Numeric value generators.

use super::ValueGenerator;
use datagen_core::{DecimalValue, Value};
use rand::Rng;

/// Storage width of an integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerWidth {
    Tiny,
    Small,
    Int,
    Big,
}

impl IntegerWidth {
    /// Inclusive range of values the width can hold.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            IntegerWidth::Tiny => (i64::from(i8::MIN), i64::from(i8::MAX)),
            IntegerWidth::Small => (i64::from(i16::MIN), i64::from(i16::MAX)),
            IntegerWidth::Int => (i64::from(i32::MIN), i64::from(i32::MAX)),
            IntegerWidth::Big => (i64::MIN, i64::MAX),
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            IntegerWidth::Tiny => "TINYINT",
            IntegerWidth::Small => "SMALLINT",
            IntegerWidth::Int => "INT",
            IntegerWidth::Big => "BIGINT",
        }
    }
}

/// Uniform integer in `min..=max`, emitted at the column's width.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerGenerator {
    pub width: IntegerWidth,
    pub min: i64,
    pub max: i64,
}

impl IntegerGenerator {
    /// Generator over the full range of `width`.
    pub fn new(width: IntegerWidth) -> Self {
        let (min, max) = width.bounds();
        Self { width, min, max }
    }

    /// Generator over a sub-range. Returns `None` when the range is empty or
    /// does not fit the width.
    pub fn with_range(width: IntegerWidth, min: i64, max: i64) -> Option<Self> {
        let (lo, hi) = width.bounds();
        if min > max || min < lo || max > hi {
            return None;
        }
        Some(Self { width, min, max })
    }
}

impl ValueGenerator for IntegerGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        let v = rng.gen_range(self.min..=self.max);
        // `v` lies within the width's bounds, so the narrowing casts are exact.
        match self.width {
            IntegerWidth::Tiny => Value::TinyInt(v as i8),
            IntegerWidth::Small => Value::SmallInt(v as i16),
            IntegerWidth::Int => Value::Int(v as i32),
            IntegerWidth::Big => Value::BigInt(v),
        }
    }
}

// Interpolating instead of sampling `min..=max` directly keeps the full
// `-MAX..=MAX` range from overflowing to infinity.
fn interpolate<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    let t: f64 = rng.gen();
    (min * (1.0 - t) + max * t).clamp(min, max)
}

/// Finite single-precision float in `min..=max`.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatGenerator {
    pub min: f32,
    pub max: f32,
}

impl Default for FloatGenerator {
    fn default() -> Self {
        Self {
            min: -f32::MAX,
            max: f32::MAX,
        }
    }
}

impl ValueGenerator for FloatGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        let v = interpolate(rng, f64::from(self.min), f64::from(self.max)) as f32;
        Value::Float(v.clamp(self.min, self.max))
    }
}

/// Finite double-precision float in `min..=max`.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleGenerator {
    pub min: f64,
    pub max: f64,
}

impl Default for DoubleGenerator {
    fn default() -> Self {
        Self {
            min: -f64::MAX,
            max: f64::MAX,
        }
    }
}

impl ValueGenerator for DoubleGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        Value::Double(interpolate(rng, self.min, self.max))
    }
}

/// Decimal with a uniform unscaled value in `min..=max`.
///
/// The bounds are unscaled integers at `scale`, always within
/// `±(10^precision - 1)`, so every value fits the declared precision.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalGenerator {
    pub precision: u8,
    pub scale: u8,
    pub min: i128,
    pub max: i128,
}

impl DecimalGenerator {
    /// Generator over every value representable at `(precision, scale)`.
    pub fn new(precision: u8, scale: u8) -> Self {
        let max = DecimalValue::max_unscaled(precision);
        Self {
            precision,
            scale,
            min: -max,
            max,
        }
    }

    /// Restrict to `min..=max` (unscaled), clamping each bound to the
    /// representable magnitude. Returns `None` when the range is empty.
    pub fn with_range(precision: u8, scale: u8, min: i128, max: i128) -> Option<Self> {
        let limit = DecimalValue::max_unscaled(precision);
        let min = min.clamp(-limit, limit);
        let max = max.clamp(-limit, limit);
        if min > max {
            return None;
        }
        Some(Self {
            precision,
            scale,
            min,
            max,
        })
    }
}

impl ValueGenerator for DecimalGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        let unscaled = rng.gen_range(self.min..=self.max);
        Value::Decimal(DecimalValue::new(unscaled, self.precision, self.scale))
    }
}
