//! ROW and nullable wrappers.

use super::{Generator, ValueGenerator};
use datagen_core::Value;
use rand::Rng;

/// One child generator per ROW field, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGenerator {
    pub fields: Vec<(String, Generator)>,
}

impl ValueGenerator for RowGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        Value::Row(
            self.fields
                .iter()
                .map(|(name, generator)| (name.clone(), generator.generate(rng)))
                .collect(),
        )
    }
}

/// Emits NULL with probability `null_rate`, otherwise delegates.
#[derive(Debug, Clone, PartialEq)]
pub struct NullableGenerator {
    pub inner: Box<Generator>,
    /// Probability in `0.0..=1.0`
    pub null_rate: f64,
}

impl NullableGenerator {
    pub fn new(inner: Generator, null_rate: f64) -> Self {
        Self {
            inner: Box::new(inner),
            null_rate: null_rate.clamp(0.0, 1.0),
        }
    }
}

impl ValueGenerator for NullableGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        if rng.gen_bool(self.null_rate) {
            Value::Null
        } else {
            self.inner.generate(rng)
        }
    }
}
