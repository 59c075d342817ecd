//! Boolean value generator.

use super::ValueGenerator;
use datagen_core::Value;
use rand::Rng;

/// Uniform true/false.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BooleanGenerator;

impl ValueGenerator for BooleanGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        Value::Boolean(rng.gen())
    }
}
