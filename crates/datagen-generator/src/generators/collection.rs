//! ARRAY, MULTISET and MAP generators.

use super::{Generator, ValueGenerator};
use datagen_core::Value;
use rand::Rng;

/// Maximum number of elements per collection when no `length` option is set.
pub const DEFAULT_COLLECTION_SIZE: usize = 3;

/// Sequence of 0 to `max_size` elements drawn from one child generator.
///
/// Backs both ARRAY and MULTISET; the multiset keeps duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionGenerator {
    pub element: Box<Generator>,
    pub max_size: usize,
}

impl CollectionGenerator {
    pub fn new(element: Generator, max_size: usize) -> Self {
        Self {
            element: Box::new(element),
            max_size,
        }
    }

    pub fn generate_elements<R: Rng>(&self, rng: &mut R) -> Vec<Value> {
        let size = rng.gen_range(0..=self.max_size);
        (0..size).map(|_| self.element.generate(rng)).collect()
    }
}

/// Map of 0 to `max_size` entries.
///
/// A generated key equal to an earlier one overwrites that entry's value, so
/// keys are unique and the map may come out smaller than drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGenerator {
    pub key: Box<Generator>,
    pub value: Box<Generator>,
    pub max_size: usize,
}

impl MapGenerator {
    pub fn new(key: Generator, value: Generator, max_size: usize) -> Self {
        Self {
            key: Box::new(key),
            value: Box::new(value),
            max_size,
        }
    }
}

impl ValueGenerator for MapGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        let size = rng.gen_range(0..=self.max_size);
        let mut entries: Vec<(Value, Value)> = Vec::with_capacity(size);
        for _ in 0..size {
            let key = self.key.generate(rng);
            let value = self.value.generate(rng);
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        Value::Map(entries)
    }
}
