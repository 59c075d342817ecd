//! Character and binary string generators.

use super::ValueGenerator;
use datagen_core::Value;
use rand::Rng;

/// Characters used for generated strings.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Upper bound on generated variable-length strings when no `length` option is set.
pub const DEFAULT_STRING_LENGTH: usize = 100;

/// Largest declared CHAR/BINARY length a generator is built for. Fixed-length
/// values are produced at their full declared length.
pub const MAX_FIXED_LENGTH: usize = 65_536;

fn random_text<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

fn random_bytes<R: Rng>(rng: &mut R, length: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; length];
    rng.fill(bytes.as_mut_slice());
    bytes
}

/// Fixed-length string: exactly `length` characters.
#[derive(Debug, Clone, PartialEq)]
pub struct CharGenerator {
    pub length: usize,
}

impl ValueGenerator for CharGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        Value::String(random_text(rng, self.length))
    }
}

/// Variable-length string of 1 to `max_length` characters.
#[derive(Debug, Clone, PartialEq)]
pub struct VarCharGenerator {
    pub max_length: usize,
}

impl VarCharGenerator {
    /// Bound a declared VARCHAR length by the effective length cap.
    pub fn new(declared: usize, cap: usize) -> Self {
        Self {
            max_length: declared.min(cap).max(1),
        }
    }
}

impl ValueGenerator for VarCharGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        let length = rng.gen_range(1..=self.max_length);
        Value::String(random_text(rng, length))
    }
}

/// Fixed-length byte string: exactly `length` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryGenerator {
    pub length: usize,
}

impl ValueGenerator for BinaryGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        Value::Binary(random_bytes(rng, self.length))
    }
}

/// Variable-length byte string of 1 to `max_length` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBinaryGenerator {
    pub max_length: usize,
}

impl VarBinaryGenerator {
    /// Bound a declared VARBINARY length by the effective length cap.
    pub fn new(declared: usize, cap: usize) -> Self {
        Self {
            max_length: declared.min(cap).max(1),
        }
    }
}

impl ValueGenerator for VarBinaryGenerator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Value {
        let length = rng.gen_range(1..=self.max_length);
        Value::Binary(random_bytes(rng, length))
    }
}
