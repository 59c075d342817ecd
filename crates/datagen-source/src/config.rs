//! Typed datagen table options.
//!
//! Tables carry their options as a flat string map, like a `WITH (...)`
//! clause:
//!
//! | Key                        | Meaning                                     |
//! |----------------------------|---------------------------------------------|
//! | `connector`                | must be `datagen` when present              |
//! | `number-of-rows`           | configured row total (absent: unbounded)    |
//! | `seed`                     | seed for the source's random source         |
//! | `fields.<col>.kind`        | `random` (the only generation kind)         |
//! | `fields.<col>.min` / `max` | bounds for numeric columns                  |
//! | `fields.<col>.length`      | string length cap or collection size        |
//! | `fields.<col>.null-rate`   | probability of NULL for a nullable column   |

use crate::error::SourceError;
use datagen_core::TableSchema;
use datagen_generator::GeneratorOptions;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

pub const CONNECTOR: &str = "connector";
pub const CONNECTOR_NAME: &str = "datagen";
pub const NUMBER_OF_ROWS: &str = "number-of-rows";
pub const SEED: &str = "seed";
pub const FIELDS_PREFIX: &str = "fields.";

/// Parsed options of one datagen table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatagenOptions {
    /// Configured total; `None` means unbounded pending a pushed limit
    pub number_of_rows: Option<u64>,
    /// Seed for the random source; `None` means OS entropy
    pub seed: Option<u64>,
    /// Per-column generator overrides
    pub generator: GeneratorOptions,
}

impl DatagenOptions {
    /// Parse the options attached to `schema`.
    pub fn from_table(schema: &TableSchema) -> Result<Self, SourceError> {
        Self::from_map(schema.options())
    }

    /// Parse a raw option map.
    ///
    /// Only syntax is checked here; whether a `fields.*` option fits its
    /// column is decided when the generators are built.
    pub fn from_map(options: &BTreeMap<String, String>) -> Result<Self, SourceError> {
        let mut parsed = DatagenOptions::default();

        for (key, value) in options {
            match key.as_str() {
                CONNECTOR => {
                    if value != CONNECTOR_NAME {
                        return Err(SourceError::invalid_option(
                            key,
                            format!("expected '{CONNECTOR_NAME}', got '{value}'"),
                        ));
                    }
                }
                NUMBER_OF_ROWS => parsed.number_of_rows = Some(parse_number(key, value)?),
                SEED => parsed.seed = Some(parse_number(key, value)?),
                _ => match key.strip_prefix(FIELDS_PREFIX).and_then(|k| k.rsplit_once('.')) {
                    Some((column, option)) if !column.is_empty() => {
                        parsed.apply_field_option(key, column, option, value)?
                    }
                    _ => return Err(SourceError::invalid_option(key, "unknown option")),
                },
            }
        }

        debug!(
            number_of_rows = ?parsed.number_of_rows,
            seed = ?parsed.seed,
            field_options = parsed.generator.fields.len(),
            "Parsed datagen options"
        );
        Ok(parsed)
    }

    fn apply_field_option(
        &mut self,
        key: &str,
        column: &str,
        option: &str,
        value: &str,
    ) -> Result<(), SourceError> {
        let field = self.generator.field_mut(column);
        match option {
            "kind" => match value {
                "random" => {}
                "sequence" => {
                    return Err(SourceError::invalid_option(
                        key,
                        "sequence generation is not supported",
                    ))
                }
                other => {
                    return Err(SourceError::invalid_option(
                        key,
                        format!("unknown generator kind '{other}'"),
                    ))
                }
            },
            "min" => field.min = Some(value.trim().to_string()),
            "max" => field.max = Some(value.trim().to_string()),
            "length" => field.length = Some(parse_number(key, value)?),
            "null-rate" => {
                let rate: f64 = parse_number(key, value)?;
                if !(0.0..=1.0).contains(&rate) {
                    return Err(SourceError::invalid_option(
                        key,
                        format!("{rate} is not a probability between 0 and 1"),
                    ));
                }
                field.null_rate = Some(rate);
            }
            _ => return Err(SourceError::invalid_option(key, "unknown field option")),
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, SourceError> {
    value
        .trim()
        .parse()
        .map_err(|_| SourceError::invalid_option(key, format!("cannot parse '{value}'")))
}
