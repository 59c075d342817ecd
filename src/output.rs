//! Row writers for the CLI.

use clap::ValueEnum;
use datagen_core::{Row, RowConverter, TableSchema, Value};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::debug;

/// Errors that can occur while writing rows.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Output encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line, keyed by column name
    #[default]
    Jsonl,
    /// Header row plus one record per row; nested values JSON-encoded
    Csv,
}

/// Metrics from a write operation.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Number of rows written.
    pub rows_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl WriteMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Write every row from `rows` to `out` in `format`.
pub fn write_rows<W, I>(
    out: W,
    schema: &TableSchema,
    rows: I,
    format: OutputFormat,
) -> Result<WriteMetrics, OutputError>
where
    W: Write,
    I: IntoIterator<Item = Row>,
{
    let start_time = Instant::now();
    let rows_written = match format {
        OutputFormat::Jsonl => write_jsonl(out, schema, rows)?,
        OutputFormat::Csv => write_csv(out, schema, rows)?,
    };

    let metrics = WriteMetrics {
        rows_written,
        total_duration: start_time.elapsed(),
    };
    debug!(
        rows = metrics.rows_written,
        rows_per_second = metrics.rows_per_second(),
        "Finished writing rows"
    );
    Ok(metrics)
}

fn write_jsonl<W, I>(mut out: W, schema: &TableSchema, rows: I) -> Result<u64, OutputError>
where
    W: Write,
    I: IntoIterator<Item = Row>,
{
    let mut count = 0;
    for row in rows {
        serde_json::to_writer(&mut out, &RowConverter::new(&row, schema))?;
        out.write_all(b"\n")?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

fn write_csv<W, I>(out: W, schema: &TableSchema, rows: I) -> Result<u64, OutputError>
where
    W: Write,
    I: IntoIterator<Item = Row>,
{
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(schema.column_names())?;

    let mut count = 0;
    for row in rows {
        let record = row
            .values
            .iter()
            .map(csv_cell)
            .collect::<Result<Vec<_>, _>>()?;
        writer.write_record(&record)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Render one value as a CSV cell: NULL is empty, strings are written
/// as-is, everything else as its JSON text.
fn csv_cell(value: &Value) -> Result<String, serde_json::Error> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        other => match serde_json::to_value(other)? {
            serde_json::Value::String(s) => Ok(s),
            json => Ok(json.to_string()),
        },
    }
}
