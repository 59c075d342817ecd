//! Command-line interface for datagen
//!
//! # Usage Examples
//!
//! ```bash
//! # Ten rows as JSON Lines on stdout
//! datagen generate --table demos/datagen_t.yaml --number-of-rows 10
//!
//! # Push a limit of 5 and write CSV
//! datagen generate --table demos/datagen_t.yaml --limit 5 --format csv --output rows.csv
//!
//! # Show the scan node the optimizer would see
//! datagen explain --table demos/datagen_t.yaml --limit 5
//! ```
//!
//! Set `RUST_LOG=debug` to see generator construction and limit negotiation.

use anyhow::Context;
use clap::{Parser, Subcommand};
use datagen::{push_down_limit, write_rows, DatagenSource, OutputFormat, TableSchema};
use datagen_source::DatagenOptions;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "datagen")]
#[command(about = "Generate synthetic rows for a declared table")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate rows and write them out
    Generate {
        /// Table definition (YAML)
        #[arg(long)]
        table: PathBuf,

        /// Override the table's `number-of-rows` option
        #[arg(long)]
        number_of_rows: Option<u64>,

        /// Push a row limit into the source before execution
        #[arg(long)]
        limit: Option<u64>,

        /// Override the table's `seed` option
        #[arg(long, env = "DATAGEN_SEED")]
        seed: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print the scan node of the plan, including any pushed limit
    Explain {
        /// Table definition (YAML)
        #[arg(long)]
        table: PathBuf,

        /// Push a row limit into the source
        #[arg(long)]
        limit: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            table,
            number_of_rows,
            limit,
            seed,
            format,
            output,
        } => run_generate(&table, number_of_rows, limit, seed, format, output.as_deref()),
        Commands::Explain { table, limit } => run_explain(&table, limit),
    }
}

fn load_schema(path: &Path) -> anyhow::Result<TableSchema> {
    TableSchema::from_file(path)
        .with_context(|| format!("Failed to load table definition from {path:?}"))
}

fn run_generate(
    table: &Path,
    number_of_rows: Option<u64>,
    limit: Option<u64>,
    seed: Option<u64>,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let schema = load_schema(table)?;
    let mut options = DatagenOptions::from_table(&schema)
        .with_context(|| format!("Invalid options for table '{}'", schema.name()))?;
    if number_of_rows.is_some() {
        options.number_of_rows = number_of_rows;
    }
    if seed.is_some() {
        options.seed = seed;
    }

    let mut source = DatagenSource::with_options(schema.clone(), options)
        .with_context(|| format!("Failed to create source for table '{}'", schema.name()))?;
    if let Some(limit) = limit {
        push_down_limit(&mut source, limit);
    }

    tracing::info!(
        table = %schema.name(),
        plan = %source.explain(),
        "Generating rows"
    );

    source.open();
    let rows = source.rows()?;
    let metrics = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {path:?}"))?;
            write_rows(BufWriter::new(file), &schema, rows, format)?
        }
        None => write_rows(io::stdout().lock(), &schema, rows, format)?,
    };
    source.close();

    tracing::info!(
        rows = metrics.rows_written,
        seconds = metrics.total_duration.as_secs_f64(),
        "Generation complete"
    );
    Ok(())
}

fn run_explain(table: &Path, limit: Option<u64>) -> anyhow::Result<()> {
    let mut source = DatagenSource::from_file(table)
        .with_context(|| format!("Failed to create source from {table:?}"))?;
    if let Some(limit) = limit {
        push_down_limit(&mut source, limit);
    }
    println!("{}", source.explain());
    Ok(())
}
