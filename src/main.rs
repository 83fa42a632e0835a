use anyhow::Context;
use clap::{Parser, ValueEnum};
use claimcheck_report::{Evaluator, Reporter};
use claimcheck_similarity::ValidationSchema;
use claimcheck_storage::{JsonlSource, ReportSink};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Validate extracted claim data against ground truth
#[derive(Parser, Debug)]
#[command(name = "claimcheck")]
#[command(about = "Field accuracy and role-swap report for extracted claim data", long_about = None)]
struct Args {
    /// JSON Lines file with one processed claim per line
    input: PathBuf,

    /// JSON field schema replacing the built-in claims mapping
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Also write the summary as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of partitions scored in parallel
    #[arg(long, default_value_t = 1)]
    parallel: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting claimcheck v{}", env!("CARGO_PKG_VERSION"));

    let schema = match &args.schema {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read schema {}", path.display()))?;
            ValidationSchema::from_json(&text)
                .with_context(|| format!("invalid schema {}", path.display()))?
        }
        None => ValidationSchema::claims(),
    };
    info!("Schema: {} fields", schema.fields.len());

    let batch = JsonlSource::new(&args.input).read()?;
    let evaluator = Evaluator::new(schema)?;
    let evaluation = evaluator.evaluate_partitioned(&batch.records, args.parallel);
    let reporter = Reporter::new(&evaluation, &batch.skipped);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        Format::Table => reporter.write_table(&mut out)?,
        Format::Json => writeln!(out, "{}", reporter.to_json()?)?,
    }
    out.flush()?;

    if let Some(path) = &args.output {
        let summary = serde_json::to_string_pretty(&reporter.summary())?;
        ReportSink::new(path).write(&summary)?;
    }

    info!(
        "Validated {} records ({} skipped)",
        evaluation.metrics.record_count(),
        batch.skipped.len()
    );
    Ok(())
}
