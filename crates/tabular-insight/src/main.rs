//! CLI entry point for the tabular analysis engine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use tabular_insight::{
    AnalysisConfig, AnalysisReport, AnalysisResult, AnalysisSession, ColumnStats, Dataset,
    FilterCondition, Locale, Record, ReportGenerator, RowFilter, decoder, demo,
};
use tracing::{debug, info};

/// CLI-compatible locale enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLocale {
    /// English
    En,
    /// Traditional Chinese
    ZhTw,
}

impl From<CliLocale> for Locale {
    fn from(cli: CliLocale) -> Self {
        match cli {
            CliLocale::En => Locale::English,
            CliLocale::ZhTw => Locale::TraditionalChinese,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Statistical profiling and row filtering for tabular data",
    long_about = "Infers column types, computes descriptive statistics and correlations,\n\
                  recommends charts and filters rows of CSV or JSON data.\n\n\
                  EXAMPLES:\n  \
                  # Profile a file\n  \
                  tabular-insight analyze -i sales.csv\n\n  \
                  # Profile only one region, in Traditional Chinese\n  \
                  tabular-insight analyze -i sales.csv --where 'Region = Taipei' --locale zh-tw\n\n  \
                  # Print matching rows as JSON\n  \
                  tabular-insight filter -i sales.csv --where 'Sales > 20000' --limit 5\n\n  \
                  # Generate and save the demo dataset\n  \
                  tabular-insight demo --output sales.csv"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Profile a dataset and print statistics, charts and insights
    Analyze(AnalyzeArgs),
    /// Print the rows matching every condition as JSON
    Filter(FilterArgs),
    /// Generate the synthetic sales dataset
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Path to a CSV or JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Filter expression such as `Sales > 100` or `Date in 2023-01-01..2023-06-30`
    ///
    /// May be repeated; all conditions must hold.
    #[arg(long = "where", value_name = "EXPR")]
    conditions: Vec<String>,

    /// JSON file with analysis thresholds
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Language of titles and insights (overrides the config file)
    #[arg(long, value_enum)]
    locale: Option<CliLocale>,

    /// Output the report as JSON to stdout (disables logging)
    #[arg(long, default_value = "false")]
    json: bool,

    /// Write the report into this directory
    #[arg(long, value_name = "DIR")]
    emit_report: Option<PathBuf>,

    /// Markdown instead of the console summary (or alongside JSON with --emit-report)
    #[arg(long, default_value = "false")]
    markdown: bool,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Path to a CSV or JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Filter expression; may be repeated
    #[arg(long = "where", value_name = "EXPR", required = true)]
    conditions: Vec<String>,

    /// Print at most this many rows
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Random seed
    #[arg(long, default_value = "2023")]
    seed: u64,

    /// Save to a `.csv` or `.json` file instead of printing JSON
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the analysis summary of the generated data
    #[arg(long, default_value = "false")]
    analyze: bool,
}

fn init_logging(level: &str, quiet: bool, json_output: bool) {
    // Keep stdout clean for the JSON report
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let json_output = matches!(&cli.command, Command::Analyze(args) if args.json);
    init_logging(&cli.log_level, cli.quiet, json_output);

    // Load environment variables from .env file
    dotenv().ok();

    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Filter(args) => run_filter(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn load_input(input: &Path) -> Result<Dataset> {
    if !input.exists() {
        return Err(anyhow!("Input file not found: {}", input.display()));
    }

    info!("Loading dataset from: {}", input.display());
    let dataset = decoder::read_dataset(input)?;
    info!(
        "Dataset loaded successfully: {} rows, {} columns",
        dataset.len(),
        dataset.headers().len()
    );
    Ok(dataset)
}

fn load_config(path: Option<&Path>, locale: Option<CliLocale>) -> Result<AnalysisConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str::<AnalysisConfig>(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(locale) = locale {
        config.locale = locale.into();
    }
    config.validate()?;
    Ok(config)
}

fn parse_conditions(expressions: &[String]) -> Result<Vec<FilterCondition>> {
    expressions
        .iter()
        .map(|expr| expr.parse::<FilterCondition>().map_err(anyhow::Error::from))
        .collect()
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.locale)?;
    let locale = config.locale;
    let dataset = load_input(&args.input)?;
    let conditions = parse_conditions(&args.conditions)?;
    RowFilter::validate(&dataset, &conditions)?;

    let mut session = AnalysisSession::new(config);
    session.load(dataset);
    for condition in conditions {
        session.add_filter(condition);
    }

    let analysis = if session.filters().is_empty() {
        session.analyze()?.clone()
    } else {
        let filtered = session
            .analyze_filtered()
            .context("Failed to analyze the filtered rows")?;
        info!(
            "Analyzing {} of {} rows after {} filter(s)",
            filtered.rows,
            session.dataset().map_or(0, Dataset::len),
            session.filters().len()
        );
        filtered
    };

    let source = args.input.display().to_string();
    let generator = ReportGenerator::new(
        args.emit_report.clone().unwrap_or_else(|| PathBuf::from("./outputs")),
        locale,
    );
    let report = generator.build_report(&source, &analysis);

    if let Some(ref dir) = args.emit_report {
        let base_name = args
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        let path = if args.markdown {
            generator.write_markdown(&report, &base_name)?
        } else {
            generator.write_report_to_file(&report, &base_name)?
        };
        debug!("Report directory: {}", dir.display());
        if !args.json {
            println!("Report written to {}", path.display());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if args.markdown && args.emit_report.is_none() {
        print!("{}", ReportGenerator::render_markdown(&report));
    } else {
        print_summary(&report, &analysis);
    }

    Ok(())
}

fn run_filter(args: FilterArgs) -> Result<()> {
    let dataset = load_input(&args.input)?;
    let conditions = parse_conditions(&args.conditions)?;
    RowFilter::validate(&dataset, &conditions)?;

    let mut rows: Vec<&Record> = RowFilter::filter(&dataset, &conditions);
    info!("{} of {} rows match", rows.len(), dataset.len());
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    let json = decoder::records_to_json(dataset.headers(), &rows);
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn run_demo(args: DemoArgs) -> Result<()> {
    let dataset = demo::sales_dataset(args.seed);
    info!("Generated {} demo rows (seed {})", dataset.len(), args.seed);

    match args.output {
        Some(ref path) => save_dataset(&dataset, path)?,
        None if !args.analyze => {
            let rows: Vec<&Record> = dataset.records().iter().collect();
            let json = decoder::records_to_json(dataset.headers(), &rows);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        None => {}
    }

    if args.analyze {
        let analysis = tabular_insight::analyze(&dataset)?;
        let report = ReportGenerator::default().build_report("demo", &analysis);
        print_summary(&report, &analysis);
    }

    Ok(())
}

fn save_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => decoder::write_csv(dataset, path)?,
        "json" => {
            let rows: Vec<&Record> = dataset.records().iter().collect();
            let json = decoder::records_to_json(dataset.headers(), &rows);
            fs::write(path, serde_json::to_string_pretty(&json)?)?;
        }
        other => {
            return Err(anyhow!(
                "Unsupported output format '{}': use .csv or .json",
                other
            ));
        }
    }

    println!("Saved {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// Print the console summary.
///
/// Uses `println!` on purpose: this is the command's output, not logging.
fn print_summary(report: &AnalysisReport, analysis: &AnalysisResult) {
    println!("\n{}", "=".repeat(80));
    println!("ANALYSIS SUMMARY");
    println!("{}\n", "=".repeat(80));

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  Source: {}", report.source);
    println!("  Rows: {}", report.overview.rows);
    println!("  Columns: {}", report.overview.columns);
    println!("  Numeric columns: {}", report.overview.numeric_columns);
    println!();

    println!("COLUMNS");
    println!("{}", "-".repeat(40));
    println!("{:<20} {:<10} {}", "Column", "Type", "Summary");
    println!("{}", "-".repeat(70));
    for column in &report.columns {
        let summary = match &column.stats {
            Some(ColumnStats::Numeric(s)) => format!(
                "mean {} | median {} | min {} | max {} | std {}",
                s.mean, s.median, s.min, s.max, s.std_dev
            ),
            Some(ColumnStats::Categorical(s)) => format!(
                "{} unique | top '{}' ({}, {}%)",
                s.unique_values, s.most_frequent, s.most_frequent_count, s.most_frequent_percentage
            ),
            None => "no usable values".to_string(),
        };
        println!(
            "{:<20} {:<10} {}",
            truncate_str(&column.name, 19),
            column.column_type,
            summary
        );
    }
    println!();

    if !analysis.correlations.is_empty() {
        println!("CORRELATIONS");
        println!("{}", "-".repeat(40));
        for pair in analysis.correlations.iter().take(5) {
            println!(
                "  {} / {}: {:.3}",
                pair.column1, pair.column2, pair.correlation
            );
        }
        println!();
    }

    println!("RECOMMENDED CHARTS");
    println!("{}", "-".repeat(40));
    if analysis.recommendations.is_empty() {
        println!("  None");
    }
    for rec in &analysis.recommendations {
        println!("  {}. [{}] {}", rec.priority, rec.kind, rec.title);
        println!("     {}", rec.description);
    }
    println!();

    println!("INSIGHTS");
    println!("{}", "-".repeat(40));
    for insight in &analysis.insights {
        println!("  - {}", insight);
    }
    println!();
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
