//! chart-scout CLI - profile tabular files and print chart suggestions

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use chart_scout::{
    ChartSpec, Loader, Table, detect_time_column, generate_insights, suggest_charts, summarize,
};

/// Chart suggestion for tabular data.
///
/// Normalizes a CSV/Excel source, detects a temporal column and prints
/// the table profile plus suggested chart specifications.
#[derive(Parser, Debug)]
#[command(name = "chart-scout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file(s) to profile (.csv or .xlsx)
    #[cfg_attr(feature = "http", arg(required_unless_present = "url"))]
    #[cfg_attr(not(feature = "http"), arg(required = true))]
    files: Vec<PathBuf>,

    /// Fetch a remote CSV instead of reading local files
    #[cfg(feature = "http")]
    #[arg(long)]
    url: Option<String>,

    /// Force a specific CSV delimiter (single character)
    #[arg(short = 'd', long)]
    delimiter: Option<char>,

    /// Extra column label to treat as currency-valued (repeatable)
    #[arg(short = 'c', long = "currency-column")]
    currency_columns: Vec<String>,

    /// Output format: text (default) or json
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// Also print the deterministic local insights
    #[arg(short = 'i', long)]
    insights: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut exit_code = ExitCode::SUCCESS;

    #[cfg(feature = "http")]
    if let Some(url) = &args.url {
        if let Err(e) = profile_url(url, &args) {
            eprintln!("Error fetching {url}: {e}");
            exit_code = ExitCode::FAILURE;
        }
    }

    for file in &args.files {
        if let Err(e) = profile_file(file, &args) {
            eprintln!("Error processing {}: {}", file.display(), e);
            exit_code = ExitCode::FAILURE;
        }
    }

    exit_code
}

fn build_loader(args: &Args) -> Loader {
    let mut loader = Loader::new();
    if let Some(delim) = args.delimiter {
        loader.delimiter(delim as u8);
    }
    for label in &args.currency_columns {
        loader.currency_column(label);
    }
    loader
}

fn profile_file(path: &PathBuf, args: &Args) -> chart_scout::Result<()> {
    let loader = build_loader(args);
    let table = loader.load_path(path)?;
    report(&path.display().to_string(), table, args);
    Ok(())
}

#[cfg(feature = "http")]
fn profile_url(url: &str, args: &Args) -> chart_scout::Result<()> {
    let loader = build_loader(args);
    let table = loader.load_url(url)?;
    report(url, table, args);
    Ok(())
}

fn report(source: &str, mut table: Table, args: &Args) {
    let time_column = detect_time_column(&mut table);
    let specs = suggest_charts(&table, time_column.as_deref());

    match args.format {
        OutputFormat::Text => print_text_output(source, &table, time_column.as_deref(), &specs),
        OutputFormat::Json => print_json_output(source, &table, time_column.as_deref(), &specs),
    }

    if args.insights && args.format == OutputFormat::Text {
        println!("{}", generate_insights(&table, &specs, None, None));
        println!();
    }
}

fn print_text_output(source: &str, table: &Table, time_column: Option<&str>, specs: &[ChartSpec]) {
    println!("Source: {source}");
    println!("{}", summarize(table));
    println!("  Temporal column: {}", time_column.unwrap_or("none"));

    if specs.is_empty() {
        println!("  No chart suggestions (no numeric columns)");
    } else {
        println!("  Suggested charts:");
        for (i, spec) in specs.iter().enumerate() {
            println!(
                "    {}: {} ({})",
                i + 1,
                spec.title.as_deref().unwrap_or("untitled"),
                spec.kind
            );
        }
    }

    println!();
}

fn print_json_output(source: &str, table: &Table, time_column: Option<&str>, specs: &[ChartSpec]) {
    let summary = summarize(table);

    print!(
        r#"{{"source":"{}","rows":{},"columns":{},"temporal":{}"#,
        source,
        summary.rows,
        summary.columns,
        time_column.map_or("null".to_string(), |t| format!("\"{t}\""))
    );

    print!(r#","charts":["#);
    for (i, spec) in specs.iter().enumerate() {
        if i > 0 {
            print!(",");
        }
        print!(
            r#"{{"kind":"{}","x":{},"y":{},"category":{},"agg":"{}","title":{}}}"#,
            spec.kind,
            json_opt(spec.x.as_deref()),
            json_opt(spec.y.as_deref()),
            json_opt(spec.category.as_deref()),
            spec.agg,
            json_opt(spec.title.as_deref()),
        );
    }
    println!("]}}");
}

fn json_opt(value: Option<&str>) -> String {
    value.map_or("null".to_string(), |v| format!("\"{v}\""))
}
