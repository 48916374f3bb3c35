use std::io::{BufRead, BufReader};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::Level;

#[derive(Parser)]
#[command(name = "puml", about = "Parse a PlantUML structural diagram into a model")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Report lines that match no rule
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: Format,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match &cli.file {
        Some(path) => tracing::info!(path = %path.display(), strict = cli.strict, "parsing diagram"),
        None => tracing::info!(strict = cli.strict, "parsing diagram from stdin"),
    }

    let reader: Box<dyn BufRead> = match &cli.file {
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("ERROR: failed to read {}: {e}", path.display());
                return ExitCode::from(1);
            }
        },
        None => Box::new(std::io::stdin().lock()),
    };

    let parsed = match puml::Parser::new().strict(cli.strict).parse(reader) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::from(1);
        }
    };

    match cli.format {
        Format::Text => print!("{}", parsed.model),
        Format::Json => match serde_json::to_string_pretty(&parsed.model) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("ERROR: failed to serialize model: {e}");
                return ExitCode::from(1);
            }
        },
    }

    for warning in &parsed.warnings {
        eprintln!("WARNING: line {}: unrecognized line: {}", warning.line, warning.text);
    }
    if parsed.warnings.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
