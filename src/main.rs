use clap::{ArgAction, Parser, ValueEnum};
use fretchord::{ChordDiagram, ChordFinder, ChordReport, FinderConfig};
use std::path::PathBuf;
use std::process;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Yaml,
    Json,
}

/// Derive guitar chord fingerings from scale-degree tones
#[derive(Debug, Parser)]
#[command(name = "fretchord", version, about)]
struct Cli {
    /// Chord tones as scale degrees of C, root first (e.g. `1 3 5`, `5 7 2 4`, `.6 1 3`)
    #[arg(required = true)]
    tones: Vec<String>,

    /// YAML file with search limits
    #[arg(short, long, env = "FRETCHORD_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Show at most this many fingerings
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print only the chord name
    #[arg(long)]
    name_only: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fretchord={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render_text(report: &ChordReport) -> String {
    if report.is_unplayable() {
        return format!("{}: no practical fingering", report.name);
    }
    report
        .results()
        .map(|result| {
            let title = format!("{}  {}", result.name, result.chain);
            ChordDiagram::from_chain(result.chain).render_text(&title)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(?cli, "parsed arguments");

    let config = match &cli.config {
        Some(path) => match FinderConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration from {}", path.display());
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => FinderConfig::default(),
    };

    let finder = match ChordFinder::with_config(config) {
        Ok(finder) => finder,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut report = match finder.find(&cli.tones) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Some(limit) = cli.limit {
        report.fingerings.truncate(limit);
    }

    if cli.name_only {
        println!("{}", report.name);
        return;
    }

    let output = match cli.format {
        OutputFormat::Text => Ok(render_text(&report)),
        OutputFormat::Yaml => serde_yaml::to_string(&report).map_err(|e| e.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(&report).map_err(|e| e.to_string()),
    };

    match output {
        Ok(text) => println!("{}", text.trim_end()),
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            process::exit(1);
        }
    }
}
