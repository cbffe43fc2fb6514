use clap::{Parser, Subcommand, ValueEnum};
use journeymap::import::validate_document;
use journeymap::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Define CLI-specific enums for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantCli {
    Inline,
    Export,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Png,
    FlowPdf,
    StepsPdf,
    Svg,
}

/// User journey graph builder and exporter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a journey document and list every problem found
    Validate {
        /// Path to the journey JSON file
        path: String,
    },
    /// Print the flow graph of a journey as JSON
    Graph {
        /// Path to the journey JSON file
        path: String,
        /// Which graph variant to build
        #[arg(long, value_enum, default_value = "inline")]
        variant: VariantCli,
        /// Step id to highlight
        #[arg(long)]
        selected: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Export a journey as an image or document
    Export {
        /// Path to the journey JSON file
        path: String,
        #[arg(short, long, value_enum, default_value = "flow-pdf")]
        format: FormatCli,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Optional export config JSON file
        #[arg(short, long)]
        config: Option<String>,
    },
    /// List journeys, optionally filtered
    List {
        /// Journey document(s) to list instead of the built-in samples
        #[arg(long)]
        from: Option<String>,
        /// Text to search for in titles and descriptions
        #[arg(short, long)]
        query: Option<String>,
        #[arg(long)]
        value_stream: Option<String>,
        #[arg(long)]
        phase: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Validate { path } => run_validate(&path),
        Command::Graph {
            path,
            variant,
            selected,
            pretty,
        } => run_graph(&path, variant, selected.as_deref(), pretty),
        Command::Export {
            path,
            format,
            out,
            config,
        } => run_export(&path, format, &out, config.as_deref()),
        Command::List {
            from,
            query,
            value_stream,
            phase,
        } => run_list(
            from.as_deref(),
            JourneyFilter {
                query,
                value_stream,
                phase,
            },
        ),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_journey(path: &str) -> Journey {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read journey file '{}': {}", path, e)));
    import_journey(&json).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn run_validate(path: &str) {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read journey file '{}': {}", path, e)));
    let value: serde_json::Value = serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse journey JSON: {}", e)));

    let errors = validate_document(&value, "");
    if errors.is_empty() {
        let journey = import_journey(&json).unwrap_or_else(|e| exit_with_error(&e.to_string()));
        println!(
            "'{}' is valid: {} steps (id '{}')",
            journey.title,
            journey.steps.len(),
            journey.id
        );
        for (i, step) in journey.steps.iter().enumerate() {
            println!("  {:>2}. [{}] {}", i + 1, step.id, step.title);
        }
    } else {
        eprintln!("Found {} problem(s) in '{}':", errors.len(), path);
        for error in &errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(1);
    }
}

fn run_graph(path: &str, variant: VariantCli, selected: Option<&str>, pretty: bool) {
    let journey = load_journey(path);
    let options = match variant {
        VariantCli::Inline => GraphOptions::inline(),
        VariantCli::Export => GraphOptions::export(),
    }
    .with_selection(selected);

    if let Some(id) = selected {
        if journey.step(id).is_none() {
            eprintln!("Warning: step '{}' does not exist; no node will be active.", id);
        }
    }

    let graph = build_graph(&journey, &options);
    let json = if pretty {
        serde_json::to_string_pretty(&graph)
    } else {
        serde_json::to_string(&graph)
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));
    println!("{}", json);
}

fn run_export(path: &str, format: FormatCli, out: &Path, config_path: Option<&str>) {
    let total_start = Instant::now();
    let journey = load_journey(path);

    let config = match config_path {
        Some(p) => ExportConfig::from_file(p).unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => ExportConfig::default(),
    };
    let settings = config.into_settings();

    let gate = ExportGate::new();
    let result = gate.run(|| match format {
        FormatCli::Png => export_flow_png(&journey, &settings),
        FormatCli::FlowPdf => export_flow_pdf(&journey, &settings),
        FormatCli::StepsPdf => export_steps_pdf(&journey, &settings),
        FormatCli::Svg => Ok(export_flow_svg(&journey, &settings)),
    });
    let artifact = result.unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));

    if let Err(e) = fs::create_dir_all(out) {
        exit_with_error(&format!("Failed to create output directory {:?}: {}", out, e));
    }
    let target = out.join(&artifact.filename);
    fs::write(&target, &artifact.bytes)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write {:?}: {}", target, e)));

    println!(
        "  -> Wrote {} ({} bytes) in {:?}",
        target.display(),
        artifact.bytes.len(),
        total_start.elapsed()
    );
}

fn run_list(from: Option<&str>, filter: JourneyFilter) {
    let catalog = match from {
        Some(path) => JourneyCatalog::new(
            import_journeys_file(path).unwrap_or_else(|e| exit_with_error(&e.to_string())),
        ),
        None => JourneyCatalog::with_samples(),
    };

    let matches = catalog.filter(&filter);
    println!("{} of {} journeys match", matches.len(), catalog.len());
    for journey in matches {
        let stream = journey.value_stream.as_deref().unwrap_or("-");
        println!(
            "  {:<16} {:<32} {:>2} steps  [{}]",
            journey.id,
            journey.title,
            journey.steps.len(),
            stream
        );
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
