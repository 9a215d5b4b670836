mod config;
mod driver;
mod logging;

use std::path::PathBuf;
use std::process;

use bindspec_core::DuplicatePolicy;
use clap::Parser;

use config::Overrides;

/// Generate native function registrations from declarative spec documents.
#[derive(Parser)]
#[command(
    name = "bindspec",
    version,
    about = "Generate native function registrations from declarative spec documents"
)]
struct Cli {
    /// Configuration file (default: ./bindspec.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory root spec documents are resolved against
    #[arg(long)]
    specs_dir: Option<PathBuf>,

    /// Root spec document, relative to the specs directory (repeatable)
    #[arg(long = "root")]
    roots: Vec<PathBuf>,

    /// Header scanned for exported symbols (repeatable)
    #[arg(long = "header")]
    headers: Vec<PathBuf>,

    /// Path of the generated source file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Policy for names declared more than once (last-wins, first-wins, error)
    #[arg(long)]
    on_duplicate: Option<DuplicatePolicy>,

    /// Only log warnings and errors
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet);

    let overrides = Overrides {
        specs_dir: cli.specs_dir,
        roots: cli.roots,
        headers: cli.headers,
        output: cli.output,
        on_duplicate: cli.on_duplicate,
    };
    let config = match config::load(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error generating bindings: {}", e);
            process::exit(1);
        }
    };

    match driver::run(&config) {
        Ok(summary) => println!(
            "Generated {} with {} functions (skipped {})",
            summary.output.display(),
            summary.emitted,
            summary.skipped
        ),
        Err(e) => {
            eprintln!("error generating bindings: {}", e);
            process::exit(1);
        }
    }
}
