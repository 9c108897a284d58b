use archcycles::app::config::CycleConfig;
use archcycles::cli::{self, SliceOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "archtool", version, about = "Architecture rule checks over an imported class model")]
struct Cli {
    /// Class model JSON file
    model: PathBuf,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that slices are free of cycles
    Cycles {
        /// Package pattern defining the slices, e.g. 'com.example.(*)..'
        #[arg(long)]
        slices: String,

        /// Slice description template, e.g. 'Module $1'
        #[arg(long)]
        naming: Option<String>,

        /// Stop after this many cycles
        #[arg(long)]
        max_cycles: Option<usize>,

        /// Dependencies listed per edge of a cycle
        #[arg(long)]
        max_dependencies_per_edge: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the dependencies between code units
    Dependencies {
        /// Only dependencies originating in this code unit
        #[arg(long)]
        origin: Option<String>,

        /// Only dependencies targeting this code unit
        #[arg(long)]
        target: Option<String>,

        /// Print the dependencies as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "archcycles=debug,warn"
        } else {
            "warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Command::Cycles {
            slices,
            naming,
            max_cycles,
            max_dependencies_per_edge,
            json,
        } => {
            let config = CycleConfig {
                max_cycles,
                max_dependencies_per_edge,
            };
            let options = SliceOptions {
                pattern: slices,
                naming,
            };
            cli::check_cycles(&cli.model, &options, config, json)
        }
        Command::Dependencies {
            origin,
            target,
            json,
        } => {
            cli::list_dependencies(&cli.model, origin.as_deref(), target.as_deref(), json)?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}
