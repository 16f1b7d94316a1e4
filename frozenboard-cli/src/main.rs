mod config;
mod logging;
mod output;
mod parse;
mod session;

use clap::Parser;
use frozenboard_core::Standings;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use crate::config::OutputFormat;
use crate::session::run_session;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "frozenboard", version, about = "Contest scoreboard with freeze and scroll reveal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Process scoreboard commands, one per line, until END
    Run(RunArgs),
    /// Create a default config file at ~/.config/frozenboard/config.toml
    Init,
}

#[derive(Parser)]
struct RunArgs {
    /// File with one command per line (default: stdin)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output one JSON object per command instead of text lines
    #[arg(long)]
    json: bool,

    /// Trace scroll steps and print a summary to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/frozenboard/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default output format, input file, etc.");
        }
    }
}

fn run(args: RunArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let verbose = args.verbose || cfg.verbose.unwrap_or(false);
    logging::init(verbose);

    let format = if args.json { OutputFormat::Json } else { cfg.format.unwrap_or_default() };
    let input_path = args.input.clone().or_else(|| cfg.input.map(PathBuf::from));

    let mut standings = Standings::new();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = match &input_path {
        Some(path) => {
            let file = File::open(path)
                .unwrap_or_else(|e| bail(format!("Failed to open input {}: {e}", path.display())));
            if verbose {
                eprintln!("Reading commands from {}", path.display());
            }
            run_session(&mut standings, BufReader::new(file), &mut out, format)
        }
        None => run_session(&mut standings, io::stdin().lock(), &mut out, format),
    };
    let stats = result.unwrap_or_else(|e| bail(e));

    if verbose {
        eprintln!(
            "Processed {} commands ({} rejected, {} unparseable lines skipped)",
            stats.commands, stats.failed, stats.skipped,
        );
        eprintln!(
            "{} teams, {} problems, contest {}",
            standings.team_count(),
            standings.problem_count(),
            if standings.is_frozen() { "still frozen" } else { "unfrozen" },
        );
    }
    if !stats.ended {
        log::warn!("input ended without END");
    }
}
