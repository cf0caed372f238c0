//! LineKit command-line interface
//!
//! Usage: linekit <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use linekit::commands::{
    FilterCommand, GenerateCommand, GenerateConfig, PermuteCommand, QueensCommand, SizeSpec,
    TspCommand,
};
use linekit::parallel;
use linekit::LineError;

#[derive(Parser)]
#[command(name = "linekit")]
#[command(author = "Didier Guillevic")]
#[command(version)]
#[command(about = "LineKit: incremental line extraction toolkit and classic text utilities", long_about = None)]
struct Cli {
    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mask every occurrence of a pattern with asterisks
    Filter {
        /// Byte pattern to mask (must be non-empty)
        pattern: String,

        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print all N-queens solutions as row indices per column
    Queens {
        /// Board size
        n: usize,

        /// Print only the number of solutions
        #[arg(short = 'c', long)]
        count: bool,
    },

    /// Print all permutations of a string in ascending order
    Permute {
        /// String to permute
        string: String,
    },

    /// Shortest closed tour over cities read as "x, y" lines
    Tsp {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Generate seeded random line data
    Generate {
        /// Number of lines (accepts 100, 10K, 2M, ...)
        #[arg(short, long, default_value = "1K")]
        lines: String,

        /// RNG seed for reproducible output
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Minimum line length in bytes
        #[arg(long, default_value = "0")]
        min_len: usize,

        /// Maximum line length in bytes
        #[arg(long, default_value = "80")]
        max_len: usize,

        /// End the final line without a newline
        #[arg(long)]
        no_trailing_newline: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Configure thread pool if --threads specified
    parallel::configure_threads(cli.threads);

    let result = match cli.command {
        Commands::Filter { pattern, input } => run_filter(pattern, input),
        Commands::Queens { n, count } => run_queens(n, count),
        Commands::Permute { string } => run_permute(string),
        Commands::Tsp { input } => run_tsp(input),
        Commands::Generate {
            lines,
            seed,
            min_len,
            max_len,
            no_trailing_newline,
        } => run_generate(lines, seed, min_len, max_len, no_trailing_newline),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Open the input path, or stdin when the path is `-` or absent.
fn open_input(input: Option<PathBuf>) -> Result<Box<dyn Read>, LineError> {
    match input {
        Some(path) if path.to_string_lossy() != "-" => Ok(Box::new(File::open(path)?)),
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn run_filter(pattern: String, input: Option<PathBuf>) -> Result<(), LineError> {
    let cmd = FilterCommand::new(pattern.into_bytes());

    let mut reader = open_input(input)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    cmd.run(&mut reader, &mut handle)
}

fn run_queens(n: usize, count: bool) -> Result<(), LineError> {
    let cmd = QueensCommand { count_only: count };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    cmd.run(n, &mut handle)
}

fn run_permute(string: String) -> Result<(), LineError> {
    let cmd = PermuteCommand::new();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    cmd.run(string.as_bytes(), &mut handle)
}

fn run_tsp(input: Option<PathBuf>) -> Result<(), LineError> {
    let cmd = TspCommand::new();

    let reader = open_input(input)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    cmd.run(reader, &mut handle)
}

fn run_generate(
    lines: String,
    seed: u64,
    min_len: usize,
    max_len: usize,
    no_trailing_newline: bool,
) -> Result<(), LineError> {
    let lines = SizeSpec::from_str(&lines)
        .ok_or_else(|| {
            LineError::Config(format!(
                "Invalid line count '{}'. Use formats like 100, 10K, 2M",
                lines
            ))
        })?
        .count;

    let cmd = GenerateCommand::new(GenerateConfig {
        lines,
        seed,
        min_len,
        max_len,
        trailing_newline: !no_trailing_newline,
    });

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    cmd.run(&mut handle)
}
