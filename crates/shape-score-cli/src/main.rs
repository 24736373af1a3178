//! shape-score - score freehand strokes against ideal shapes
//!
//! Usage:
//!   shape-score score <stroke.json|stroke.svg|-> -s <shape>   Score a stroke
//!   shape-score shapes                                         List shapes
//!   shape-score preview <shape>                                Template SVG
//!   shape-score sample <shape> --seed 7                        Generate a stroke
//!   shape-score board submit|list                              Local score board

mod cli;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;

use shape_score::ShapeKind;

use cli::{BoardArgs, CliError, PreviewArgs, SampleArgs, ScoreArgs};

#[derive(Parser, Debug)]
#[command(name = "shape-score", version, about = "Score freehand strokes against circles, rectangles and triangles")]
struct Cli {
    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a stroke against a shape
    Score(ScoreArgs),
    /// List available shapes
    Shapes,
    /// Print the template SVG for a shape
    Preview(PreviewArgs),
    /// Generate a hand-drawn looking stroke as JSON
    Sample(SampleArgs),
    /// Local score board
    Board(BoardArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // stdout carries SVG/JSON output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_shapes() {
    println!("Available shapes:");
    for kind in ShapeKind::all() {
        println!("  {:<10} (aliases: {})", kind.name(), kind.aliases().join(", "));
    }
}

fn run(command: &Command) -> Result<(), CliError> {
    match command {
        Command::Score(args) => cli::cmd_score(args),
        Command::Shapes => {
            cmd_shapes();
            Ok(())
        }
        Command::Preview(args) => cli::cmd_preview(args),
        Command::Sample(args) => cli::cmd_sample(args),
        Command::Board(args) => cli::cmd_board(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            if code == 2 {
                eprintln!("Draw first! ({})", e);
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(code)
        }
    }
}
