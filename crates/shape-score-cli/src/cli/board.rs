//! Local score board.
//!
//! Scores are kept in a JSON file next to the player (default
//! `scores.json`). Only the name, shape, score and time are stored; the
//! drawing itself never is.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use shape_score::{format_score, ShapeKind, UnknownShape};

use super::CliError;

/// Name used when a player gives none.
pub const ANONYMOUS: &str = "Anonymous";
/// Entries shown by `board list` unless told otherwise.
pub const DEFAULT_LIMIT: usize = 50;

#[derive(Args, Debug)]
pub struct BoardArgs {
    #[command(subcommand)]
    pub command: BoardCommand,
}

#[derive(Subcommand, Debug)]
pub enum BoardCommand {
    /// Record a score
    Submit {
        /// Shape name; must be circle, rectangle or triangle
        #[arg(long)]
        shape: String,
        #[arg(long)]
        score: f64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "scores.json")]
        file: PathBuf,
    },
    /// Show the best scores
    List {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long, default_value = "scores.json")]
        file: PathBuf,
    },
}

/// One recorded score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub name: String,
    pub shape: String,
    pub score: f64,
    /// Unix seconds
    pub created_at: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub entries: Vec<BoardEntry>,
}

impl ScoreBoard {
    /// Load the board; a missing file is an empty board.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no score board yet");
                Ok(Self::default())
            }
            Err(e) => Err(CliError::file(path, e)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| CliError::file(path, e))
    }

    /// Validate and record a score.
    ///
    /// The shape must name one of the three kinds exactly (any case); the
    /// score is clamped into `[0, 10]`, with non-finite values stored as 0.
    pub fn submit(
        &mut self,
        name: Option<&str>,
        shape: &str,
        score: f64,
        now: DateTime<Utc>,
    ) -> Result<&BoardEntry, CliError> {
        let shape_name = shape.trim().to_lowercase();
        if !ShapeKind::all().iter().any(|k| k.name() == shape_name) {
            return Err(UnknownShape(shape.to_string()).into());
        }

        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => ANONYMOUS.to_string(),
        };
        let score = if score.is_finite() { score.clamp(0.0, 10.0) } else { 0.0 };

        self.entries.push(BoardEntry {
            name,
            shape: shape_name,
            score,
            created_at: now.timestamp(),
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Best `limit` entries, highest score first; ties keep submission order.
    pub fn top(&self, limit: usize) -> Vec<&BoardEntry> {
        let mut sorted: Vec<&BoardEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
        sorted.truncate(limit);
        sorted
    }
}

/// Execute a board subcommand.
pub fn cmd_board(args: &BoardArgs) -> Result<(), CliError> {
    match &args.command {
        BoardCommand::Submit { shape, score, name, file } => {
            let mut board = ScoreBoard::load(file)?;
            let entry = board.submit(name.as_deref(), shape, *score, Utc::now())?.clone();
            board.save(file)?;
            info!(name = %entry.name, shape = %entry.shape, score = entry.score, "score submitted");
            println!("Saved {} for {} ({})", format_score(entry.score), entry.name, entry.shape);
        }
        BoardCommand::List { limit, file } => {
            let board = ScoreBoard::load(file)?;
            let top = board.top(*limit);
            if top.is_empty() {
                println!("No scores yet.");
            }
            for (rank, entry) in top.iter().enumerate() {
                let when = DateTime::<Utc>::from_timestamp(entry.created_at, 0)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!(
                    "{:>3}. {:>4.1}  {:<10} {:<20} {}",
                    rank + 1,
                    entry.score,
                    entry.shape,
                    entry.name,
                    when
                );
            }
        }
    }
    Ok(())
}
