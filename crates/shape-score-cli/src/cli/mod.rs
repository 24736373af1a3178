//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `score` - Score a drawn stroke against a shape
//! - `preview` - Render the template for a shape
//! - `sample` - Generate a hand-drawn looking stroke
//! - `board` - Submit to and list the local score board

pub mod board;
pub mod common;
pub mod config;
pub mod preview;
pub mod sample;
pub mod score;

pub use board::{cmd_board, BoardArgs};
pub use preview::{cmd_preview, PreviewArgs};
pub use sample::{cmd_sample, SampleArgs};
pub use score::{cmd_score, ScoreArgs};

use std::path::PathBuf;

use shape_score::{ScoreError, SvgError, UnknownShape};

/// Everything a subcommand can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error("{0}")]
    Shape(#[from] UnknownShape),
    #[error("could not read strokes from SVG: {0}")]
    Svg(#[from] SvgError),
    #[error("{path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("render failed: {0}")]
    Render(String),
    #[error("input has no points")]
    EmptyStroke,
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// A stroke that is too short to judge gets its own code so scripts can
    /// tell "draw more" apart from real failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Score(ScoreError::InsufficientInput { .. }) => 2,
            _ => 1,
        }
    }

    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::File { path: path.into(), source }
    }
}
