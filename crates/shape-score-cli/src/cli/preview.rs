//! Preview command: the template a player is asked to copy.

use std::path::PathBuf;

use clap::Args;

use shape_score::ShapeKind;

use super::common::{preview_svg, render_png, write_output};
use super::CliError;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    pub shape: ShapeKind,

    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also render the preview to a PNG file
    #[arg(long)]
    pub png: Option<PathBuf>,
}

/// Execute the preview command.
pub fn cmd_preview(args: &PreviewArgs) -> Result<(), CliError> {
    let svg = preview_svg(args.shape);
    write_output(args.output.as_deref(), &svg)?;

    if let Some(png) = &args.png {
        render_png(&svg, png, 1.0)?;
    }
    Ok(())
}
