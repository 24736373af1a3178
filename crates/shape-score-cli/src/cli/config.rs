//! Scoring config files.
//!
//! Configs are YAML files; every field is optional and falls back to the
//! library defaults:
//!
//! ```yaml
//! min_points: 10
//! resample_count: 200
//! circle_tolerance: 0.25
//! rectangle_edge_divisor: 3.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use shape_score::{ScoringConfig, Tolerances, DEFAULT_MIN_POINTS, DEFAULT_RESAMPLE_COUNT};

use super::CliError;

/// On-disk form of [`ScoringConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Strokes with fewer raw points are rejected
    #[serde(default = "default_min_points")]
    pub min_points: usize,

    /// Points each stroke is resampled to
    #[serde(default = "default_resample_count")]
    pub resample_count: usize,

    /// Relative radius error at which a circle scores 0
    #[serde(default = "default_circle_tolerance")]
    pub circle_tolerance: f64,

    /// Edge allowance is min(width, height) / divisor
    #[serde(default = "default_rectangle_edge_divisor")]
    pub rectangle_edge_divisor: f64,
}

fn default_min_points() -> usize {
    DEFAULT_MIN_POINTS
}

fn default_resample_count() -> usize {
    DEFAULT_RESAMPLE_COUNT
}

fn default_circle_tolerance() -> f64 {
    Tolerances::default().circle_relative_error
}

fn default_rectangle_edge_divisor() -> f64 {
    Tolerances::default().rectangle_edge_divisor
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            min_points: default_min_points(),
            resample_count: default_resample_count(),
            circle_tolerance: default_circle_tolerance(),
            rectangle_edge_divisor: default_rectangle_edge_divisor(),
        }
    }
}

impl ConfigFile {
    /// Parse YAML text. An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<Self, CliError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
        Self::parse(&content)
    }

    pub fn to_scoring_config(&self) -> ScoringConfig {
        ScoringConfig::default()
            .with_min_points(self.min_points)
            .with_resample_count(self.resample_count)
            .with_circle_tolerance(self.circle_tolerance)
            .with_rectangle_edge_divisor(self.rectangle_edge_divisor)
    }
}

/// Resolve the scoring config: the given file, or the defaults.
///
/// The result is validated so a bad file fails before any input is read.
pub fn load_scoring_config(path: Option<&Path>) -> Result<ScoringConfig, CliError> {
    let config = match path {
        Some(path) => {
            let config = ConfigFile::load(path)?.to_scoring_config();
            info!(path = %path.display(), ?config, "loaded scoring config");
            config
        }
        None => ScoringConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_score::ScoreError;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ConfigFile::parse("").unwrap();
        assert_eq!(config.to_scoring_config(), ScoringConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ConfigFile::parse("circle_tolerance: 0.1\nmin_points: 4\n").unwrap();
        let scoring = config.to_scoring_config();

        assert_eq!(scoring.min_points, 4);
        assert_eq!(scoring.tolerances.circle_relative_error, 0.1);
        assert_eq!(scoring.resample_count, DEFAULT_RESAMPLE_COUNT);
        assert_eq!(scoring.tolerances.rectangle_edge_divisor, 3.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(ConfigFile::parse("min_pts: 4\n"), Err(CliError::Yaml(_))));
    }

    #[test]
    fn loads_from_disk_and_validates() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.yaml");
        fs::write(&good, "resample_count: 64\n").unwrap();
        assert_eq!(load_scoring_config(Some(&good)).unwrap().resample_count, 64);

        let bad = dir.path().join("bad.yaml");
        fs::write(&bad, "resample_count: 1\n").unwrap();
        assert!(matches!(
            load_scoring_config(Some(&bad)),
            Err(CliError::Score(ScoreError::InvalidConfig(_)))
        ));

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(load_scoring_config(Some(&missing)), Err(CliError::File { .. })));
    }
}
