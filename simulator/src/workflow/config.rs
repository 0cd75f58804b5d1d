use crate::workflow::targets::standard_targets;
use alignmentcore::prelude::{SimulationConfig, DEFAULT_MARKER_LIMIT};
use alignmentcore::AlignmentTarget;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CSV header names holding the label and geographic coordinates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnConfig {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            name: "LUGAR".into(),
            latitude: "Latitude (dec) (y)".into(),
            longitude: "Longitude (dec) (x)".into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub data_file: PathBuf,
    pub tolerances: Vec<f64>,
    pub trials: usize,
    pub examples: usize,
    pub dedup: bool,
    pub seed: Option<u64>,
    pub workers: Option<usize>,
    pub progress_every: usize,
    pub marker_limit: usize,
    pub columns: ColumnConfig,
    pub targets: Vec<AlignmentTarget>,
    pub report_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("resources/Marcahuasi_markers.csv"),
            tolerances: vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 1.5, 2.0, 2.5],
            trials: 100,
            examples: 1,
            dedup: false,
            seed: None,
            workers: None,
            progress_every: 1000,
            marker_limit: DEFAULT_MARKER_LIMIT,
            columns: ColumnConfig::default(),
            targets: standard_targets(),
            report_path: None,
            log_path: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            trials: self.trials,
            examples: self.examples,
            seed: self.seed,
            workers: self.workers,
            progress_every: self.progress_every,
        }
    }
}
