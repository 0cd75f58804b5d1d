use crate::report::model::SignificanceReport;
use anyhow::Context;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Persists a finished report as JSON and appends its summary lines to a run log.
pub struct ReportWriter {
    report_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
}

impl ReportWriter {
    pub fn new(report_path: Option<PathBuf>, log_path: Option<PathBuf>) -> Self {
        Self {
            report_path,
            log_path,
        }
    }

    pub fn publish(&self, report: &SignificanceReport) -> anyhow::Result<()> {
        for line in report.summary_lines() {
            println!("{}", line);
        }
        if let Some(path) = &self.report_path {
            write_json(path, report)?;
            log::info!("wrote report {}", path.display());
        }
        if let Some(path) = &self.log_path {
            append_summary(path, report)?;
        }
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}

fn write_json(path: &Path, report: &SignificanceReport) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let file =
        File::create(path).with_context(|| format!("creating report {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}

fn append_summary(path: &Path, report: &SignificanceReport) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening run log {}", path.display()))?;
    for line in report.summary_lines() {
        writeln!(file, "{} | {}", report.data_file, line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::ToleranceReport;
    use tempfile::tempdir;

    fn sample_report() -> SignificanceReport {
        SignificanceReport {
            data_file: "sites.csv".into(),
            tolerances: vec![ToleranceReport::new(
                0.5,
                4,
                Vec::new(),
                vec![0, 1, 2],
                0.83333,
                7,
                Vec::new(),
            )],
            ..Default::default()
        }
    }

    #[test]
    fn writer_emits_json_and_appends_log() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("out/report.json");
        let log_path = dir.path().join("out/run.log");
        let writer = ReportWriter::new(Some(json_path.clone()), Some(log_path.clone()));

        writer.publish(&sample_report()).unwrap();
        writer.publish(&sample_report()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["tolerances"][0]["distribution"], serde_json::json!([0, 1, 2]));
        assert_eq!(json["tolerances"][0]["seed"], 7);

        let log = fs::read_to_string(&log_path).unwrap();
        assert_eq!(log.lines().count(), 2);
        assert!(log.starts_with("sites.csv | The p-value for 0 alignments on 4 markers"));
    }

    #[test]
    fn writer_without_paths_only_prints() {
        let writer = ReportWriter::new(None, None);
        assert!(writer.publish(&sample_report()).is_ok());
    }
}
