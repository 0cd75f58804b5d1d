use crate::workflow::config::ColumnConfig;
use alignmentcore::prelude::Projection;
use alignmentcore::Marker;
use anyhow::{bail, Context};
use log::{info, warn};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Markers read from a CSV file plus the number of rows skipped as incomplete
/// or outside the projection's domain.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    pub markers: Vec<Marker>,
    pub dropped: usize,
}

/// Reads marker sites from a CSV with a label column and two decimal-degree columns.
pub struct MarkerReader {
    path: PathBuf,
    columns: ColumnConfig,
}

impl MarkerReader {
    pub fn new<P: AsRef<Path>>(path: P, columns: ColumnConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            columns,
        }
    }

    pub fn read(&self, projection: &dyn Projection) -> anyhow::Result<MarkerSet> {
        let reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("opening marker file {}", self.path.display()))?;
        let set = self
            .read_from(reader, projection)
            .with_context(|| format!("reading marker file {}", self.path.display()))?;
        info!(
            "loaded {} markers from {} ({} unusable rows dropped)",
            set.markers.len(),
            self.path.display(),
            set.dropped
        );
        Ok(set)
    }

    fn read_from<R: Read>(
        &self,
        mut reader: csv::Reader<R>,
        projection: &dyn Projection,
    ) -> anyhow::Result<MarkerSet> {
        let headers = reader.headers().context("reading CSV header")?.clone();
        let column = |name: &str| -> anyhow::Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .with_context(|| format!("missing column {:?}", name))
        };
        let name_idx = column(&self.columns.name)?;
        let lat_idx = column(&self.columns.latitude)?;
        let lon_idx = column(&self.columns.longitude)?;

        let mut markers = Vec::new();
        let mut dropped = 0;
        for (row, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("parsing CSV row {}", row + 1))?;
            let name = record.get(name_idx).map(str::trim).unwrap_or("");
            let lat = parse_coordinate(record.get(lat_idx));
            let lon = parse_coordinate(record.get(lon_idx));

            let marker = match (name.is_empty(), lat, lon) {
                (false, Some(lat), Some(lon)) if projection.covers(lat, lon) => {
                    Some(Marker::from_geographic(name, lat, lon, projection))
                }
                _ => None,
            };
            match marker.filter(|m| m.x.is_finite() && m.y.is_finite()) {
                Some(marker) => markers.push(marker),
                None => dropped += 1,
            }
        }

        if markers.is_empty() {
            bail!("no complete marker rows");
        }
        warn_on_duplicate_names(&markers);

        Ok(MarkerSet { markers, dropped })
    }
}

fn parse_coordinate(field: Option<&str>) -> Option<f64> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Pair deduplication keys on names, so repeated names merge distinct pairs.
fn warn_on_duplicate_names(markers: &[Marker]) {
    let mut seen = HashSet::new();
    for marker in markers {
        if !seen.insert(marker.name.as_str()) {
            warn!(
                "duplicate marker name {:?}; pair deduplication will merge them",
                marker.name
            );
        }
    }
}
