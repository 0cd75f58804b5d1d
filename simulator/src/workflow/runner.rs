use crate::report::{ExampleRecord, MatchRecord, PairRecord, SignificanceReport, ToleranceReport};
use crate::workflow::config::WorkflowConfig;
use alignmentcore::prelude::Projection;
use alignmentcore::processing::{
    all_pairs, AlignmentMatcher, DiskRegion, RandomMarkerGenerator, SignificanceEngine,
};
use alignmentcore::projection::WebMercator;
use alignmentcore::telemetry::LogProgress;
use alignmentcore::Marker;
use anyhow::Context;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    projection: Arc<dyn Projection>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self::with_projection(config, Arc::new(WebMercator::new()))
    }

    pub fn with_projection(config: WorkflowConfig, projection: Arc<dyn Projection>) -> Self {
        Self { config, projection }
    }

    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }

    /// Sweeps every configured tolerance over the observed markers.
    pub fn execute(
        &self,
        markers: &[Marker],
        cancel: Option<&AtomicBool>,
    ) -> anyhow::Result<SignificanceReport> {
        let region = DiskRegion::enclosing(markers).context("fitting simulation region")?;
        let generator = RandomMarkerGenerator::new(region, self.projection.clone())
            .with_limit(self.config.marker_limit);

        let mut tolerances = Vec::with_capacity(self.config.tolerances.len());
        for &tolerance in &self.config.tolerances {
            let report = self
                .evaluate_tolerance(markers, &generator, tolerance, cancel)
                .with_context(|| format!("evaluating tolerance {} deg", tolerance))?;
            log::info!("{}", report.summary_line());
            tolerances.push(report);
        }

        Ok(SignificanceReport {
            data_file: self.config.data_file.display().to_string(),
            dedup: self.config.dedup,
            targets: self.config.targets.clone(),
            pairs: all_pairs(markers).iter().map(PairRecord::from).collect(),
            tolerances,
        })
    }

    fn evaluate_tolerance(
        &self,
        markers: &[Marker],
        generator: &RandomMarkerGenerator,
        tolerance: f64,
        cancel: Option<&AtomicBool>,
    ) -> anyhow::Result<ToleranceReport> {
        let matcher =
            AlignmentMatcher::new(self.config.targets.clone(), tolerance, self.config.dedup)?;
        let observed: Vec<MatchRecord> = matcher
            .find_matches(markers)
            .iter()
            .map(MatchRecord::from)
            .collect();

        let engine = SignificanceEngine::new(
            generator.clone(),
            matcher,
            self.config.to_simulation_config(),
        );
        let progress = LogProgress::new();
        let outcome = engine.simulate(markers.len(), Some(&progress), cancel)?;
        let p_value = outcome.distribution.significance(observed.len())?;

        let examples = outcome
            .examples
            .into_iter()
            .map(|example| {
                let matches = engine
                    .matcher()
                    .find_matches(&example.markers)
                    .iter()
                    .map(MatchRecord::from)
                    .collect();
                ExampleRecord { example, matches }
            })
            .collect();

        Ok(ToleranceReport::new(
            tolerance,
            markers.len(),
            observed,
            outcome.distribution.as_slice().to_vec(),
            p_value,
            outcome.seed,
            examples,
        ))
    }
}
