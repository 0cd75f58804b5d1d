use crate::math::stats::StatsHelper;
use crate::model::Marker;
use crate::prelude::{
    AlignmentError, AlignmentResult, ProgressObserver, SimulationConfig, DEFAULT_ALPHA,
};
use crate::processing::generator::RandomMarkerGenerator;
use crate::processing::matcher::AlignmentMatcher;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::TrialCounter;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Sorted match counts from simulated layouts; the null distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpiricalDistribution {
    counts: Vec<usize>,
}

impl EmpiricalDistribution {
    /// Takes ownership of raw per-trial counts and sorts them once.
    pub fn from_counts(mut counts: Vec<usize>) -> Self {
        counts.sort_unstable();
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    pub fn max(&self) -> Option<usize> {
        self.counts.last().copied()
    }

    pub fn mean(&self) -> f64 {
        StatsHelper::mean(&self.counts)
    }

    /// `(#{d < observed}, #{d <= observed})`.
    pub fn ranks(&self, observed: usize) -> (usize, usize) {
        StatsHelper::insertion_points(&self.counts, observed)
    }

    /// Probability that a random layout reaches `observed` matches, using the
    /// midpoint of the two insertion points so tied trials split credit.
    pub fn significance(&self, observed: usize) -> AlignmentResult<f64> {
        StatsHelper::midpoint_upper_tail(&self.counts, observed).ok_or_else(|| {
            AlignmentError::InsufficientData("empirical distribution has no trials".into())
        })
    }
}

pub fn is_significant(p_value: f64) -> bool {
    p_value < DEFAULT_ALPHA
}

/// A simulated layout kept for inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedExample {
    pub trial: usize,
    pub markers: Vec<Marker>,
    pub match_count: usize,
}

#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub distribution: EmpiricalDistribution,
    pub examples: Vec<SimulatedExample>,
    /// Base seed the trials were drawn from.
    pub seed: u64,
}

/// Runs repeated random layouts through the matcher to build the null distribution.
#[derive(Debug, Clone)]
pub struct SignificanceEngine {
    generator: RandomMarkerGenerator,
    matcher: AlignmentMatcher,
    config: SimulationConfig,
    logger: LogManager,
}

impl SignificanceEngine {
    pub fn new(
        generator: RandomMarkerGenerator,
        matcher: AlignmentMatcher,
        config: SimulationConfig,
    ) -> Self {
        Self {
            generator,
            matcher,
            config,
            logger: LogManager::new("significance"),
        }
    }

    pub fn matcher(&self) -> &AlignmentMatcher {
        &self.matcher
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulates `config.trials` layouts of `marker_count` markers.
    ///
    /// Trial `k` draws from `seed + k`, so the distribution does not depend on
    /// the worker count. Once `cancel` is set no further trials start and the
    /// run fails with [`AlignmentError::Cancelled`].
    pub fn simulate(
        &self,
        marker_count: usize,
        observer: Option<&dyn ProgressObserver>,
        cancel: Option<&AtomicBool>,
    ) -> AlignmentResult<SimulationOutcome> {
        self.generator.check_count(marker_count)?;

        let trials = self.config.trials;
        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        self.logger.record(&format!(
            "simulating {} trials of {} markers (tolerance {} deg, seed {})",
            trials,
            marker_count,
            self.matcher.tolerance(),
            seed
        ));

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.workers.unwrap_or(0))
            .build()
            .map_err(|err| AlignmentError::WorkerPool(err.to_string()))?;

        let counter = TrialCounter::new();
        let every = self.config.progress_every;

        let counts = pool.install(|| {
            (0..trials)
                .into_par_iter()
                .try_fold(Vec::new, |mut local: Vec<usize>, trial| {
                    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                        return Err(AlignmentError::Cancelled {
                            completed: counter.completed(),
                        });
                    }

                    local.push(self.run_trial(seed, trial, marker_count)?.1);

                    let done = counter.record_completed();
                    if let Some(observer) = observer {
                        if every > 0 && done % every == 0 {
                            observer.on_progress(done, trials);
                        }
                    }
                    Ok(local)
                })
                .try_reduce(Vec::new, |mut merged, local| {
                    merged.extend(local);
                    Ok(merged)
                })
        })?;

        let distribution = EmpiricalDistribution::from_counts(counts);
        let examples = (0..self.config.examples.min(trials))
            .map(|trial| {
                let (markers, match_count) = self.run_trial(seed, trial, marker_count)?;
                Ok(SimulatedExample {
                    trial,
                    markers,
                    match_count,
                })
            })
            .collect::<AlignmentResult<Vec<_>>>()?;

        self.logger.detail(&format!(
            "distribution ready: {} trials, mean {:.3}, max {:?}",
            distribution.len(),
            distribution.mean(),
            distribution.max()
        ));

        Ok(SimulationOutcome {
            distribution,
            examples,
            seed,
        })
    }

    fn run_trial(
        &self,
        seed: u64,
        trial: usize,
        marker_count: usize,
    ) -> AlignmentResult<(Vec<Marker>, usize)> {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial as u64));
        let markers = self.generator.generate(marker_count, &mut rng)?;
        let count = self.matcher.count_matches(&markers);
        Ok((markers, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlignmentTarget;
    use crate::processing::generator::DiskRegion;
    use crate::projection::IdentityProjection;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn engine(
        targets: Vec<AlignmentTarget>,
        tolerance: f64,
        config: SimulationConfig,
    ) -> SignificanceEngine {
        let generator =
            RandomMarkerGenerator::new(DiskRegion::unit(), Arc::new(IdentityProjection));
        let matcher = AlignmentMatcher::new(targets, tolerance, false).unwrap();
        SignificanceEngine::new(generator, matcher, config)
    }

    fn seeded(trials: usize, workers: Option<usize>) -> SimulationConfig {
        SimulationConfig {
            trials,
            examples: 0,
            seed: Some(11),
            workers,
            progress_every: 0,
        }
    }

    #[derive(Default)]
    struct CountingObserver {
        calls: AtomicUsize,
        last_total: AtomicUsize,
    }

    impl ProgressObserver for CountingObserver {
        fn on_progress(&self, _completed: usize, total: usize) {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.last_total.store(total, Ordering::Relaxed);
        }
    }

    #[test]
    fn significance_on_crafted_distribution() {
        let distribution = EmpiricalDistribution::from_counts(vec![3, 0, 5, 1, 1, 0, 2, 3, 1]);
        assert_eq!(distribution.as_slice(), &[0, 0, 1, 1, 1, 2, 3, 3, 5]);
        assert_eq!(distribution.ranks(1), (2, 5));
        let p = distribution.significance(1).unwrap();
        assert!((p - (1.0 - 3.5 / 9.0)).abs() < 1e-12);
        assert!((p - 0.6111).abs() < 1e-4);
    }

    #[test]
    fn significance_extremes() {
        let distribution = EmpiricalDistribution::from_counts(vec![2, 2, 4]);
        assert_eq!(distribution.significance(0).unwrap(), 1.0);
        assert_eq!(distribution.significance(9).unwrap(), 0.0);
        assert!(is_significant(distribution.significance(9).unwrap()));
        assert!(!is_significant(distribution.significance(2).unwrap()));
    }

    #[test]
    fn significance_is_non_increasing_in_observed_count() {
        let distribution =
            EmpiricalDistribution::from_counts(vec![0, 0, 1, 1, 1, 2, 3, 3, 5, 8, 8]);
        let values: Vec<f64> = (0..12)
            .map(|c| distribution.significance(c).unwrap())
            .collect();
        for window in values.windows(2) {
            assert!(window[1] <= window[0]);
        }
        assert!(values.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn empty_distribution_reports_insufficient_data() {
        let distribution = EmpiricalDistribution::from_counts(Vec::new());
        assert!(distribution.is_empty());
        assert!(matches!(
            distribution.significance(0),
            Err(AlignmentError::InsufficientData(_))
        ));
    }

    #[test]
    fn wide_tolerance_yields_every_ordered_pair_each_trial() {
        let targets = vec![AlignmentTarget::new("Any", "south", 180.0)];
        let engine = engine(targets, 180.0, seeded(1000, None));
        let outcome = engine.simulate(3, None, None).unwrap();
        assert_eq!(outcome.distribution.len(), 1000);
        assert!(outcome.distribution.as_slice().iter().all(|&c| c == 6));
    }

    #[test]
    fn distribution_does_not_depend_on_worker_count() {
        let targets = vec![
            AlignmentTarget::new("Equinox", "rise", 90.0),
            AlignmentTarget::new("Equinox", "set", 270.0),
        ];
        let single = engine(targets.clone(), 5.0, seeded(200, Some(1)))
            .simulate(8, None, None)
            .unwrap();
        let several = engine(targets, 5.0, seeded(200, Some(4)))
            .simulate(8, None, None)
            .unwrap();
        assert_eq!(single.distribution, several.distribution);
        assert_eq!(single.seed, 11);
    }

    #[test]
    fn examples_replay_their_trials() {
        let targets = vec![AlignmentTarget::new("Equinox", "rise", 90.0)];
        let config = SimulationConfig {
            examples: 2,
            ..seeded(50, Some(2))
        };
        let engine = engine(targets, 10.0, config);
        let outcome = engine.simulate(5, None, None).unwrap();

        assert_eq!(outcome.examples.len(), 2);
        for example in &outcome.examples {
            assert_eq!(example.markers.len(), 5);
            assert_eq!(
                engine.matcher().count_matches(&example.markers),
                example.match_count
            );
        }
        assert_ne!(outcome.examples[0].markers, outcome.examples[1].markers);
    }

    #[test]
    fn over_limit_marker_count_is_rejected_before_simulating() {
        let targets = vec![AlignmentTarget::new("Equinox", "rise", 90.0)];
        let engine = engine(targets, 1.0, seeded(10, None));
        assert!(matches!(
            engine.simulate(51, None, None),
            Err(AlignmentError::TooManyMarkers { requested: 51, .. })
        ));
    }

    #[test]
    fn progress_observer_fires_at_cadence() {
        let targets = vec![AlignmentTarget::new("Equinox", "rise", 90.0)];
        let config = SimulationConfig {
            progress_every: 10,
            ..seeded(100, Some(3))
        };
        let observer = CountingObserver::default();
        engine(targets, 1.0, config)
            .simulate(4, Some(&observer), None)
            .unwrap();
        assert_eq!(observer.calls.load(Ordering::Relaxed), 10);
        assert_eq!(observer.last_total.load(Ordering::Relaxed), 100);
    }

    #[test]
    fn cancelled_run_is_discarded() {
        let targets = vec![AlignmentTarget::new("Equinox", "rise", 90.0)];
        let cancel = AtomicBool::new(true);
        let result = engine(targets, 1.0, seeded(100, None)).simulate(4, None, Some(&cancel));
        assert!(matches!(result, Err(AlignmentError::Cancelled { completed: 0 })));
    }

    #[test]
    fn zero_trials_leave_an_empty_distribution() {
        let targets = vec![AlignmentTarget::new("Equinox", "rise", 90.0)];
        let outcome = engine(targets, 1.0, seeded(0, None))
            .simulate(4, None, None)
            .unwrap();
        assert!(outcome.distribution.is_empty());
        assert!(outcome.distribution.significance(0).is_err());
    }
}
