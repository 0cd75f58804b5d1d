use anyhow::Context;
use clap::Parser;
use generator::triangles::{sample_triplets, write_triplets_csv};
use loader::MarkerReader;
use report::ReportWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod loader;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Monte Carlo significance of marker alignments")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Marker CSV (overrides the workflow's data_file)
    #[arg(long)]
    markers: Option<PathBuf>,
    /// Angle tolerance in degrees; repeat to sweep several
    #[arg(long = "tolerance")]
    tolerances: Vec<f64>,
    #[arg(long)]
    trials: Option<usize>,
    #[arg(long)]
    examples: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    workers: Option<usize>,
    /// Count each aligned pair only once
    #[arg(long, default_value_t = false)]
    dedup: bool,
    /// Write the full JSON report here
    #[arg(long)]
    output: Option<PathBuf>,
    /// Append summary lines to this run log
    #[arg(long)]
    log: Option<PathBuf>,
    /// Sample this many random unit-disk triangles and export their edge angles
    #[arg(long)]
    triangles: Option<usize>,
    #[arg(long, default_value = "triplets.csv")]
    triangles_out: PathBuf,
}

impl Args {
    fn workflow_config(&self) -> anyhow::Result<WorkflowConfig> {
        let mut config = match &self.workflow {
            Some(path) => WorkflowConfig::load(path)?,
            None => WorkflowConfig::default(),
        };
        if let Some(path) = &self.markers {
            config.data_file = path.clone();
        }
        if !self.tolerances.is_empty() {
            config.tolerances = self.tolerances.clone();
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(examples) = self.examples {
            config.examples = examples;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
        config.dedup |= self.dedup;
        if self.output.is_some() {
            config.report_path = self.output.clone();
        }
        if self.log.is_some() {
            config.log_path = self.log.clone();
        }
        Ok(config)
    }
}

/// Sets `cancel` on Ctrl+C so the simulation stops between trials.
fn watch_for_interrupt(cancel: Arc<AtomicBool>) -> anyhow::Result<()> {
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for signal handling")?;
    thread::spawn(move || {
        runtime.block_on(async {
            if signal::ctrl_c().await.is_ok() {
                log::warn!("interrupt received; stopping after current trials");
                cancel.store(true, Ordering::Relaxed);
            }
        });
    });
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(count) = args.triangles {
        let triplets = sample_triplets(count, args.seed.unwrap_or_else(rand::random::<u64>));
        write_triplets_csv(&args.triangles_out, &triplets)?;
        println!(
            "Wrote {} angle triplets from {} triangles to {}",
            triplets.len(),
            count,
            args.triangles_out.display()
        );
        return Ok(());
    }

    let workflow_config = args.workflow_config()?;
    let cancel = Arc::new(AtomicBool::new(false));
    watch_for_interrupt(cancel.clone())?;

    let runner = Runner::new(workflow_config.clone());
    let marker_set = MarkerReader::new(&workflow_config.data_file, workflow_config.columns.clone())
        .read(runner.projection())?;

    let report = runner.execute(&marker_set.markers, Some(cancel.as_ref()))?;
    ReportWriter::new(workflow_config.report_path, workflow_config.log_path).publish(&report)?;

    Ok(())
}
