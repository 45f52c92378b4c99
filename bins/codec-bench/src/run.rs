//! One benchmark run, from configuration to rendered report

use codecbench_cli::output::{format_count, format_duration, format_size, Status};
use codecbench_cli::progress;
use codecbench_codecs::CodecSet;
use codecbench_core::config::Config;
use codecbench_core::{Error, Result};
use codecbench_harness::{
    CodecRecord, Harness, PairKey, ReportFormat, Reporter, RunObserver, RunState,
};
use codecbench_samples::{Sample, SamplePlan};
use codecbench_telemetry::MetricsRegistry;
use indicatif::ProgressBar;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Command-line options that shape a run
#[derive(Debug, Clone)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub format: ReportFormat,
    pub offline: bool,
    pub timeout_secs: Option<u64>,
}

/// Run the benchmark and return the rendered report
pub async fn execute(options: Options) -> Result<String> {
    let state = Rc::new(Cell::new(RunState::Idle));

    let config = Config::load(options.config.as_deref())?;
    let timeout_secs = options
        .timeout_secs
        .unwrap_or(config.schema.run.timeout_secs);
    let timeout = Duration::from_secs(timeout_secs);

    advance_to(&state, RunState::FetchingSamples);
    let plan = SamplePlan::from_config(&config.schema, options.offline);
    let metrics = Arc::new(MetricsRegistry::new());
    let samples = acquire(&plan, &metrics).await?;

    let codecs = CodecSet::standard();
    let bar = progress::pair_progress((samples.len() * codecs.len()) as u64);
    let observer = ProgressObserver {
        bar: bar.clone(),
        state: Rc::clone(&state),
    };

    let started = Instant::now();
    let table = Harness::new()
        .with_timeout(timeout)
        .with_metrics(Arc::clone(&metrics))
        .with_observer(observer)
        .run_all(&samples, &codecs)
        .await;

    let elapsed = started.elapsed();

    let failed = table.failed_count();
    if failed == 0 {
        progress::finish_success(&bar, "done");
        Status::success(&format!(
            "{} benchmarked in {}",
            format_count(table.len(), "pair", "pairs"),
            format_duration(elapsed)
        ));
    } else {
        let failed = format_count(failed, "pair", "pairs");
        progress::finish_error(&bar, &format!("{} failed", failed));
        Status::warning(&format!(
            "{} failed after {}, see the report for reasons",
            failed,
            format_duration(elapsed)
        ));
    }

    let report = Reporter::render(&table, options.format)
        .map_err(|e| Error::report(e.to_string()).with_source(e))?;
    advance_to(&state, RunState::Reported);

    debug!(metrics = %metrics.export_json(), "Run metrics");

    Ok(report)
}

async fn acquire(plan: &SamplePlan, metrics: &MetricsRegistry) -> Result<Vec<Sample>> {
    let spinner = progress::spinner(&format!(
        "Acquiring {}",
        format_count(plan.sources().len(), "sample", "samples")
    ));
    let timer = metrics.timer("samples.acquire");

    let samples = match plan.acquire().await {
        Ok(samples) => samples,
        Err(e) => {
            progress::finish_error(&spinner, "Sample acquisition failed");
            return Err(e.into());
        }
    };
    timer.stop();
    spinner.finish_and_clear();

    for (source, sample) in plan.sources().iter().zip(&samples) {
        Status::info(&format!(
            "{} {}: {} bytes ({})",
            sample.name,
            source.describe(),
            sample.len(),
            format_size(sample.len() as u64)
        ));
    }

    Ok(samples)
}

fn advance_to(state: &Cell<RunState>, target: RunState) {
    let mut current = state.get();
    while current < target && current.advance() {}
    state.set(current);
}

struct ProgressObserver {
    bar: ProgressBar,
    state: Rc<Cell<RunState>>,
}

impl RunObserver for ProgressObserver {
    fn phase(&mut self, state: RunState) {
        advance_to(&self.state, state);
    }

    fn settled(&mut self, _key: PairKey, sample: &str, codec: &str, record: &CodecRecord) {
        self.bar.inc(1);
        if let CodecRecord::Failed { reason, .. } = record {
            self.bar.println(Status::failed_pair(sample, codec, reason));
        }
    }
}
