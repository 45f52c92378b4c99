//! The benchmark run.
//!
//! A [`Harness`] is built per run and consumed by [`Harness::run_all`]. It
//! dispatches every (sample, codec) pair in sample-major, codec-minor order
//! from a single task, then drains the pairs still in flight. Pairs that
//! settle during dispatch are recorded straight away, so a synchronous
//! codec's elapsed time covers only its own work.

use crate::pending::{PairKey, PendingWork};
use crate::results::{CodecRecord, ResultTable};
use crate::state::RunState;
use codecbench_codecs::{CodecSet, CompressionError};
use codecbench_samples::Sample;
use codecbench_telemetry::MetricsRegistry;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Hooks called as pairs are dispatched and settled
pub trait RunObserver {
    /// Called on entering [`RunState::Dispatching`] and [`RunState::Draining`]
    fn phase(&mut self, _state: RunState) {}

    fn dispatched(&mut self, _key: PairKey, _sample: &str, _codec: &str) {}

    fn settled(&mut self, _key: PairKey, _sample: &str, _codec: &str, _record: &CodecRecord) {}
}

/// One-shot benchmark run
pub struct Harness {
    timeout: Option<Duration>,
    metrics: Arc<MetricsRegistry>,
    observer: Option<Box<dyn RunObserver>>,
    pending: PendingWork,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Harness with no timeout and a private metrics registry
    pub fn new() -> Self {
        Self {
            timeout: None,
            metrics: Arc::new(MetricsRegistry::new()),
            observer: None,
            pending: PendingWork::new(),
        }
    }

    /// Settle every pair still in flight as failed once `timeout` has elapsed
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Record counters and per-codec timings into `metrics`
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl RunObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Run every codec against every sample and return the finalized table.
    ///
    /// Codec failures are recorded, never propagated. Returns once every
    /// dispatched pair has settled or the timeout has fired.
    pub async fn run_all(mut self, samples: &[Sample], codecs: &CodecSet) -> ResultTable {
        let mut table = ResultTable::new(codecs.names());
        // A timeout too large to represent is no deadline at all
        let deadline = self
            .timeout
            .and_then(|timeout| tokio::time::Instant::now().checked_add(timeout));
        let mut in_flight = FuturesUnordered::new();

        debug!(
            samples = samples.len(),
            codecs = codecs.len(),
            "Dispatching"
        );
        self.enter(RunState::Dispatching);

        for (s, sample) in samples.iter().enumerate() {
            for (c, codec) in codecs.iter().enumerate() {
                let key = PairKey::new(s, c);
                let started = Instant::now();
                if let Err(e) = self.pending.insert(key, started) {
                    warn!(error = %e, "Skipping dispatch");
                    continue;
                }

                self.metrics.increment("pairs.dispatched");
                self.track_in_flight();
                if let Some(observer) = self.observer.as_mut() {
                    observer.dispatched(key, &sample.name, codec.name());
                }
                debug!(sample = %sample.name, codec = codec.name(), "Dispatched");

                let mut future = codec.dispatch(sample.payload.clone());
                match (&mut future).now_or_never() {
                    Some(outcome) => self.settle(&mut table, samples, key, outcome),
                    None => in_flight.push(future.map(move |outcome| (key, outcome))),
                }
            }
        }

        debug!(in_flight = self.pending.len(), "Draining");
        self.enter(RunState::Draining);

        while !self.pending.is_drained() {
            let next = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, in_flight.next()).await {
                        Ok(next) => next,
                        Err(_) => {
                            self.expire(&mut table, samples);
                            break;
                        }
                    }
                }
                None => in_flight.next().await,
            };

            match next {
                Some((key, outcome)) => self.settle(&mut table, samples, key, outcome),
                None => {
                    warn!(
                        pending = self.pending.len(),
                        "Pairs left pending with nothing in flight"
                    );
                    self.abandon(&mut table, samples, "never settled");
                    break;
                }
            }
        }

        info!(
            records = table.len(),
            failed = table.failed_count(),
            "Run finished"
        );

        table
    }

    fn enter(&mut self, state: RunState) {
        if let Some(observer) = self.observer.as_mut() {
            observer.phase(state);
        }
    }

    fn settle(
        &mut self,
        table: &mut ResultTable,
        samples: &[Sample],
        key: PairKey,
        outcome: Result<Vec<u8>, CompressionError>,
    ) {
        let started = match self.pending.settle(key) {
            Ok(started) => started,
            Err(e) => {
                warn!(error = %e, "Ignoring settlement");
                return;
            }
        };
        self.track_in_flight();
        let elapsed = started.elapsed();
        let sample = &samples[key.sample];
        let codec = table.codec_name(key.codec).unwrap_or_default().to_string();

        let record = match outcome {
            Ok(compressed) => {
                self.metrics.increment("pairs.completed");
                self.metrics.histogram(
                    &format!("codec.{}.ms", codec),
                    elapsed.as_secs_f64() * 1000.0,
                );
                CodecRecord::completed(elapsed, compressed.len(), sample.len())
            }
            Err(e) => {
                warn!(sample = %sample.name, codec = %codec, error = %e, "Codec failed");
                self.metrics.increment("pairs.failed");
                CodecRecord::failed(elapsed, e.to_string())
            }
        };

        self.record(table, sample, key, &codec, record);
    }

    /// Settle everything still pending as timed out
    fn expire(&mut self, table: &mut ResultTable, samples: &[Sample]) {
        let timeout = self.timeout.unwrap_or_default();
        warn!(
            pending = self.pending.len(),
            timeout_secs = timeout.as_secs_f64(),
            "Run timed out"
        );
        let reason = format!("timed out after {}ms", timeout.as_millis());
        self.abandon(table, samples, &reason);
    }

    fn abandon(&mut self, table: &mut ResultTable, samples: &[Sample], reason: &str) {
        for key in self.pending.keys() {
            let started = match self.pending.settle(key) {
                Ok(started) => started,
                Err(_) => continue,
            };
            self.metrics.increment("pairs.failed");
            let sample = &samples[key.sample];
            let codec = table.codec_name(key.codec).unwrap_or_default().to_string();
            let record = CodecRecord::failed(started.elapsed(), reason);
            self.record(table, sample, key, &codec, record);
        }
        self.track_in_flight();
    }

    fn track_in_flight(&self) {
        self.metrics.gauge("pairs.in_flight", self.pending.len() as u64);
    }

    fn record(
        &mut self,
        table: &mut ResultTable,
        sample: &Sample,
        key: PairKey,
        codec: &str,
        record: CodecRecord,
    ) {
        if let Some(observer) = self.observer.as_mut() {
            observer.settled(key, &sample.name, codec, &record);
        }
        debug!(
            sample = %sample.name,
            codec,
            elapsed_ms = record.elapsed_ms(),
            failed = record.is_failed(),
            "Settled"
        );
        if let Err(e) = table.record(key, &sample.name, sample.len(), record) {
            warn!(error = %e, "Dropping record");
        }
    }
}
