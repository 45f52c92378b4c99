//! Benchmark harness for codec-bench
//!
//! - [`PendingWork`]: in-flight (sample, codec) pairs with an explicit countdown
//! - [`ResultTable`]: write-once records of every settled pair
//! - [`Harness`]: the per-run dispatcher
//! - [`Reporter`]: JSON and text rendering of a finalized table
//!
//! # Example
//!
//! ```rust,no_run
//! use codecbench_codecs::CodecSet;
//! use codecbench_harness::{Harness, ReportFormat, Reporter};
//! use codecbench_samples::Sample;
//!
//! # async fn demo() -> codecbench_harness::Result<()> {
//! let samples = vec![Sample::new("hello", "hello hello hello")];
//! let table = Harness::new().run_all(&samples, &CodecSet::standard()).await;
//! println!("{}", Reporter::render(&table, ReportFormat::Json)?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod pending;
pub mod report;
pub mod results;
pub mod runner;
pub mod state;

pub use error::{HarnessError, Result};
pub use pending::{PairKey, PendingWork};
pub use report::{ReportFormat, Reporter};
pub use results::{compression_ratio_percent, elapsed_ms, CodecRecord, ResultEntry, ResultTable};
pub use runner::{Harness, RunObserver};
pub use state::RunState;
