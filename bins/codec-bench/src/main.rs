//! codec-bench - compression codec benchmark
//!
//! Compresses every sample with every codec and prints one report to stdout.
//! Progress and logs go to stderr.

use clap::{Parser, ValueEnum};
use codecbench_harness::ReportFormat;
use codecbench_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod run;

/// Benchmark deflate, Brotli, LZMA and gzip on generated and fetched samples
#[derive(Parser, Debug)]
#[command(name = "codec-bench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: codec-bench.toml in a standard location)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Skip remote samples
    #[arg(long)]
    offline: bool,

    /// Run timeout in seconds, overriding the configuration
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Text => ReportFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    if let Err(e) = codecbench_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    // A timed-out background codec must not hold up process exit, so the
    // runtime is shut down without waiting for blocking workers.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{} failed to start runtime: {}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let options = run::Options {
        config: cli.config,
        format: cli.format.into(),
        offline: cli.offline,
        timeout_secs: cli.timeout,
    };
    let result = runtime.block_on(run::execute(options));
    runtime.shutdown_background();

    match result {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            let code = u8::try_from(e.exit_code())
                .ok()
                .filter(|code| *code != 0)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["codec-bench"]);
        assert!(cli.config.is_none());
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(!cli.offline);
        assert!(cli.timeout.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["codec-bench", "--timeout", "0"]).is_err());
    }
}
