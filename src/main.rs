use anyhow::Result;

use triton_bench::bench::{BenchmarkReport, BenchmarkRunner, OutputFormat};
use triton_bench::config::Config;
use triton_bench::tokenizer::InputTokenizer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first (for log level)
    let config = Config::load()?;
    config.validate()?;

    init_logging(&config);

    let bench = config.bench;
    tracing::info!(
        url = %bench.endpoint_url(),
        tokenizer = %bench.tokenizer,
        max_length = bench.max_length,
        body_encoding = %bench.body_encoding,
        "Triton benchmark starting"
    );

    let tokenizer = InputTokenizer::load(&bench.tokenizer, bench.max_length)?;
    let runner = BenchmarkRunner::new(bench.clone(), &tokenizer)?;
    tracing::info!(
        seq_len = runner.request().inputs[0].data.len(),
        "Inference payload built"
    );

    let timings = match runner.run().await {
        Ok(timings) => timings,
        Err(e) => {
            tracing::error!(error = %e, "Benchmark aborted");
            return Err(e.into());
        }
    };

    let report = BenchmarkReport::from_timings(&bench.label, &timings)?
        .with_run_info(&bench.endpoint_url(), bench.warmup_requests);

    match bench.output {
        OutputFormat::Line => report.print_line(),
        OutputFormat::Table => report.print_table(),
        OutputFormat::Json => println!("{}", report.to_json()),
    }

    Ok(())
}

/// Initialize logging with the configured level; RUST_LOG takes precedence
fn init_logging(config: &Config) {
    let log_level = config.log_level.to_lowercase();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
