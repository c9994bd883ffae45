//! Records a few checkpoints around simulated work and prints a report.
//!
//! ```bash
//! RUST_LOG=checkpoint_timer=trace cargo run --example checkpoint_report
//! ```

use checkpoint_timer::{ReportConfig, Result, TimeChecker, TimeUnit};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let checker = TimeChecker::new();
    let start = checker.record_checkpoint("start");

    thread::sleep(Duration::from_millis(120));
    let loaded = checker.record_checkpoint("config loaded");

    thread::scope(|scope| {
        for worker in 0..3 {
            let checker = &checker;
            scope.spawn(move || {
                thread::sleep(Duration::from_millis(40 * (worker + 1)));
                checker.record_checkpoint(format!("worker {} done", worker));
            });
        }
    });
    let done = checker.record_checkpoint("done");

    println!("Full run:");
    checker.write_report(&mut std::io::stdout(), TimeUnit::Millis)?;

    println!();
    println!("Workers only:");
    let config = ReportConfig::from_toml_str(
        r#"
        unit = "millis"
        timestamp_format = "[hour]:[minute]:[second].[subsecond digits:3]"
        "#,
    )?;
    let workers = checker.between_or_eq(&done, &loaded)?;
    print!("{}", checker.render_report_with(&workers, &config)?);

    println!();
    println!(
        "Total: {} ms",
        checker.duration_between(&start, &done, TimeUnit::Millis)?
    );
    Ok(())
}
