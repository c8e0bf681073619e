//! Run a projection and assemble its report.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::WrapErr;
use portsim_core::{
    ProjectionProgress, ReturnPool, SimulationConfig, probability_below, project_with_progress,
    summarize,
};

use crate::report::Report;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// Project `pool` under `config` with a fixed seed and summarize the terminal values.
///
/// Progress is logged at debug level from a side thread while the projection runs.
pub fn run_projection(
    pool: &ReturnPool,
    config: &SimulationConfig,
    seed: u64,
) -> color_eyre::Result<Report> {
    tracing::info!(
        paths = config.path_count,
        horizon = config.horizon,
        seed,
        "starting projection"
    );
    let started = Instant::now();
    let progress = ProjectionProgress::new(config.path_count);
    let finished = AtomicBool::new(false);

    let result = thread::scope(|scope| {
        let reporter = scope.spawn(|| {
            loop {
                thread::park_timeout(PROGRESS_INTERVAL);
                if finished.load(Ordering::Acquire) {
                    break;
                }
                tracing::debug!(
                    completed = progress.completed(),
                    total = progress.total(),
                    "projection {:.0}% done",
                    progress.fraction() * 100.0
                );
            }
        });

        let result = project_with_progress(pool, config, Some(seed), &progress);
        finished.store(true, Ordering::Release);
        reporter.thread().unpark();
        result
    });
    let projection = result.wrap_err("projection failed")?;

    let terminal = projection.terminal();
    let summary = summarize(&terminal)?;
    let probability_of_loss = probability_below(&terminal, config.initial_amount)?;

    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        median = summary.percentile_50,
        "projection finished"
    );

    let assets = (0..pool.num_assets())
        .filter_map(|asset| pool.asset_statistics(asset))
        .collect();

    Ok(Report {
        initial_amount: config.initial_amount,
        path_count: config.path_count,
        horizon_months: config.horizon,
        seed,
        summary,
        probability_of_loss,
        assets,
    })
}
