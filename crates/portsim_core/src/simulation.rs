//! Bootstrap Monte Carlo projector
//!
//! Every path starts at the configured initial amount and compounds one
//! resampled historical return per period. Each draw first picks an asset
//! uniformly, then a period uniformly within that asset's series.

use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::model::{ProjectionMatrix, ReturnPool};
use crate::progress::ProjectionProgress;

/// Maximum number of paths simulated from a single batch seed
pub const MAX_BATCH_SIZE: usize = 100;

/// Source of uniform index draws used by the projector.
///
/// Every random generator is a draw source; tests can script exact draws.
pub trait DrawSource {
    /// Draw an index uniformly from `0..len`. `len` is never zero.
    fn draw_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> DrawSource for R {
    #[inline]
    fn draw_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Project `config.path_count` paths over `config.horizon` periods.
///
/// With `Some(seed)` the result is fully reproducible and does not depend on
/// whether batches run in parallel. With `None` the master seed comes from the
/// thread-local entropy source.
pub fn project(
    pool: &ReturnPool,
    config: &SimulationConfig,
    seed: Option<u64>,
) -> Result<ProjectionMatrix> {
    project_with_progress(pool, config, seed, &ProjectionProgress::new(config.path_count))
}

/// Like [`project`], reporting completed paths and honouring cancellation.
///
/// The handle is re-sized to `config.path_count` and its completed count
/// cleared when the run starts; a cancellation requested beforehand still applies.
///
/// Cancellation is checked before each batch of at most [`MAX_BATCH_SIZE`] paths;
/// a cancelled run returns [`SimulationError::Cancelled`] and no matrix.
pub fn project_with_progress(
    pool: &ReturnPool,
    config: &SimulationConfig,
    seed: Option<u64>,
    progress: &ProjectionProgress,
) -> Result<ProjectionMatrix> {
    config.validate()?;
    progress.begin(config.path_count);

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let seeds = batch_seeds(seed, config.path_count);

    tracing::debug!(
        paths = config.path_count,
        horizon = config.horizon,
        assets = pool.num_assets(),
        periods = pool.num_periods(),
        seed,
        batches = seeds.len(),
        "starting projection"
    );

    let mut values = vec![0.0; config.total_steps()];
    run_batches(pool, config, &mut values, &seeds, progress)?;

    tracing::debug!(paths = config.path_count, "projection finished");

    Ok(ProjectionMatrix::from_raw(
        config.path_count,
        config.horizon,
        values,
    ))
}

/// Project every path sequentially from one caller-supplied generator.
pub fn project_with_rng<R: Rng + ?Sized>(
    pool: &ReturnPool,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<ProjectionMatrix> {
    project_with_source(pool, config, rng)
}

/// Project every path sequentially from an arbitrary draw source.
pub fn project_with_source<S: DrawSource + ?Sized>(
    pool: &ReturnPool,
    config: &SimulationConfig,
    source: &mut S,
) -> Result<ProjectionMatrix> {
    config.validate()?;

    let mut values = vec![0.0; config.total_steps()];
    for row in values.chunks_exact_mut(config.horizon) {
        fill_path(pool, config.initial_amount, row, source);
    }

    Ok(ProjectionMatrix::from_raw(
        config.path_count,
        config.horizon,
        values,
    ))
}

/// One sub-seed per batch, drawn in order from a master generator.
fn batch_seeds(seed: u64, path_count: usize) -> Vec<u64> {
    let mut master = StdRng::seed_from_u64(seed);
    (0..path_count.div_ceil(MAX_BATCH_SIZE))
        .map(|_| master.next_u64())
        .collect()
}

#[cfg(feature = "parallel")]
fn run_batches(
    pool: &ReturnPool,
    config: &SimulationConfig,
    values: &mut [f64],
    seeds: &[u64],
    progress: &ProjectionProgress,
) -> Result<()> {
    values
        .par_chunks_mut(MAX_BATCH_SIZE * config.horizon)
        .zip(seeds.par_iter())
        .try_for_each(|(chunk, &seed)| run_batch(pool, config, chunk, seed, progress))
}

#[cfg(not(feature = "parallel"))]
fn run_batches(
    pool: &ReturnPool,
    config: &SimulationConfig,
    values: &mut [f64],
    seeds: &[u64],
    progress: &ProjectionProgress,
) -> Result<()> {
    values
        .chunks_mut(MAX_BATCH_SIZE * config.horizon)
        .zip(seeds)
        .try_for_each(|(chunk, &seed)| run_batch(pool, config, chunk, seed, progress))
}

/// Fill one batch of path rows. Batches never share rows.
fn run_batch(
    pool: &ReturnPool,
    config: &SimulationConfig,
    chunk: &mut [f64],
    seed: u64,
    progress: &ProjectionProgress,
) -> Result<()> {
    if progress.is_cancelled() {
        return Err(SimulationError::Cancelled);
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut paths = 0;
    for row in chunk.chunks_exact_mut(config.horizon) {
        fill_path(pool, config.initial_amount, row, &mut rng);
        paths += 1;
    }
    progress.add_completed(paths);
    Ok(())
}

#[inline]
fn fill_path<S: DrawSource + ?Sized>(
    pool: &ReturnPool,
    initial_amount: f64,
    row: &mut [f64],
    source: &mut S,
) {
    let mut value = initial_amount;
    for slot in row {
        let asset = source.draw_index(pool.num_assets());
        let period = source.draw_index(pool.num_periods());
        value *= 1.0 + pool.value(period, asset);
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_seeds_cover_all_paths() {
        assert_eq!(batch_seeds(7, 1).len(), 1);
        assert_eq!(batch_seeds(7, 100).len(), 1);
        assert_eq!(batch_seeds(7, 101).len(), 2);
        assert_eq!(batch_seeds(7, 1_000).len(), 10);

        // A larger run starts with the same batch seeds as a smaller one
        let small = batch_seeds(99, 250);
        let large = batch_seeds(99, 1_000);
        assert_eq!(small[..], large[..small.len()]);
    }

    #[test]
    fn test_fill_path_compounds_every_period() {
        let pool = ReturnPool::from_rows(vec![vec![0.5]]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut row = [0.0; 3];

        fill_path(&pool, 8.0, &mut row, &mut rng);

        assert_eq!(row, [12.0, 18.0, 27.0]);
    }

    #[test]
    fn test_rng_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for len in [1, 2, 7, 60] {
            for _ in 0..200 {
                assert!(rng.draw_index(len) < len);
            }
        }
    }
}
