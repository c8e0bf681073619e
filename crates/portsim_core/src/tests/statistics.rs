//! Summaries computed over projected terminal values

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::model::ReturnPool;
use crate::simulation::project;
use crate::stats::{probability_below, summarize};

#[test]
fn test_constant_pool_has_no_dispersion() {
    let pool = ReturnPool::from_rows(vec![vec![0.02, 0.02]; 3]).unwrap();
    let config = SimulationConfig::new(2_000.0, 64, 12).unwrap();

    let terminal = project(&pool, &config, Some(10)).unwrap().terminal();
    let summary = summarize(&terminal).unwrap();
    let expected = 2_000.0 * 1.02_f64.powi(12);

    assert!((summary.mean - expected).abs() < 1e-9 * expected);
    assert!(summary.standard_deviation < 1e-9 * expected);
    assert!((summary.percentile_5 - expected).abs() < 1e-9 * expected);
    assert!((summary.percentile_50 - expected).abs() < 1e-9 * expected);
    assert!((summary.percentile_95 - expected).abs() < 1e-9 * expected);
}

#[test]
fn test_summary_of_projection_is_ordered() {
    let pool = ReturnPool::new(
        vec!["Equity".to_string(), "Bonds".to_string()],
        vec![
            vec![0.045, 0.004],
            vec![-0.062, 0.006],
            vec![0.021, -0.003],
            vec![0.013, 0.005],
            vec![-0.018, 0.002],
            vec![0.057, 0.007],
        ],
    )
    .unwrap();
    let config = SimulationConfig::from_years(1_000.0, 2_000, 10).unwrap();

    let projection = project(&pool, &config, Some(42)).unwrap();
    let terminal = projection.terminal();
    let summary = summarize(&terminal).unwrap();

    assert!(summary.percentile_5 <= summary.percentile_50);
    assert!(summary.percentile_50 <= summary.percentile_95);
    assert!(summary.standard_deviation > 0.0);

    let min = terminal.iter().copied().fold(f64::INFINITY, f64::min);
    let max = terminal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(min <= summary.percentile_5 && summary.percentile_95 <= max);
    assert!(min <= summary.mean && summary.mean <= max);

    // The median band ends at the terminal median
    let band = projection.percentile_band(50.0).unwrap();
    assert_eq!(band.len(), 120);
    assert!((band[119] - summary.percentile_50).abs() < 1e-9);

    let loss = probability_below(&terminal, config.initial_amount).unwrap();
    assert!((0.0..=1.0).contains(&loss));
}

#[test]
fn test_same_seed_same_summary() {
    let pool = ReturnPool::from_rows(vec![vec![0.03, -0.01], vec![-0.02, 0.04]]).unwrap();
    let config = SimulationConfig::new(500.0, 800, 24).unwrap();

    let a = summarize(&project(&pool, &config, Some(1)).unwrap().terminal()).unwrap();
    let b = summarize(&project(&pool, &config, Some(1)).unwrap().terminal()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_empty_terminal_distribution() {
    let terminal: Vec<f64> = Vec::new();
    assert_eq!(summarize(&terminal), Err(SimulationError::EmptyDistribution));
}
