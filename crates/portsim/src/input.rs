//! Loading return pools and settings documents from disk.
//!
//! Files ending in `.json` are parsed as JSON, everything else as YAML.

use std::path::Path;

use color_eyre::eyre::{WrapErr, bail, eyre};
use portsim_core::{PriceHistory, ReturnPool};
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Read and deserialize a YAML or JSON document.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> color_eyre::Result<T> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    match DocumentFormat::from_path(path) {
        DocumentFormat::Json => serde_json::from_str(&content)
            .wrap_err_with(|| format!("failed to parse {} as JSON", path.display())),
        DocumentFormat::Yaml => serde_saphyr::from_str(&content)
            .map_err(|e| eyre!("failed to parse {} as YAML: {e}", path.display())),
    }
}

/// Input document: either a ready return pool or raw price history
#[derive(Debug, Deserialize)]
struct InputFile {
    #[serde(default)]
    returns: Option<ReturnPool>,
    #[serde(default)]
    prices: Option<PriceHistory>,
}

/// Load the return pool from an input file.
///
/// The file holds exactly one of `returns` (period rows of fractional returns)
/// or `prices` (price series resampled to monthly returns).
pub fn load_pool(path: &Path) -> color_eyre::Result<ReturnPool> {
    let input: InputFile = read_document(path)?;

    let pool = match (input.returns, input.prices) {
        (Some(pool), None) => pool,
        (None, Some(history)) => history
            .monthly_returns()
            .wrap_err_with(|| format!("failed to build monthly returns from {}", path.display()))?,
        (Some(_), Some(_)) => bail!(
            "{} defines both `returns` and `prices`; keep only one",
            path.display()
        ),
        (None, None) => bail!("{} defines neither `returns` nor `prices`", path.display()),
    };

    tracing::info!(
        assets = pool.num_assets(),
        periods = pool.num_periods(),
        "loaded return pool from {}",
        path.display()
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("pool.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("POOL.JSON")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("pool.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("pool")),
            DocumentFormat::Yaml
        );
    }

    #[test]
    fn test_load_returns_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "pool.yaml",
            "returns:\n  assets: [PETR4, WEGE3]\n  periods:\n    - [0.01, 0.02]\n    - [-0.03, 0.015]\n",
        );

        let pool = load_pool(&path).unwrap();
        assert_eq!(pool.names(), &["PETR4", "WEGE3"]);
        assert_eq!(pool.num_periods(), 2);
        assert_eq!(pool.get(1, 0), Some(-0.03));
    }

    #[test]
    fn test_load_returns_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "pool.json",
            r#"{"returns": {"periods": [[0.10], [-0.05], [0.02]]}}"#,
        );

        let pool = load_pool(&path).unwrap();
        assert_eq!(pool.names(), &["asset_0"]);
        assert_eq!(pool.num_periods(), 3);
    }

    #[test]
    fn test_load_prices_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "prices.json",
            r#"{"prices": {"series": [
                {"asset": "LEVE3", "points": [
                    {"date": "2024-01-31", "close": 20.0},
                    {"date": "2024-02-29", "close": 22.0},
                    {"date": "2024-03-28", "close": 19.8}
                ]}
            ]}}"#,
        );

        let pool = load_pool(&path).unwrap();
        assert_eq!(pool.names(), &["LEVE3"]);
        assert_eq!(pool.num_periods(), 2);
        assert!((pool.get(0, 0).unwrap() - 0.1).abs() < 1e-12);
        assert!((pool.get(1, 0).unwrap() + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_ambiguous_or_empty_input() {
        let dir = tempfile::tempdir().unwrap();

        let both = write(
            &dir,
            "both.json",
            r#"{"returns": {"periods": [[0.1]]}, "prices": {"series": []}}"#,
        );
        assert!(load_pool(&both).is_err());

        let neither = write(&dir, "neither.json", "{}");
        assert!(load_pool(&neither).is_err());

        let invalid = write(&dir, "invalid.json", r#"{"returns": {"periods": []}}"#);
        assert!(load_pool(&invalid).is_err());

        assert!(load_pool(&dir.path().join("missing.yaml")).is_err());
    }
}
