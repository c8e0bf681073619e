//! Command-line front end for bootstrap portfolio projection
//!
//! Loads a return pool (or raw price history) and run settings from YAML or
//! JSON, runs the projection from `portsim_core`, and renders the summary.

pub mod input;
pub mod logging;
pub mod report;
pub mod run;
pub mod settings;

pub use input::{load_pool, read_document};
pub use logging::init_logging;
pub use report::Report;
pub use run::run_projection;
pub use settings::{Overrides, RunSettings};
