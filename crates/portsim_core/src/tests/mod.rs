//! Integration tests for the projection engine
//!
//! Tests are organized by topic:
//! - `projection` - Shape, determinism, compounding and sampling of the projector
//! - `statistics` - Summaries computed over projected terminal values

mod statistics;
