//! Production KPIs for the bottling-line executive dashboard.
//!
//! The pipeline is [`generator::generate`] -> [`analytics::annotate`] ->
//! [`analytics::select`] -> [`analytics::aggregate`], with
//! [`analytics::build_view`] shaping the result for presentation.

pub mod analytics;
pub mod domain;
pub mod error;
pub mod generator;

pub use error::KpiError;
pub use generator::{generate, generate_with_rng, GeneratorConfig, MeasurementRanges};
