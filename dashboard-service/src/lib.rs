pub mod api;
pub mod config;
pub mod export;
pub mod metrics_server;
pub mod observability;
pub mod pipeline;
pub mod transform;

pub use pipeline::{render, RenderOutput, RenderRequest};
