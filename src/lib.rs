//! Loss Ratio Dashboard - synthetic P&C loss experience and an interactive loss ratio view
//!
//! This library provides:
//! - A seeded generator for a star-schema loss dataset (premium, incurred, developed loss)
//! - CSV writing and fail-fast loading of the fact table
//! - Filtering and aggregation of reported vs developed loss ratios
//! - A local axum server that redraws the dashboard charts on every filter change

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod server;

// Re-export commonly used types
pub use analysis::{build_dashboard, DashboardView, FilterSelection};
pub use config::{BusinessLineSpec, GeneratorConfig, ServerConfig};
pub use dataset::{load_dataset, write_dataset, Dataset, LossRecord};
pub use error::{DashboardError, Result};
pub use generator::DatasetGenerator;
