//! Synthetic loss experience generator

mod development;
mod engine;
mod seasonality;

pub use development::DevelopmentModel;
pub use engine::{days_in_month, round_cents, DatasetGenerator, SegmentFactor, MIN_PREMIUM};
pub use seasonality::{seasonal_factor, trend_factor};
