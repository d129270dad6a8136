//! Loss development: maturing an as-reported estimate into an ultimate figure

use crate::config::BusinessLineSpec;
use crate::error::{DashboardError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Development applied to every period of one (business line, region) segment
#[derive(Debug, Clone)]
pub struct DevelopmentModel {
    /// Segment development factor, always >= 1.0
    factor: f64,
    noise: Normal<f64>,
}

impl DevelopmentModel {
    /// Build a model with a fixed factor and Normal(1, noise_sd) per-row noise
    pub fn new(factor: f64, noise_sd: f64) -> Result<Self> {
        if !(factor >= 1.0) || !factor.is_finite() {
            return Err(DashboardError::Config(format!(
                "development factor must be finite and >= 1.0, got {}",
                factor
            )));
        }
        let noise = unit_normal("development", noise_sd)?;
        Ok(Self { factor, noise })
    }

    /// Draw the segment factor uniformly from the business line's development range
    pub fn draw(line: &BusinessLineSpec, noise_sd: f64, rng: &mut impl Rng) -> Result<Self> {
        let factor = rng.random_range(line.development_min..=line.development_max);
        Self::new(factor, noise_sd)
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Developed (ultimate) loss for one period.
    ///
    /// The noisy multiplier is floored at 1.0 so the result never falls
    /// below `incurred`.
    pub fn develop(&self, incurred: f64, rng: &mut impl Rng) -> f64 {
        let multiplier = (self.factor * self.noise.sample(rng)).max(1.0);
        incurred * multiplier
    }
}

/// Normal(1, sd) noise; sd must be finite and non-negative
pub(crate) fn unit_normal(label: &str, sd: f64) -> Result<Normal<f64>> {
    if !(sd >= 0.0) || !sd.is_finite() {
        return Err(DashboardError::Config(format!(
            "{} noise sd must be finite and non-negative, got {}",
            label, sd
        )));
    }
    Normal::new(1.0, sd).map_err(|e| DashboardError::Config(format!("{} noise sd {}: {}", label, sd, e)))
}
