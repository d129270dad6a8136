//! Generator configuration: dimension enumerations, period range and noise parameters

use crate::error::{DashboardError, Result};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// One business line and its loss experience parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessLineSpec {
    /// Display name, also the value written to the fact table
    pub name: String,

    /// Expected incurred loss / earned premium before seasonality and trend
    pub target_loss_ratio: f64,

    /// Lower bound of the segment development factor draw
    pub development_min: f64,

    /// Upper bound of the segment development factor draw
    pub development_max: f64,
}

impl BusinessLineSpec {
    pub fn new(name: &str, target_loss_ratio: f64, development_min: f64, development_max: f64) -> Self {
        Self {
            name: name.to_string(),
            target_loss_ratio,
            development_min,
            development_max,
        }
    }
}

fn default_seed() -> u64 { 42 }
fn default_start() -> NaiveDate { NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default() }
fn default_end() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 8, 25).unwrap_or_default() }
fn default_business_lines() -> Vec<BusinessLineSpec> {
    vec![
        BusinessLineSpec::new("Commercial Auto", 0.65, 1.08, 1.20),
        BusinessLineSpec::new("General Liability", 0.75, 1.15, 1.30),
        BusinessLineSpec::new("Workers Compensation", 0.55, 1.10, 1.25),
        BusinessLineSpec::new("Commercial Property", 0.45, 1.05, 1.12),
    ]
}
fn default_regions() -> Vec<String> {
    ["Northeast", "Southeast", "Midwest", "West"].iter().map(|r| r.to_string()).collect()
}
fn default_daily_premium_min() -> f64 { 5_000.0 }
fn default_daily_premium_max() -> f64 { 15_000.0 }
fn default_seasonal_amplitude() -> f64 { 0.10 }
fn default_loss_noise_sd() -> f64 { 0.05 }
fn default_trend_per_1000_days() -> f64 { 0.05 }
fn default_development_noise_sd() -> f64 { 0.02 }

/// Everything the dataset generator needs to produce one deterministic table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for the ChaCha20 streams
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// First reporting date; the period range starts at its month
    #[serde(default = "default_start")]
    pub start: NaiveDate,

    /// Last reporting date (inclusive)
    #[serde(default = "default_end")]
    pub end: NaiveDate,

    #[serde(default = "default_business_lines")]
    pub business_lines: Vec<BusinessLineSpec>,

    #[serde(default = "default_regions")]
    pub regions: Vec<String>,

    /// Daily premium draw bounds; monthly premium = draw * days in month
    #[serde(default = "default_daily_premium_min")]
    pub daily_premium_min: f64,

    #[serde(default = "default_daily_premium_max")]
    pub daily_premium_max: f64,

    /// Peak +/- swing of the monthly seasonal loss factor
    #[serde(default = "default_seasonal_amplitude")]
    pub seasonal_amplitude: f64,

    /// Standard deviation of the multiplicative Normal(1, sd) loss noise
    #[serde(default = "default_loss_noise_sd")]
    pub loss_noise_sd: f64,

    /// Loss trend added per 1000 days elapsed since `start`
    #[serde(default = "default_trend_per_1000_days")]
    pub trend_per_1000_days: f64,

    /// Standard deviation of the per-row development noise
    #[serde(default = "default_development_noise_sd")]
    pub development_noise_sd: f64,
}

impl GeneratorConfig {
    /// Default configuration: four commercial lines, four US regions, Jan 2022 to Aug 2025
    pub fn canonical() -> Self {
        Self {
            seed: default_seed(),
            start: default_start(),
            end: default_end(),
            business_lines: default_business_lines(),
            regions: default_regions(),
            daily_premium_min: default_daily_premium_min(),
            daily_premium_max: default_daily_premium_max(),
            seasonal_amplitude: default_seasonal_amplitude(),
            loss_noise_sd: default_loss_noise_sd(),
            trend_per_1000_days: default_trend_per_1000_days(),
            development_noise_sd: default_development_noise_sd(),
        }
    }

    /// Load a JSON configuration file; absent fields take canonical defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            DashboardError::Config(format!("cannot open {}: {}", path.display(), e))
        })?;
        let config: GeneratorConfig = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Reject dimension enumerations and parameters the generator cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.business_lines.is_empty() {
            return Err(config_err("at least one business line is required"));
        }
        if self.regions.is_empty() {
            return Err(config_err("at least one region is required"));
        }

        let mut seen = HashSet::new();
        for line in &self.business_lines {
            if line.name.trim().is_empty() {
                return Err(config_err("business line names must not be blank"));
            }
            if !seen.insert(line.name.as_str()) {
                return Err(config_err(&format!("duplicate business line: {}", line.name)));
            }
            if !(line.target_loss_ratio > 0.0 && line.target_loss_ratio <= 2.0) {
                return Err(config_err(&format!(
                    "{}: target loss ratio {} outside (0, 2]",
                    line.name, line.target_loss_ratio
                )));
            }
            if !(line.development_min >= 1.0) || !line.development_max.is_finite() {
                return Err(config_err(&format!(
                    "{}: development factors must be >= 1.0",
                    line.name
                )));
            }
            if line.development_min > line.development_max {
                return Err(config_err(&format!(
                    "{}: development range [{}, {}] is inverted",
                    line.name, line.development_min, line.development_max
                )));
            }
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            if region.trim().is_empty() {
                return Err(config_err("region names must not be blank"));
            }
            if !seen.insert(region.as_str()) {
                return Err(config_err(&format!("duplicate region: {}", region)));
            }
        }

        if self.end < self.start {
            return Err(config_err(&format!(
                "end date {} precedes start date {}",
                self.end, self.start
            )));
        }
        if !(self.daily_premium_min > 0.0) || !self.daily_premium_max.is_finite() {
            return Err(config_err("daily premium bounds must be positive and finite"));
        }
        if self.daily_premium_min > self.daily_premium_max {
            return Err(config_err("daily premium range is inverted"));
        }
        if !(0.0..1.0).contains(&self.seasonal_amplitude) {
            return Err(config_err("seasonal amplitude must lie in [0, 1)"));
        }
        for (name, value) in [
            ("loss_noise_sd", self.loss_noise_sd),
            ("development_noise_sd", self.development_noise_sd),
            ("trend_per_1000_days", self.trend_per_1000_days),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(config_err(&format!("{} must be finite and non-negative", name)));
            }
        }

        Ok(())
    }

    /// First-of-month dates covered by `[start, end]`, in order
    pub fn periods(&self) -> Vec<NaiveDate> {
        let mut periods = Vec::new();
        let Some(mut current) = self.start.with_day(1) else {
            return periods;
        };
        while current <= self.end {
            periods.push(current);
            match current.checked_add_months(Months::new(1)) {
                Some(next) => current = next,
                None => break,
            }
        }
        periods
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::canonical()
    }
}

fn config_err(message: &str) -> DashboardError {
    DashboardError::Config(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_is_valid() {
        let config = GeneratorConfig::canonical();
        assert!(config.validate().is_ok());
        assert_eq!(config.business_lines.len(), 4);
        assert_eq!(config.regions.len(), 4);
    }

    #[test]
    fn test_periods_cover_partial_last_month() {
        let config = GeneratorConfig::canonical();
        let periods = config.periods();
        // Jan 2022 through Aug 2025
        assert_eq!(periods.len(), 44);
        assert_eq!(periods[0], NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(*periods.last().unwrap(), NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    }

    #[test]
    fn test_periods_start_mid_month() {
        let config = GeneratorConfig {
            start: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            ..GeneratorConfig::canonical()
        };
        let periods = config.periods();
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0], NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        let mut config = GeneratorConfig::canonical();
        config.regions.clear();
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));

        let mut config = GeneratorConfig::canonical();
        config.business_lines.clear();
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_rejects_duplicates_and_blanks() {
        let mut config = GeneratorConfig::canonical();
        config.regions.push("West".to_string());
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::canonical();
        config.business_lines[1].name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_development_below_one() {
        let mut config = GeneratorConfig::canonical();
        config.business_lines[0].development_min = 0.95;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::canonical();
        config.business_lines[0].development_min = 1.4;
        config.business_lines[0].development_max = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let mut config = GeneratorConfig::canonical();
        config.end = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::canonical();
        config.daily_premium_min = 0.0;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::canonical();
        config.loss_noise_sd = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_defaults_fill_missing_fields() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"seed": 7, "regions": ["North", "South"]}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.regions, vec!["North", "South"]);
        assert_eq!(config.business_lines, GeneratorConfig::canonical().business_lines);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.json");
        std::fs::write(&path, r#"{"seed": 11, "start": "2024-01-01", "end": "2024-03-31"}"#).unwrap();

        let config = GeneratorConfig::from_json_path(&path).unwrap();
        assert_eq!(config.seed, 11);
        assert_eq!(config.periods().len(), 3);
        assert_eq!(config.regions, GeneratorConfig::canonical().regions);
    }

    #[test]
    fn test_from_json_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        match GeneratorConfig::from_json_path(&path) {
            Err(DashboardError::Config(message)) => assert!(message.contains("absent.json")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_path_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ seed: ").unwrap();
        assert!(matches!(GeneratorConfig::from_json_path(&path), Err(DashboardError::Json(_))));
    }
}
