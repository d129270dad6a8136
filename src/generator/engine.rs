//! Core dataset generator: synthetic premium, incurred and developed losses

use super::development::{unit_normal, DevelopmentModel};
use super::seasonality::{seasonal_factor, trend_factor};
use crate::config::{BusinessLineSpec, GeneratorConfig};
use crate::dataset::{Dataset, LossRecord};
use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::Serialize;

/// Smallest premium written to the table; draws below it are clamped
pub const MIN_PREMIUM: f64 = 0.01;

/// Development factor drawn for one (business line, region) segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentFactor {
    pub business_line: String,
    pub region: String,
    pub factor: f64,
}

/// A (business line, region) pair and its position in generation order
#[derive(Debug, Clone, Copy)]
struct Segment {
    index: usize,
    line: usize,
    region: usize,
}

/// Generates one deterministic fact table from a validated configuration.
///
/// Every segment draws from its own ChaCha20 stream (same seed, stream id =
/// segment index), so segments can be generated in parallel and the output
/// depends only on the seed and configuration.
pub struct DatasetGenerator {
    config: GeneratorConfig,
    periods: Vec<NaiveDate>,
    loss_noise: Normal<f64>,
}

impl DatasetGenerator {
    /// Validate the configuration and prepare a generator
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let loss_noise = unit_normal("loss", config.loss_noise_sd)?;
        let periods = config.periods();
        Ok(Self { config, periods, loss_noise })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    /// Development factors each segment will use, in generation order
    pub fn development_factors(&self) -> Result<Vec<SegmentFactor>> {
        self.segments()
            .into_iter()
            .map(|segment| {
                let mut rng = self.segment_rng(segment);
                let model = self.draw_development(segment, &mut rng)?;
                Ok(SegmentFactor {
                    business_line: self.line(segment).name.clone(),
                    region: self.config.regions[segment.region].clone(),
                    factor: model.factor(),
                })
            })
            .collect()
    }

    /// Generate the full fact table, ordered by period, business line, region
    pub fn generate(&self) -> Result<Dataset> {
        let segments = self.segments();

        let per_segment: Vec<Vec<LossRecord>> = segments
            .par_iter()
            .map(|&segment| self.generate_segment(segment))
            .collect::<Result<_>>()?;

        let mut records = Vec::with_capacity(segments.len() * self.periods.len());
        for period_idx in 0..self.periods.len() {
            for rows in &per_segment {
                records.push(rows[period_idx].clone());
            }
        }

        log::info!(
            "Generated {} rows ({} periods x {} business lines x {} regions, seed {})",
            records.len(),
            self.periods.len(),
            self.config.business_lines.len(),
            self.config.regions.len(),
            self.config.seed
        );
        Ok(Dataset::new(records))
    }

    fn segments(&self) -> Vec<Segment> {
        let regions = self.config.regions.len();
        (0..self.config.business_lines.len())
            .flat_map(|line| (0..regions).map(move |region| (line, region)))
            .enumerate()
            .map(|(index, (line, region))| Segment { index, line, region })
            .collect()
    }

    fn line(&self, segment: Segment) -> &BusinessLineSpec {
        &self.config.business_lines[segment.line]
    }

    fn segment_rng(&self, segment: Segment) -> ChaCha20Rng {
        let mut rng = ChaCha20Rng::seed_from_u64(self.config.seed);
        rng.set_stream(segment.index as u64);
        rng
    }

    /// First draw on every segment stream
    fn draw_development(&self, segment: Segment, rng: &mut ChaCha20Rng) -> Result<DevelopmentModel> {
        DevelopmentModel::draw(self.line(segment), self.config.development_noise_sd, rng)
    }

    fn generate_segment(&self, segment: Segment) -> Result<Vec<LossRecord>> {
        let mut rng = self.segment_rng(segment);
        let development = self.draw_development(segment, &mut rng)?;
        let line = self.line(segment);
        let region = &self.config.regions[segment.region];

        let Some(&first_period) = self.periods.first() else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::with_capacity(self.periods.len());
        for &period in &self.periods {
            // Premium: uniform daily rate earned over the month
            let daily = rng.random_range(self.config.daily_premium_min..=self.config.daily_premium_max);
            let mut premium = round_cents(daily * days_in_month(period) as f64);
            if premium < MIN_PREMIUM {
                log::warn!("{}/{} {}: premium {} clamped to {}", line.name, region, period, premium, MIN_PREMIUM);
                premium = MIN_PREMIUM;
            }

            // Incurred: target loss ratio with seasonality, noise and trend
            let days_elapsed = (period - first_period).num_days();
            let raw_incurred = premium
                * line.target_loss_ratio
                * seasonal_factor(period.month(), self.config.seasonal_amplitude)
                * self.loss_noise.sample(&mut rng)
                * trend_factor(days_elapsed, self.config.trend_per_1000_days);
            if raw_incurred < 0.0 {
                log::warn!("{}/{} {}: negative incurred draw clamped to 0", line.name, region, period);
            }
            let incurred = round_cents(raw_incurred.max(0.0));

            // Developed: rounding can pull it a cent under incurred, so re-floor
            let developed = round_cents(development.develop(incurred, &mut rng)).max(incurred);

            rows.push(LossRecord {
                period,
                business_line: line.name.clone(),
                region: region.clone(),
                earned_premium: premium,
                incurred_loss: incurred,
                developed_loss: developed,
            });
        }

        log::debug!(
            "Segment {}/{}: development factor {:.4}, {} rows",
            line.name,
            region,
            development.factor(),
            rows.len()
        );
        Ok(rows)
    }
}

/// Round to whole cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (next, NaiveDate::from_ymd_opt(year, month, 1)) {
        (Some(next), Some(first)) => (next - first).num_days() as u32,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::write_dataset_to_writer;

    fn small_config(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            seed,
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            ..GeneratorConfig::canonical()
        }
    }

    #[test]
    fn test_row_count_and_order() {
        let generator = DatasetGenerator::new(small_config(42)).unwrap();
        let dataset = generator.generate().unwrap();
        assert_eq!(dataset.len(), 12 * 4 * 4);

        let first = &dataset.records()[0];
        assert_eq!(first.period, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(first.business_line, "Commercial Auto");
        assert_eq!(first.region, "Northeast");

        let second = &dataset.records()[1];
        assert_eq!(second.business_line, "Commercial Auto");
        assert_eq!(second.region, "Southeast");

        let last = dataset.records().last().unwrap();
        assert_eq!(last.period, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(last.business_line, "Commercial Property");
        assert_eq!(last.region, "West");
    }

    #[test]
    fn test_invariants_hold_for_every_row() {
        let dataset = DatasetGenerator::new(GeneratorConfig::canonical())
            .unwrap()
            .generate()
            .unwrap();
        for row in dataset.records() {
            assert!(row.earned_premium > 0.0, "non-positive premium in {:?}", row);
            assert!(row.incurred_loss >= 0.0, "negative incurred in {:?}", row);
            assert!(row.developed_loss >= row.incurred_loss, "developed < incurred in {:?}", row);
        }
    }

    #[test]
    fn test_same_seed_is_byte_identical() {
        let render = |seed| {
            let dataset = DatasetGenerator::new(small_config(seed)).unwrap().generate().unwrap();
            let mut buf = Vec::new();
            write_dataset_to_writer(&dataset, &mut buf).unwrap();
            buf
        };
        assert_eq!(render(7), render(7));
        assert_ne!(render(7), render(8));
    }

    #[test]
    fn test_development_factors_match_line_ranges() {
        let generator = DatasetGenerator::new(GeneratorConfig::canonical()).unwrap();
        let factors = generator.development_factors().unwrap();
        assert_eq!(factors.len(), 16);

        for factor in &factors {
            let line = generator
                .config()
                .business_lines
                .iter()
                .find(|l| l.name == factor.business_line)
                .unwrap();
            assert!(factor.factor >= line.development_min && factor.factor <= line.development_max);
        }
    }

    #[test]
    fn test_developed_ratio_exceeds_reported_on_average() {
        let dataset = DatasetGenerator::new(GeneratorConfig::canonical())
            .unwrap()
            .generate()
            .unwrap();
        let premium: f64 = dataset.records().iter().map(|r| r.earned_premium).sum();
        let incurred: f64 = dataset.records().iter().map(|r| r.incurred_loss).sum();
        let developed: f64 = dataset.records().iter().map(|r| r.developed_loss).sum();
        assert!(developed / premium > incurred / premium);
        // Canonical lines average 0.60 before seasonality and trend
        let reported = incurred / premium;
        assert!(reported > 0.5 && reported < 0.75, "reported loss ratio {}", reported);
    }

    #[test]
    fn test_premium_scales_with_month_length() {
        let dataset = DatasetGenerator::new(small_config(1)).unwrap().generate().unwrap();
        for row in dataset.records() {
            let days = days_in_month(row.period) as f64;
            assert!(row.earned_premium >= 5_000.0 * days - 0.01);
            assert!(row.earned_premium <= 15_000.0 * days + 0.01);
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GeneratorConfig::canonical();
        config.regions.clear();
        assert!(DatasetGenerator::new(config).is_err());
    }

    #[test]
    fn test_rejects_negative_noise_sd() {
        let mut config = GeneratorConfig::canonical();
        config.loss_noise_sd = -0.05;
        assert!(DatasetGenerator::new(config).is_err());

        let mut config = GeneratorConfig::canonical();
        config.development_noise_sd = -0.02;
        assert!(DatasetGenerator::new(config).is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()), 29);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()), 28);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()), 31);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()), 30);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.005_1), 10.01);
        assert_eq!(round_cents(3.0), 3.0);
    }
}
