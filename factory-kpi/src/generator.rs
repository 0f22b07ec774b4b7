//! Seeded synthetic measurements for the dashboard.
//!
//! Values are drawn column by column over the whole table (every
//! `total_production` first, then every `defects`, and so on) from an
//! explicitly passed RNG. Rows are line-major: all days of the first line,
//! then all days of the next.

use std::{iter, ops::Range};

use rand::{rngs::StdRng, Rng, SeedableRng};
use time::{macros::date, Date};

use crate::{domain::MeasurementRecord, KpiError};

/// Largest magnitude accepted for count bounds. Counts stay exact as `f64`
/// and differences between two counts cannot overflow `i64`.
pub const MAX_COUNT: i64 = 1 << 53;

/// Half-open sampling ranges for each raw column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeasurementRanges {
    pub total_production: Range<i64>,
    pub defects: Range<i64>,
    pub energy_kwh: Range<i64>,
    pub downtime_hours: Range<f64>,
    pub performance_pct: Range<f64>,
}

impl Default for MeasurementRanges {
    fn default() -> Self {
        Self {
            total_production: 10_000..18_000,
            defects: 150..700,
            energy_kwh: 6_000..11_000,
            downtime_hours: 0.2..6.0,
            performance_pct: 85.0..98.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    pub start_date: Date,
    pub days: u32,
    pub lines: Vec<String>,
    pub seed: u64,
    pub ranges: MeasurementRanges,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_date: date!(2024 - 01 - 01),
            days: 240,
            lines: vec![
                "Line A".to_string(),
                "Line B".to_string(),
                "Line C".to_string(),
            ],
            seed: 10,
            ranges: MeasurementRanges::default(),
        }
    }
}

impl GeneratorConfig {
    /// Rejects configurations that would break the one-row-per-(date, line)
    /// invariant or that cannot be sampled: empty ranges, non-finite real
    /// bounds and count bounds beyond [`MAX_COUNT`].
    pub fn validate(&self) -> Result<(), KpiError> {
        if self.lines.is_empty() {
            return Err(KpiError::NoLines);
        }
        for (i, line) in self.lines.iter().enumerate() {
            if self.lines[..i].contains(line) {
                return Err(KpiError::DuplicateLine(line.clone()));
            }
        }

        let r = &self.ranges;
        check_int("total_production", &r.total_production)?;
        check_int("defects", &r.defects)?;
        check_int("energy_kwh", &r.energy_kwh)?;
        check_float("downtime_hours", &r.downtime_hours)?;
        check_float("performance_pct", &r.performance_pct)?;
        Ok(())
    }

    /// The calendar days covered, in order.
    pub fn dates(&self) -> Vec<Date> {
        iter::successors(Some(self.start_date), |d| d.next_day())
            .take(self.days as usize)
            .collect()
    }
}

fn check_int(field: &'static str, r: &Range<i64>) -> Result<(), KpiError> {
    if r.start.unsigned_abs() > MAX_COUNT as u64 || r.end.unsigned_abs() > MAX_COUNT as u64 {
        return Err(KpiError::CountOutOfBounds {
            field,
            start: r.start,
            end: r.end,
            limit: MAX_COUNT,
        });
    }
    if r.start >= r.end {
        return Err(KpiError::EmptyRange {
            field,
            start: r.start as f64,
            end: r.end as f64,
        });
    }
    Ok(())
}

fn check_float(field: &'static str, r: &Range<f64>) -> Result<(), KpiError> {
    // A finite span also rules out NaN and infinite bounds.
    if !(r.end - r.start).is_finite() {
        return Err(KpiError::NonFiniteBound {
            field,
            start: r.start,
            end: r.end,
        });
    }
    if r.start >= r.end {
        return Err(KpiError::EmptyRange {
            field,
            start: r.start,
            end: r.end,
        });
    }
    Ok(())
}

fn sample_int<R: Rng>(rng: &mut R, r: &Range<i64>) -> i64 {
    if r.start < r.end {
        rng.gen_range(r.clone())
    } else {
        r.start
    }
}

fn sample_float<R: Rng>(rng: &mut R, r: &Range<f64>) -> f64 {
    if (r.end - r.start).is_finite() && r.start < r.end {
        rng.gen_range(r.clone())
    } else {
        r.start
    }
}

/// Generates the table with an RNG seeded from `config.seed`.
pub fn generate(config: &GeneratorConfig) -> Vec<MeasurementRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    generate_with_rng(config, &mut rng)
}

/// Generates the table drawing from a caller-supplied RNG.
pub fn generate_with_rng<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Vec<MeasurementRecord> {
    let dates = config.dates();
    let rows = dates.len() * config.lines.len();
    let r = &config.ranges;

    let total_production: Vec<i64> = (0..rows)
        .map(|_| sample_int(rng, &r.total_production))
        .collect();
    let defects: Vec<i64> = (0..rows).map(|_| sample_int(rng, &r.defects)).collect();
    let energy_kwh: Vec<i64> = (0..rows).map(|_| sample_int(rng, &r.energy_kwh)).collect();
    let downtime_hours: Vec<f64> = (0..rows)
        .map(|_| sample_float(rng, &r.downtime_hours))
        .collect();
    let performance_pct: Vec<f64> = (0..rows)
        .map(|_| sample_float(rng, &r.performance_pct))
        .collect();

    let records: Vec<MeasurementRecord> = config
        .lines
        .iter()
        .flat_map(|line| dates.iter().map(move |d| (line, *d)))
        .enumerate()
        .map(|(i, (line, date))| MeasurementRecord {
            date,
            line: line.clone(),
            total_production: total_production[i],
            defects: defects[i],
            energy_kwh: energy_kwh[i],
            downtime_hours: downtime_hours[i],
            performance_pct: performance_pct[i],
        })
        .collect();

    tracing::debug!(
        rows = records.len(),
        days = dates.len(),
        lines = config.lines.len(),
        "generated measurement table"
    );

    records
}
