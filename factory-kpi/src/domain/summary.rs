use time::Date;

use crate::domain::period::{Period, PeriodBucket};

/// Mean of every numeric KPI field for one line over one period bucket.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryRecord {
    pub line: String,
    pub period: Period,
    pub bucket: PeriodBucket,
    pub record_count: usize,
    pub flagged_records: usize,
    pub total_production: f64,
    pub defects: f64,
    pub energy_kwh: f64,
    pub downtime_hours: f64,
    pub good_units: f64,
    pub quality_pct: f64,
    pub availability_pct: f64,
    pub performance_pct: f64,
    pub oee_pct: f64,
}

impl SummaryRecord {
    pub fn period_start(&self) -> Date {
        self.bucket.start
    }

    pub fn value(&self, metric: SummaryMetric) -> f64 {
        match metric {
            SummaryMetric::TotalProduction => self.total_production,
            SummaryMetric::Defects => self.defects,
            SummaryMetric::EnergyKwh => self.energy_kwh,
            SummaryMetric::DowntimeHours => self.downtime_hours,
            SummaryMetric::GoodUnits => self.good_units,
            SummaryMetric::QualityPct => self.quality_pct,
            SummaryMetric::AvailabilityPct => self.availability_pct,
            SummaryMetric::PerformancePct => self.performance_pct,
            SummaryMetric::OeePct => self.oee_pct,
        }
    }
}

/// Numeric columns of a [`SummaryRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SummaryMetric {
    TotalProduction,
    Defects,
    EnergyKwh,
    DowntimeHours,
    GoodUnits,
    QualityPct,
    AvailabilityPct,
    PerformancePct,
    OeePct,
}

impl SummaryMetric {
    pub const ALL: [SummaryMetric; 9] = [
        SummaryMetric::TotalProduction,
        SummaryMetric::Defects,
        SummaryMetric::EnergyKwh,
        SummaryMetric::DowntimeHours,
        SummaryMetric::GoodUnits,
        SummaryMetric::QualityPct,
        SummaryMetric::AvailabilityPct,
        SummaryMetric::PerformancePct,
        SummaryMetric::OeePct,
    ];

    /// Column name used in tabular exports.
    pub fn column(self) -> &'static str {
        match self {
            SummaryMetric::TotalProduction => "total_production",
            SummaryMetric::Defects => "defects",
            SummaryMetric::EnergyKwh => "energy_kwh",
            SummaryMetric::DowntimeHours => "downtime_hours",
            SummaryMetric::GoodUnits => "good_units",
            SummaryMetric::QualityPct => "quality_pct",
            SummaryMetric::AvailabilityPct => "availability_pct",
            SummaryMetric::PerformancePct => "performance_pct",
            SummaryMetric::OeePct => "oee_pct",
        }
    }
}
