use time::Date;

/// One day of readings for one production line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementRecord {
    pub date: Date,
    pub line: String,
    pub total_production: i64,
    pub defects: i64,
    pub energy_kwh: i64,
    pub downtime_hours: f64,
    /// Sampled stand-in for line performance. Not derived from run times.
    pub performance_pct: f64,
}

/// Why a KPI value was replaced by a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QualityFlag {
    /// `total_production` was zero; quality and OEE were reported as 0 %.
    ZeroProduction,
}

/// A measurement together with its derived KPIs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KpiRecord {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub measurement: MeasurementRecord,
    pub good_units: i64,
    pub quality_pct: f64,
    pub availability_pct: f64,
    pub oee_pct: f64,
    pub quality_flag: Option<QualityFlag>,
}

impl KpiRecord {
    pub fn line(&self) -> &str {
        &self.measurement.line
    }

    pub fn date(&self) -> Date {
        self.measurement.date
    }

    pub fn performance_pct(&self) -> f64 {
        self.measurement.performance_pct
    }

    pub fn is_flagged(&self) -> bool {
        self.quality_flag.is_some()
    }
}
