//! Chart- and card-ready view of one dashboard selection.

use indexmap::IndexMap;
use time::Date;

use crate::{
    analytics::line_summary::{aggregate, select},
    domain::{KpiRecord, LineFilter, Period, SummaryMetric, SummaryRecord},
};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KpiCard {
    pub title: &'static str,
    pub value: f64,
    pub display: String,
}

/// Headline means over the filtered daily records.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KpiCards {
    pub total_production: KpiCard,
    pub quality_pct: KpiCard,
    pub oee_pct: KpiCard,
    pub downtime_hours: KpiCard,
    pub energy_kwh: KpiCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChartKind {
    Line,
    GroupedBar,
    Area,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeriesPoint {
    pub period_start: Date,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineSeries {
    pub line: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub metric: SummaryMetric,
    pub series: Vec<LineSeries>,
}

/// Downtime against production for one day; energy drives marker size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScatterPoint {
    pub line: String,
    pub date: Date,
    pub downtime_hours: f64,
    pub total_production: i64,
    pub energy_kwh: i64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DashboardView {
    pub period: Period,
    pub line_filter: LineFilter,
    pub record_count: usize,
    pub flagged_records: usize,
    pub cards: Option<KpiCards>,
    pub charts: Vec<ChartSpec>,
    pub scatter: Vec<ScatterPoint>,
    pub summary: Vec<SummaryRecord>,
}

const CHARTS: [(&str, &str, ChartKind, SummaryMetric); 4] = [
    (
        "production_trend",
        "Production Trend by Line",
        ChartKind::Line,
        SummaryMetric::TotalProduction,
    ),
    ("oee_trend", "OEE Trend", ChartKind::Line, SummaryMetric::OeePct),
    (
        "energy_by_period",
        "Energy Consumption by Line",
        ChartKind::GroupedBar,
        SummaryMetric::EnergyKwh,
    ),
    ("defect_trend", "Defect Trend", ChartKind::Area, SummaryMetric::Defects),
];

/// Formats the integer part of `value` with comma thousands separators.
pub fn format_thousands(value: f64) -> String {
    let n = value.trunc() as i64;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn mean(records: &[KpiRecord], f: impl Fn(&KpiRecord) -> f64) -> f64 {
    records.iter().map(f).sum::<f64>() / records.len() as f64
}

fn two_decimals(title: &'static str, value: f64) -> KpiCard {
    KpiCard {
        title,
        value,
        display: format!("{value:.2}"),
    }
}

/// Returns `None` for an empty selection, which has no meaningful mean.
pub fn kpi_cards(records: &[KpiRecord]) -> Option<KpiCards> {
    if records.is_empty() {
        return None;
    }

    let production = mean(records, |r| r.measurement.total_production as f64);
    let energy = mean(records, |r| r.measurement.energy_kwh as f64);

    Some(KpiCards {
        total_production: KpiCard {
            title: "Average Production",
            value: production,
            display: format_thousands(production),
        },
        quality_pct: two_decimals("Quality %", mean(records, |r| r.quality_pct)),
        oee_pct: two_decimals(
            "Overall Equipment Effectiveness (OEE)",
            mean(records, |r| r.oee_pct),
        ),
        downtime_hours: two_decimals(
            "Daily Downtime (h)",
            mean(records, |r| r.measurement.downtime_hours),
        ),
        energy_kwh: KpiCard {
            title: "Energy Consumption",
            value: energy,
            display: format!("{} kWh", format_thousands(energy)),
        },
    })
}

/// One series per line, in summary order.
pub fn chart_series(summary: &[SummaryRecord], metric: SummaryMetric) -> Vec<LineSeries> {
    let mut by_line: IndexMap<&str, Vec<SeriesPoint>> = IndexMap::new();
    for s in summary {
        by_line.entry(s.line.as_str()).or_default().push(SeriesPoint {
            period_start: s.period_start(),
            label: s.bucket.label.clone(),
            value: s.value(metric),
        });
    }
    by_line
        .into_iter()
        .map(|(line, points)| LineSeries {
            line: line.to_string(),
            points,
        })
        .collect()
}

pub fn chart_specs(summary: &[SummaryRecord]) -> Vec<ChartSpec> {
    CHARTS
        .iter()
        .map(|&(id, title, kind, metric)| ChartSpec {
            id,
            title,
            kind,
            metric,
            series: chart_series(summary, metric),
        })
        .collect()
}

pub fn scatter_points(records: &[KpiRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|r| ScatterPoint {
            line: r.line().to_string(),
            date: r.date(),
            downtime_hours: r.measurement.downtime_hours,
            total_production: r.measurement.total_production,
            energy_kwh: r.measurement.energy_kwh,
        })
        .collect()
}

/// Filters, resamples and shapes `records` for one dashboard render.
pub fn build_view(records: &[KpiRecord], filter: &LineFilter, period: Period) -> DashboardView {
    let filtered = select(records, filter);
    let summary = aggregate(&filtered, period);

    DashboardView {
        period,
        line_filter: filter.clone(),
        record_count: filtered.len(),
        flagged_records: filtered.iter().filter(|r| r.is_flagged()).count(),
        cards: kpi_cards(&filtered),
        charts: chart_specs(&summary),
        scatter: scatter_points(&filtered),
        summary,
    }
}
