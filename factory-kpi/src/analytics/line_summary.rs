use std::collections::BTreeMap;

use indexmap::IndexMap;
use time::Date;

use crate::domain::{KpiRecord, LineFilter, Period, PeriodBucket, SummaryRecord};

/// Keeps the records matching `filter`. An unknown line yields an empty set.
pub fn select(records: &[KpiRecord], filter: &LineFilter) -> Vec<KpiRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r.line()))
        .cloned()
        .collect()
}

#[derive(Default)]
struct Sums {
    count: usize,
    flagged: usize,
    total_production: f64,
    defects: f64,
    energy_kwh: f64,
    downtime_hours: f64,
    good_units: f64,
    quality_pct: f64,
    availability_pct: f64,
    performance_pct: f64,
    oee_pct: f64,
}

impl Sums {
    fn add(&mut self, r: &KpiRecord) {
        let m = &r.measurement;
        self.count += 1;
        if r.is_flagged() {
            self.flagged += 1;
        }
        self.total_production += m.total_production as f64;
        self.defects += m.defects as f64;
        self.energy_kwh += m.energy_kwh as f64;
        self.downtime_hours += m.downtime_hours;
        self.good_units += r.good_units as f64;
        self.quality_pct += r.quality_pct;
        self.availability_pct += r.availability_pct;
        self.performance_pct += m.performance_pct;
        self.oee_pct += r.oee_pct;
    }

    fn into_summary(self, line: &str, period: Period, bucket: PeriodBucket) -> SummaryRecord {
        // Buckets only exist once a record was added.
        let n = self.count as f64;
        SummaryRecord {
            line: line.to_string(),
            period,
            bucket,
            record_count: self.count,
            flagged_records: self.flagged,
            total_production: self.total_production / n,
            defects: self.defects / n,
            energy_kwh: self.energy_kwh / n,
            downtime_hours: self.downtime_hours / n,
            good_units: self.good_units / n,
            quality_pct: self.quality_pct / n,
            availability_pct: self.availability_pct / n,
            performance_pct: self.performance_pct / n,
            oee_pct: self.oee_pct / n,
        }
    }
}

/// Resamples `records` into per-line period means.
///
/// Output is ordered by line (in order of first appearance) and then by
/// bucket start. Buckets without records are omitted.
pub fn aggregate(records: &[KpiRecord], period: Period) -> Vec<SummaryRecord> {
    let mut groups: IndexMap<&str, BTreeMap<Date, (PeriodBucket, Sums)>> = IndexMap::new();

    for r in records {
        let bucket = period.bucket(r.date());
        groups
            .entry(r.line())
            .or_default()
            .entry(bucket.start)
            .or_insert_with(|| (bucket, Sums::default()))
            .1
            .add(r);
    }

    let summary: Vec<SummaryRecord> = groups
        .into_iter()
        .flat_map(|(line, buckets)| {
            buckets
                .into_values()
                .map(move |(bucket, sums)| sums.into_summary(line, period, bucket))
        })
        .collect();

    tracing::debug!(
        input_records = records.len(),
        summary_records = summary.len(),
        period = %period,
        "aggregated line summary"
    );

    summary
}
