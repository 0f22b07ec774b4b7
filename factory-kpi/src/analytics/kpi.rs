use crate::domain::{KpiRecord, MeasurementRecord, QualityFlag};

const HOURS_PER_DAY: f64 = 24.0;

/// Derives the KPI columns for one measurement.
///
/// Zero production has no defined quality ratio; it is reported as 0 %
/// quality (and therefore 0 % OEE) with [`QualityFlag::ZeroProduction`].
/// Good units saturate at the `i64` limits for counts outside the range
/// `GeneratorConfig::validate` accepts.
pub fn annotate_one(m: MeasurementRecord) -> KpiRecord {
    let good_units = m.total_production.saturating_sub(m.defects);

    let (quality_pct, quality_flag) = if m.total_production == 0 {
        (0.0, Some(QualityFlag::ZeroProduction))
    } else {
        (good_units as f64 / m.total_production as f64 * 100.0, None)
    };

    let availability_pct = 100.0 - (m.downtime_hours / HOURS_PER_DAY * 100.0);
    let oee_pct = quality_pct * availability_pct * m.performance_pct / 10_000.0;

    KpiRecord {
        measurement: m,
        good_units,
        quality_pct,
        availability_pct,
        oee_pct,
        quality_flag,
    }
}

pub fn annotate<I>(records: I) -> Vec<KpiRecord>
where
    I: IntoIterator<Item = MeasurementRecord>,
{
    records.into_iter().map(annotate_one).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, GeneratorConfig};
    use time::macros::date;

    fn measurement(
        total_production: i64,
        defects: i64,
        downtime_hours: f64,
        performance_pct: f64,
    ) -> MeasurementRecord {
        MeasurementRecord {
            date: date!(2024 - 01 - 01),
            line: "Line A".to_string(),
            total_production,
            defects,
            energy_kwh: 8_000,
            downtime_hours,
            performance_pct,
        }
    }

    #[test]
    fn derives_all_kpis() {
        let k = annotate_one(measurement(10_000, 500, 6.0, 90.0));
        assert_eq!(k.good_units, 9_500);
        assert!((k.quality_pct - 95.0).abs() < 1e-9);
        assert!((k.availability_pct - 75.0).abs() < 1e-9);
        assert!((k.performance_pct() - 90.0).abs() < 1e-9);
        assert!((k.oee_pct - 95.0 * 75.0 * 90.0 / 10_000.0).abs() < 1e-9);
        assert_eq!(k.quality_flag, None);
    }

    #[test]
    fn zero_production_is_flagged_not_nan() {
        let k = annotate_one(measurement(0, 0, 1.0, 90.0));
        assert_eq!(k.quality_pct, 0.0);
        assert_eq!(k.oee_pct, 0.0);
        assert_eq!(k.quality_flag, Some(QualityFlag::ZeroProduction));
        assert!(k.is_flagged());
    }

    #[test]
    fn defects_above_production_follow_the_formula() {
        let k = annotate_one(measurement(100, 150, 0.0, 90.0));
        assert_eq!(k.good_units, -50);
        assert!((k.quality_pct - -50.0).abs() < 1e-9);
        assert!((k.availability_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn extreme_counts_saturate_instead_of_overflowing() {
        let k = annotate_one(measurement(i64::MAX, -1, 0.0, 90.0));
        assert_eq!(k.good_units, i64::MAX);

        let k = annotate_one(measurement(i64::MIN, 1, 0.0, 90.0));
        assert_eq!(k.good_units, i64::MIN);
    }

    #[test]
    fn generated_table_satisfies_formulas() {
        let records = annotate(generate(&GeneratorConfig::default()));
        assert_eq!(records.len(), 720);
        for k in &records {
            let m = &k.measurement;
            assert_eq!(k.good_units, m.total_production - m.defects);
            let quality = k.good_units as f64 / m.total_production as f64 * 100.0;
            assert!((k.quality_pct - quality).abs() < 1e-9);
            assert!((k.availability_pct - (100.0 - m.downtime_hours / 24.0 * 100.0)).abs() < 1e-9);
            let oee = k.quality_pct * k.availability_pct * k.performance_pct() / 10_000.0;
            assert!((k.oee_pct - oee).abs() < 1e-9);
        }
    }
}
