use factory_kpi::{
    analytics::annotate,
    domain::{KpiRecord, MeasurementRecord, QualityFlag},
};

/// KPI annotation stage of the render pipeline.
///
/// Records whose quality fell back because production was zero are counted
/// and logged, so a real feed with idle days shows up in monitoring.
pub fn annotate_records(measurements: Vec<MeasurementRecord>) -> Vec<KpiRecord> {
    let records = annotate(measurements);

    let zero_production = records
        .iter()
        .filter(|r| r.quality_flag == Some(QualityFlag::ZeroProduction))
        .count();
    if zero_production > 0 {
        metrics::counter!("kpi_zero_production_records_total").increment(zero_production as u64);
        tracing::warn!(
            records = zero_production,
            "zero production reported; quality and OEE set to 0%"
        );
    }

    records
}
