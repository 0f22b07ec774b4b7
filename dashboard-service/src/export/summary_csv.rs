use std::io::Write;

use factory_kpi::domain::{SummaryMetric, SummaryRecord};

use crate::pipeline::PipelineError;

const KEY_COLUMNS: [&str; 6] = [
    "line",
    "period",
    "period_label",
    "period_start",
    "period_end",
    "record_count",
];

/// Writes the summary table with a header row.
///
/// Columns: line, period, period_label, period_start, period_end,
/// record_count, flagged_records, then the mean of every numeric metric.
pub fn write_summary_csv<W: Write>(out: W, summary: &[SummaryRecord]) -> Result<(), PipelineError> {
    let mut wtr = csv::Writer::from_writer(out);
    let err = |e: csv::Error| PipelineError::Export(format!("failed to write summary CSV: {e}"));

    let header = KEY_COLUMNS
        .iter()
        .copied()
        .chain(["flagged_records"])
        .chain(SummaryMetric::ALL.iter().map(|m| m.column()));
    wtr.write_record(header).map_err(err)?;

    for s in summary {
        let mut row = vec![
            s.line.clone(),
            s.period.to_string(),
            s.bucket.label.clone(),
            s.bucket.start.to_string(),
            s.bucket.end.to_string(),
            s.record_count.to_string(),
            s.flagged_records.to_string(),
        ];
        row.extend(SummaryMetric::ALL.iter().map(|m| s.value(*m).to_string()));
        wtr.write_record(&row).map_err(err)?;
    }

    wtr.flush()
        .map_err(|e| PipelineError::Export(format!("failed to flush summary CSV: {e}")))?;
    Ok(())
}

pub fn summary_to_csv(summary: &[SummaryRecord]) -> Result<String, PipelineError> {
    let mut buf = Vec::new();
    write_summary_csv(&mut buf, summary)?;
    String::from_utf8(buf)
        .map_err(|e| PipelineError::Export(format!("summary CSV is not UTF-8: {e}")))
}
