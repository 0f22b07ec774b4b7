pub mod filter;
pub mod measurement;
pub mod period;
pub mod summary;

pub use filter::LineFilter;
pub use measurement::{KpiRecord, MeasurementRecord, QualityFlag};
pub use period::{Period, PeriodBucket};
pub use summary::{SummaryMetric, SummaryRecord};
