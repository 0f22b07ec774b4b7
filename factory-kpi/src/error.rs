#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum KpiError {
    #[error("unknown period '{0}', expected monthly, quarterly or yearly")]
    UnknownPeriod(String),
    #[error("range for {field} is empty: {start}..{end}")]
    EmptyRange {
        field: &'static str,
        start: f64,
        end: f64,
    },
    #[error("range for {field} has a non-finite bound or span: {start}..{end}")]
    NonFiniteBound {
        field: &'static str,
        start: f64,
        end: f64,
    },
    #[error("range for {field} must lie within -{limit}..={limit}: {start}..{end}")]
    CountOutOfBounds {
        field: &'static str,
        start: i64,
        end: i64,
        limit: i64,
    },
    #[error("at least one production line must be configured")]
    NoLines,
    #[error("duplicate production line '{0}'")]
    DuplicateLine(String),
}
