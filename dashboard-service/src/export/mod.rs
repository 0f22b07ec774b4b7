pub mod summary_csv;

pub use summary_csv::{summary_to_csv, write_summary_csv};
