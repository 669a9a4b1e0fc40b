//! Pure folds over run output: turns `&[ReqResponse]` / `&[VisitResponse]`
//! into the summary statistics a benchmark report surfaces.

mod request_report;
mod summary;
mod throughput;
mod tokenizer;
mod visit_report;

pub use request_report::{RequestLevelReport, ReportConfig};
pub use summary::{trimmed_mean, Distribution};
pub use throughput::{
    peak_throughput, sliding_window_throughput, stable_average_throughput, DEFAULT_STEP_SECONDS,
    DEFAULT_TRIM_PERCENT, DEFAULT_WINDOW_SECONDS,
};
pub use tokenizer::{Tokenizer, WhitespaceTokenizer};
pub use visit_report::VisitLevelReport;
