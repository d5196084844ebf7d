mod diagnostics;
mod errors;
mod logline;
mod report;

pub use diagnostics::{match_diagnostic, Diagnostic};
pub use errors::ReportError;
pub use logline::{parse_log_line, LogLine};
pub use report::{Report, TestCase, TestSuite, REPORT_TITLE};
