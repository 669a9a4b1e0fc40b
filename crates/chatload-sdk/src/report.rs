use chatload_report::{ReportConfig, RequestLevelReport, Tokenizer, VisitLevelReport, WhitespaceTokenizer};
use chatload_types::VisitResponse;

/// Request-level and visit-level summaries for one completed run.
pub struct RunReport {
    pub request_level: RequestLevelReport,
    pub visit_level: VisitLevelReport,
}

/// Folds a run's [`VisitResponse`]s into request-level and visit-level
/// reports, tokenizing response text with [`WhitespaceTokenizer`].
///
/// Panics if `responses` is empty or contains no successful request — see
/// [`RequestLevelReport::generate`].
pub fn generate_report(responses: &[VisitResponse]) -> RunReport {
    generate_report_with(responses, &WhitespaceTokenizer, ReportConfig::default())
}

/// Like [`generate_report`] but with an explicit tokenizer and report config.
pub fn generate_report_with(
    responses: &[VisitResponse],
    tokenizer: &dyn Tokenizer,
    config: ReportConfig,
) -> RunReport {
    let flat: Vec<_> = responses.iter().flat_map(|v| v.responses.iter().cloned()).collect();
    RunReport {
        request_level: RequestLevelReport::generate(&flat, tokenizer, config),
        visit_level: VisitLevelReport::generate(responses),
    }
}
