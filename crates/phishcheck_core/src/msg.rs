#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlInputChanged(String),
    /// User submitted the analysis form.
    Submitted,
    /// Transport finished for a submission, successfully or not.
    AnalysisFinished {
        submission_id: crate::SubmissionId,
        request: crate::AnalysisRequest,
        outcome: crate::TransportOutcome,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
