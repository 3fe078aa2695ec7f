#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitAnalysis {
        submission_id: crate::SubmissionId,
        request: crate::AnalysisRequest,
    },
    ScrollResultIntoView,
}
