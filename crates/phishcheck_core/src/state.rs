use crate::view_model::{AppViewModel, ResultPanel, VisualState};
use crate::AnalysisRequest;

pub type SubmissionId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    next_submission: SubmissionId,
    panel: ResultPanel,
    last_applied: Option<SubmissionId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            url_input: self.url_input.clone(),
            panel: self.panel.clone(),
            submissions: self.next_submission,
            last_applied: self.last_applied,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_url_input(&mut self, input: String) {
        self.url_input = input;
    }

    /// Captures the current input and shows the pending placeholder.
    pub(crate) fn begin_submission(&mut self) -> (SubmissionId, AnalysisRequest) {
        self.next_submission += 1;
        let request = AnalysisRequest::new(self.url_input.clone());
        self.panel = ResultPanel::Analyzing {
            url: request.submitted_url().to_string(),
        };
        self.dirty = true;
        (self.next_submission, request)
    }

    pub(crate) fn apply_verdict(&mut self, submission_id: SubmissionId, verdict: VisualState) {
        self.panel = ResultPanel::Verdict(verdict);
        self.last_applied = Some(submission_id);
        self.dirty = true;
    }
}
