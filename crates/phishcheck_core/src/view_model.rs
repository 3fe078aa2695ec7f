use crate::SubmissionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Error,
    Phishing,
    Suspicious,
    Safe,
}

/// CSS color values applied to the result container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    /// Backdrop behind the echoed URL; `None` draws it without a box.
    pub url_backdrop: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskFactorList {
    pub title: &'static str,
    pub items: Vec<String>,
}

/// Everything needed to paint one verdict; built fresh per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualState {
    pub variant: Variant,
    pub palette: Palette,
    pub heading: &'static str,
    pub url_label: &'static str,
    pub url_echoed: String,
    pub body_message: Option<String>,
    pub score_line: Option<String>,
    pub risk_factors: Option<RiskFactorList>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    Hidden,
    Analyzing {
        url: String,
    },
    Verdict(VisualState),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub panel: ResultPanel,
    pub submissions: u64,
    pub last_applied: Option<SubmissionId>,
    pub dirty: bool,
}
