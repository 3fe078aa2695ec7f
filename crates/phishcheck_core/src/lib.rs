//! Phishcheck core: verdict classification, pure state machine and view-model helpers.
mod effect;
mod msg;
mod response;
mod state;
mod update;
mod verdict;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use response::{
    AnalysisRequest, AnalysisResponse, Prediction, TransportFailure, TransportOutcome,
};
pub use state::{AppState, SubmissionId};
pub use update::update;
pub use verdict::{render_verdict, score_line, TRANSPORT_FAILURE_MESSAGE};
pub use view_model::{AppViewModel, Palette, ResultPanel, RiskFactorList, Variant, VisualState};
