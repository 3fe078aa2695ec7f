//! Phishcheck client: submits URLs to the analysis backend and decodes its verdicts.
mod analyze;
mod handle;
mod types;

pub use analyze::{Analyzer, ChannelProgressSink, ClientSettings, ProgressSink, ReqwestAnalyzer};
pub use handle::ClientHandle;
pub use types::{AnalysisError, ClientEvent, FailureKind, Stage};
