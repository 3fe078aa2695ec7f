use std::fmt;

use phishcheck_core::{AnalysisResponse, SubmissionId, TransportFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Queued,
    Sending,
    Decoding,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Progress {
        submission_id: SubmissionId,
        stage: Stage,
    },
    AnalysisCompleted {
        submission_id: SubmissionId,
        url: String,
        result: Result<AnalysisResponse, AnalysisError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AnalysisError {
    pub kind: FailureKind,
    pub message: String,
}

impl AnalysisError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
}

impl FailureKind {
    /// Collapses the transport detail into the core's diagnostic kinds.
    pub fn as_transport_failure(&self) -> TransportFailure {
        match self {
            FailureKind::InvalidEndpoint => TransportFailure::InvalidEndpoint,
            FailureKind::Network => TransportFailure::Network,
            FailureKind::Timeout => TransportFailure::Timeout,
            FailureKind::HttpStatus(code) => TransportFailure::HttpStatus(*code),
            FailureKind::TooLarge { .. } => TransportFailure::PayloadTooLarge,
            FailureKind::Decode => TransportFailure::MalformedPayload,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "undecodable payload"),
        }
    }
}
