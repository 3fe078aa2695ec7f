use std::fmt;

use serde::Deserialize;

/// The URL exactly as it was in the form field when the user submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    submitted_url: String,
}

impl AnalysisRequest {
    pub fn new(submitted_url: impl Into<String>) -> Self {
        Self {
            submitted_url: submitted_url.into(),
        }
    }

    pub fn submitted_url(&self) -> &str {
        &self.submitted_url
    }
}

/// Decoded body returned by the analysis backend.
///
/// Every field is optional on the wire; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub risk_factors: Option<Vec<String>>,
    #[serde(default)]
    pub confidence: Option<String>,
}

impl AnalysisResponse {
    pub fn prediction(&self) -> Prediction {
        Prediction::normalize(self.prediction.as_deref())
    }

    /// True when the backend sent a prediction outside the known vocabulary.
    /// Such payloads still render as [`Prediction::Safe`].
    pub fn has_unrecognized_prediction(&self) -> bool {
        match self.prediction.as_deref() {
            Some(raw) => Prediction::parse(raw).is_none(),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Phishing,
    Suspicious,
    Safe,
}

impl Prediction {
    /// Permissive mapping used for display: anything that is not exactly
    /// `phishing` or `suspicious` is treated as safe, including a missing value.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some("phishing") => Prediction::Phishing,
            Some("suspicious") => Prediction::Suspicious,
            _ => Prediction::Safe,
        }
    }

    /// Strict mapping over the values the backend is known to send.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "phishing" => Some(Prediction::Phishing),
            "suspicious" => Some(Prediction::Suspicious),
            "legitimate" | "safe" => Some(Prediction::Safe),
            _ => None,
        }
    }
}

/// Why the transport could not produce a payload.
///
/// Kept distinct for diagnostics; the user sees one generic message for all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    InvalidEndpoint,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedPayload,
    PayloadTooLarge,
    Unavailable,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::InvalidEndpoint => write!(f, "invalid endpoint"),
            TransportFailure::Network => write!(f, "network error"),
            TransportFailure::Timeout => write!(f, "timeout"),
            TransportFailure::HttpStatus(code) => write!(f, "http status {code}"),
            TransportFailure::MalformedPayload => write!(f, "malformed payload"),
            TransportFailure::PayloadTooLarge => write!(f, "payload too large"),
            TransportFailure::Unavailable => write!(f, "client unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportOutcome {
    Success(AnalysisResponse),
    Failure(TransportFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_sensitive() {
        assert_eq!(Prediction::normalize(Some("PHISHING")), Prediction::Safe);
        assert_eq!(Prediction::normalize(Some("Suspicious")), Prediction::Safe);
    }

    #[test]
    fn strict_parse_rejects_typos() {
        assert_eq!(Prediction::parse("legitimate"), Some(Prediction::Safe));
        assert_eq!(Prediction::parse("phishnig"), None);
    }

    #[test]
    fn missing_prediction_is_not_flagged_as_unrecognized() {
        let response = AnalysisResponse::default();
        assert_eq!(response.prediction(), Prediction::Safe);
        assert!(!response.has_unrecognized_prediction());

        let typo = AnalysisResponse {
            prediction: Some("phising".to_string()),
            ..AnalysisResponse::default()
        };
        assert_eq!(typo.prediction(), Prediction::Safe);
        assert!(typo.has_unrecognized_prediction());
    }
}
