use crate::{
    AnalysisRequest, AnalysisResponse, Palette, Prediction, RiskFactorList, TransportOutcome,
    Variant, VisualState,
};

pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to analyze URL. Please try again.";

const DANGER: &str = "#dc3545";
const WARNING: &str = "#ffc107";
const SUCCESS: &str = "#28a745";
const WHITE: &str = "#fff";
const BLACK: &str = "#000";

impl Variant {
    pub fn palette(self) -> Palette {
        match self {
            Variant::Error => Palette {
                background: DANGER,
                text: WHITE,
                url_backdrop: None,
            },
            Variant::Phishing => Palette {
                background: DANGER,
                text: WHITE,
                url_backdrop: Some("rgba(0,0,0,0.2)"),
            },
            Variant::Suspicious => Palette {
                background: WARNING,
                text: BLACK,
                url_backdrop: Some("rgba(0,0,0,0.1)"),
            },
            Variant::Safe => Palette {
                background: SUCCESS,
                text: WHITE,
                url_backdrop: Some("rgba(0,0,0,0.2)"),
            },
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Variant::Error => "Error",
            Variant::Phishing => "⚠️ PHISHING DETECTED!",
            Variant::Suspicious => "⚠️ SUSPICIOUS URL",
            Variant::Safe => "✓ RELATIVELY SAFE",
        }
    }
}

/// Pure mapping from a finished submission to the state that paints it.
///
/// Precedence: transport failure, then a payload `error` (even an empty one),
/// then the normalized prediction.
pub fn render_verdict(request: &AnalysisRequest, outcome: &TransportOutcome) -> VisualState {
    let payload = match outcome {
        TransportOutcome::Failure(_) => {
            return error_state(request, TRANSPORT_FAILURE_MESSAGE.to_string());
        }
        TransportOutcome::Success(payload) => payload,
    };

    if let Some(error) = &payload.error {
        return error_state(request, error.clone());
    }

    let (variant, title) = match payload.prediction() {
        Prediction::Phishing => (Variant::Phishing, "Risk Factors Detected:"),
        Prediction::Suspicious => (Variant::Suspicious, "Risk Factors Detected:"),
        Prediction::Safe => (Variant::Safe, "Notes:"),
    };
    let items = payload.risk_factors.clone().unwrap_or_default();
    let risk_factors = if variant == Variant::Safe && items.is_empty() {
        None
    } else {
        Some(RiskFactorList { title, items })
    };

    VisualState {
        variant,
        palette: variant.palette(),
        heading: variant.heading(),
        url_label: "Tested URL:",
        url_echoed: request.submitted_url().to_string(),
        body_message: payload.message.clone(),
        score_line: Some(score_line(payload)),
        risk_factors,
    }
}

fn error_state(request: &AnalysisRequest, message: String) -> VisualState {
    VisualState {
        variant: Variant::Error,
        palette: Variant::Error.palette(),
        heading: Variant::Error.heading(),
        url_label: "URL:",
        url_echoed: request.submitted_url().to_string(),
        body_message: Some(message),
        score_line: None,
        risk_factors: None,
    }
}

/// `risk_score/max_score`, with `?` standing in for a missing side.
pub fn score_line(payload: &AnalysisResponse) -> String {
    format!(
        "{}/{}",
        format_score(payload.risk_score),
        format_score(payload.max_score)
    )
}

// f64's Display already prints 7.0 as "7" and 7.5 as "7.5".
fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => value.to_string(),
        None => "?".to_string(),
    }
}
