use std::sync::{Arc, Mutex};
use std::time::Duration;

use phishcheck_client::{
    Analyzer, ClientEvent, ClientSettings, FailureKind, ProgressSink, ReqwestAnalyzer, Stage,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<ClientEvent>>>,
}

impl TestSink {
    fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn stages(&self) -> Vec<Stage> {
        self.events
            .lock()
            .unwrap()
            .drain(..)
            .filter_map(|event| match event {
                ClientEvent::Progress { stage, .. } => Some(stage),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: ClientEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn analyzer_for(server: &MockServer) -> ReqwestAnalyzer {
    ReqwestAnalyzer::new(ClientSettings {
        endpoint: format!("{}/predict", server.uri()),
        ..ClientSettings::default()
    })
}

#[tokio::test]
async fn posts_url_as_form_field_and_decodes_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_string_contains("name=\"name\""))
        .and(body_string_contains("http://login-paypal.example.tk"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"prediction":"phishing","risk_score":12,"max_score":35,
                "message":"Do not click","confidence":"High Risk",
                "risk_factors":["Suspicious top-level domain","Not using HTTPS"]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let sink = TestSink::new();
    let payload = analyzer_for(&server)
        .analyze(1, "http://login-paypal.example.tk", &sink)
        .await
        .expect("analysis ok");

    assert_eq!(payload.prediction.as_deref(), Some("phishing"));
    assert_eq!(payload.risk_score, Some(12.0));
    assert_eq!(payload.confidence.as_deref(), Some("High Risk"));
    assert_eq!(
        payload.risk_factors,
        Some(vec![
            "Suspicious top-level domain".to_string(),
            "Not using HTTPS".to_string(),
        ])
    );
    assert_eq!(sink.stages(), vec![Stage::Sending, Stage::Decoding]);
}

#[tokio::test]
async fn rejected_submission_with_error_body_is_a_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            r#"{"error":"URL must start with http:// or https://"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let payload = analyzer_for(&server)
        .analyze(2, "ftp://example.com", &TestSink::new())
        .await
        .expect("error payload is still a payload");

    assert_eq!(
        payload.error.as_deref(),
        Some("URL must start with http:// or https://")
    );
}

#[tokio::test]
async fn server_error_without_explanation_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = analyzer_for(&server)
        .analyze(3, "https://example.com", &TestSink::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn non_success_json_without_error_field_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(502).set_body_raw(r#"{"prediction":"safe"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = analyzer_for(&server)
        .analyze(4, "https://example.com", &TestSink::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(502));
}

#[tokio::test]
async fn malformed_json_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let err = analyzer_for(&server)
        .analyze(5, "https://example.com", &TestSink::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(r#"{"prediction":"safe"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let analyzer = ReqwestAnalyzer::new(ClientSettings {
        endpoint: format!("{}/predict", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    });

    let err = analyzer
        .analyze(6, "https://example.com", &TestSink::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_payload_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"prediction":"safe","message":"padding"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let analyzer = ReqwestAnalyzer::new(ClientSettings {
        endpoint: format!("{}/predict", server.uri()),
        max_bytes: 10,
        ..ClientSettings::default()
    });

    let err = analyzer
        .analyze(7, "https://example.com", &TestSink::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 10, .. }
    ));
}

#[tokio::test]
async fn invalid_endpoint_is_reported_before_sending() {
    let analyzer = ReqwestAnalyzer::new(ClientSettings {
        endpoint: "not an endpoint".to_string(),
        ..ClientSettings::default()
    });
    let sink = TestSink::new();

    let err = analyzer
        .analyze(8, "https://example.com", &sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
    assert!(sink.stages().is_empty());
}
