use std::time::Duration;

use futures_util::StreamExt;
use phishcheck_core::{AnalysisResponse, SubmissionId};
use phishcheck_logging::{phish_debug, url_for_log};

use crate::{AnalysisError, ClientEvent, FailureKind, Stage};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    /// Name of the form field that carries the URL.
    pub form_field: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/predict".to_string(),
            form_field: "name".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<ClientEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(
        &self,
        submission_id: SubmissionId,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<AnalysisResponse, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalyzer {
    settings: ClientSettings,
}

impl ReqwestAnalyzer {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, AnalysisError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| AnalysisError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> AnalysisError {
        AnalysisError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Analyzer for ReqwestAnalyzer {
    async fn analyze(
        &self,
        submission_id: SubmissionId,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| AnalysisError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = self.build_client()?;

        let form = reqwest::multipart::Form::new()
            .text(self.settings.form_field.clone(), url.to_string());

        sink.emit(ClientEvent::Progress {
            submission_id,
            stage: Stage::Sending,
        });
        phish_debug!(
            "POST {} submission_id={} url={}",
            endpoint,
            submission_id,
            url_for_log(url, 80)
        );

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }

        sink.emit(ClientEvent::Progress {
            submission_id,
            stage: Stage::Decoding,
        });

        let decoded = serde_json::from_slice::<AnalysisResponse>(&body);
        match decoded {
            Ok(payload) if status.is_success() => Ok(payload),
            // A rejected submission that explains itself is a payload error, not a transport one.
            Ok(payload) if payload.error.is_some() => {
                phish_debug!(
                    "submission_id={} status={} carried error payload",
                    submission_id,
                    status
                );
                Ok(payload)
            }
            Err(err) if status.is_success() => {
                Err(AnalysisError::new(FailureKind::Decode, err.to_string()))
            }
            _ => Err(AnalysisError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            )),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::new(FailureKind::Timeout, err.to_string());
    }
    AnalysisError::new(FailureKind::Network, err.to_string())
}
