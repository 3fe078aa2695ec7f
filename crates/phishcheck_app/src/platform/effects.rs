use std::collections::HashMap;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use phishcheck_client::{AnalysisError, ClientEvent, ClientHandle};
use phishcheck_core::{
    AnalysisRequest, AnalysisResponse, Effect, Msg, SubmissionId, TransportFailure,
    TransportOutcome,
};
use phishcheck_logging::{phish_debug, phish_error, phish_info, phish_warn, url_for_log};

/// Carries `SubmitAnalysis` effects to the client worker and turns its
/// completions back into messages for `update`.
pub struct EffectRunner {
    client: ClientHandle,
    in_flight: HashMap<SubmissionId, AnalysisRequest>,
}

impl EffectRunner {
    pub fn new(client: ClientHandle) -> Self {
        Self {
            client,
            in_flight: HashMap::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Starts network effects. Returns messages that are already known, such
    /// as a failure when the worker is gone.
    pub fn enqueue(&mut self, effects: &[Effect]) -> Vec<Msg> {
        let mut immediate = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitAnalysis {
                    submission_id,
                    request,
                } => {
                    phish_info!(
                        "SubmitAnalysis submission_id={} url={}",
                        submission_id,
                        url_for_log(request.submitted_url(), 80)
                    );
                    if self
                        .client
                        .submit(*submission_id, request.submitted_url())
                    {
                        self.in_flight.insert(*submission_id, request.clone());
                    } else {
                        phish_error!("client worker unavailable for submission {}", submission_id);
                        immediate.push(Msg::AnalysisFinished {
                            submission_id: *submission_id,
                            request: request.clone(),
                            outcome: TransportOutcome::Failure(TransportFailure::Unavailable),
                        });
                    }
                }
                Effect::ScrollResultIntoView => {
                    // handled by the DOM renderer
                }
            }
        }
        immediate
    }

    /// Waits up to `timeout` for client events and converts completions.
    pub fn poll(&mut self, timeout: Duration) -> Vec<Msg> {
        let mut msgs = Vec::new();
        match self.client.recv_timeout(timeout) {
            Ok(event) => msgs.extend(self.on_event(event)),
            Err(RecvTimeoutError::Timeout) => return msgs,
            Err(RecvTimeoutError::Disconnected) => {
                phish_error!("client worker disconnected");
                msgs.extend(self.fail_in_flight(TransportFailure::Unavailable));
                return msgs;
            }
        }
        while let Some(event) = self.client.try_recv() {
            msgs.extend(self.on_event(event));
        }
        msgs
    }

    fn on_event(&mut self, event: ClientEvent) -> Option<Msg> {
        match event {
            ClientEvent::Progress {
                submission_id,
                stage,
            } => {
                phish_debug!("submission_id={} stage={:?}", submission_id, stage);
                None
            }
            ClientEvent::AnalysisCompleted {
                submission_id,
                url,
                result,
            } => {
                let request = self
                    .in_flight
                    .remove(&submission_id)
                    .unwrap_or_else(|| AnalysisRequest::new(url));
                Some(Msg::AnalysisFinished {
                    submission_id,
                    request,
                    outcome: outcome_from(submission_id, result),
                })
            }
        }
    }

    /// Resolves everything still in flight with `failure` so no submission
    /// is left without a visible result.
    pub fn fail_in_flight(&mut self, failure: TransportFailure) -> Vec<Msg> {
        if !self.in_flight.is_empty() {
            phish_warn!(
                "{} submission(s) still in flight; reporting {}",
                self.in_flight.len(),
                failure
            );
        }
        let mut drained: Vec<_> = self.in_flight.drain().collect();
        drained.sort_by_key(|(submission_id, _)| *submission_id);
        drained
            .into_iter()
            .map(|(submission_id, request)| Msg::AnalysisFinished {
                submission_id,
                request,
                outcome: TransportOutcome::Failure(failure),
            })
            .collect()
    }
}

pub(crate) fn outcome_from(
    submission_id: SubmissionId,
    result: Result<AnalysisResponse, AnalysisError>,
) -> TransportOutcome {
    match result {
        Ok(payload) => {
            if let Some(error) = &payload.error {
                phish_info!("submission {} rejected by backend: {}", submission_id, error);
            } else if payload.has_unrecognized_prediction() {
                phish_warn!(
                    "submission {} has unrecognized prediction {:?}; showing it as safe",
                    submission_id,
                    payload.prediction
                );
            } else {
                phish_info!(
                    "submission {} prediction={:?} confidence={:?}",
                    submission_id,
                    payload.prediction(),
                    payload.confidence
                );
            }
            TransportOutcome::Success(payload)
        }
        Err(err) => {
            phish_warn!("submission {} failed: {}", submission_id, err);
            TransportOutcome::Failure(err.kind.as_transport_failure())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use phishcheck_client::{Analyzer, FailureKind, ProgressSink};

    use super::*;

    struct FixedAnalyzer;

    #[async_trait::async_trait]
    impl Analyzer for FixedAnalyzer {
        async fn analyze(
            &self,
            _submission_id: SubmissionId,
            url: &str,
            _sink: &dyn ProgressSink,
        ) -> Result<AnalysisResponse, AnalysisError> {
            if url.ends_with(".invalid") {
                return Err(AnalysisError {
                    kind: FailureKind::Timeout,
                    message: "timed out".to_string(),
                });
            }
            Ok(AnalysisResponse {
                prediction: Some("phishing".to_string()),
                ..AnalysisResponse::default()
            })
        }
    }

    fn drain(runner: &mut EffectRunner) -> Vec<Msg> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut msgs = Vec::new();
        while runner.pending() > 0 && Instant::now() < deadline {
            msgs.extend(runner.poll(Duration::from_millis(50)));
        }
        msgs
    }

    #[test]
    fn completions_become_finished_messages() {
        let client = ClientHandle::with_analyzer(Arc::new(FixedAnalyzer)).unwrap();
        let mut runner = EffectRunner::new(client);

        let immediate = runner.enqueue(&[
            Effect::SubmitAnalysis {
                submission_id: 1,
                request: AnalysisRequest::new("https://example.com"),
            },
            Effect::ScrollResultIntoView,
        ]);
        assert!(immediate.is_empty());
        assert_eq!(runner.pending(), 1);

        let msgs = drain(&mut runner);

        assert_eq!(
            msgs,
            vec![Msg::AnalysisFinished {
                submission_id: 1,
                request: AnalysisRequest::new("https://example.com"),
                outcome: TransportOutcome::Success(AnalysisResponse {
                    prediction: Some("phishing".to_string()),
                    ..AnalysisResponse::default()
                }),
            }]
        );
        assert_eq!(runner.pending(), 0);
    }

    #[test]
    fn transport_errors_keep_their_kind() {
        let client = ClientHandle::with_analyzer(Arc::new(FixedAnalyzer)).unwrap();
        let mut runner = EffectRunner::new(client);

        runner.enqueue(&[Effect::SubmitAnalysis {
            submission_id: 4,
            request: AnalysisRequest::new("https://slow.invalid"),
        }]);
        let msgs = drain(&mut runner);

        match msgs.as_slice() {
            [Msg::AnalysisFinished { outcome, .. }] => {
                assert_eq!(*outcome, TransportOutcome::Failure(TransportFailure::Timeout));
            }
            other => panic!("unexpected messages {other:?}"),
        }
    }

    #[test]
    fn unrecognized_prediction_still_succeeds() {
        let outcome = outcome_from(
            9,
            Ok(AnalysisResponse {
                prediction: Some("benign-ish".to_string()),
                ..AnalysisResponse::default()
            }),
        );

        assert!(matches!(outcome, TransportOutcome::Success(_)));
    }
}
