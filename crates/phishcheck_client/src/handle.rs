use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use phishcheck_core::SubmissionId;
use phishcheck_logging::{phish_debug, phish_info};

use crate::analyze::{Analyzer, ChannelProgressSink, ClientSettings, ReqwestAnalyzer};
use crate::{ClientEvent, Stage};

enum ClientCommand {
    Submit {
        submission_id: SubmissionId,
        url: String,
    },
}

/// Owns the worker thread that runs submissions on a tokio runtime.
///
/// Submissions run concurrently; completion events arrive in whatever order
/// the backend answers.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> io::Result<Self> {
        Self::with_analyzer(Arc::new(ReqwestAnalyzer::new(settings)))
    }

    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("phishcheck-client".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let analyzer = analyzer.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(analyzer.as_ref(), command, event_tx).await;
                    });
                }
                phish_debug!("client command channel closed; worker exiting");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queues a submission. Returns `false` when the worker is gone.
    pub fn submit(&self, submission_id: SubmissionId, url: impl Into<String>) -> bool {
        let url = url.into();
        phish_info!("Submit submission_id={} url_len={}", submission_id, url.len());
        self.cmd_tx
            .send(ClientCommand::Submit { submission_id, url })
            .is_ok()
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Waits for the next event. `Disconnected` means the worker is gone and
    /// nothing still in flight will complete.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<ClientEvent, mpsc::RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }
}

async fn handle_command(
    analyzer: &dyn Analyzer,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Submit { submission_id, url } => {
            let _ = event_tx.send(ClientEvent::Progress {
                submission_id,
                stage: Stage::Queued,
            });
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = analyzer.analyze(submission_id, &url, &sink).await;
            let _ = event_tx.send(ClientEvent::Progress {
                submission_id,
                stage: Stage::Done,
            });
            let _ = event_tx.send(ClientEvent::AnalysisCompleted {
                submission_id,
                url,
                result,
            });
        }
    }
}
