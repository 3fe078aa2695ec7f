use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::LevelFilter;
use phishcheck_client::ClientHandle;
use phishcheck_core::{update, AppState, Msg, ResultPanel, TransportFailure, VisualState};
use phishcheck_logging::{phish_info, phish_warn};

use super::cli::Cli;
use super::config::{resolve_config, Overrides};
use super::effects::EffectRunner;
use super::export::write_atomically;
use super::logging;
use super::ui::dom::Document;
use super::ui::render::{render, render_effects};
use super::ui::terminal::summarize;

const PAGE_TITLE: &str = "Phishing URL Check";
const POLL_INTERVAL: Duration = Duration::from_millis(100);
// Slack on top of the client's own timeouts before a submission is given up.
const WAIT_SLACK: Duration = Duration::from_secs(5);

pub fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(destination) = cli.log.destination() {
        let level = if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        logging::initialize(destination, level);
    }

    let working_dir = std::env::current_dir().context("resolving working directory")?;
    let config = resolve_config(cli.config.as_deref(), &working_dir)?;
    let settings = config.client_settings(&Overrides {
        endpoint: cli.endpoint.clone(),
        request_timeout_secs: cli.timeout_secs,
    });
    phish_info!(
        "endpoint={} form_field={} request_timeout={:?}",
        settings.endpoint,
        settings.form_field,
        settings.request_timeout
    );

    let wait_limit = settings.connect_timeout + settings.request_timeout + WAIT_SLACK;
    let endpoint = settings.endpoint.clone();
    let client = ClientHandle::new(settings).context("starting client worker")?;
    let mut shell = Shell::new(EffectRunner::new(client));

    for (index, url) in cli.urls.iter().enumerate() {
        if index > 0 {
            println!();
        }
        for verdict in shell.analyze(url, wait_limit) {
            println!("{}", summarize(&verdict));
        }
    }

    if let Some(path) = cli.html.as_deref() {
        export_page(shell.document(), &endpoint, path)?;
    }
    Ok(())
}

fn export_page(document: &Document, endpoint: &str, path: &Path) -> anyhow::Result<()> {
    let page = document.to_html_page(endpoint);
    let written = write_atomically(path, &page)
        .with_context(|| format!("writing result page to {}", path.display()))?;
    phish_info!("Wrote result page to {:?}", written);
    println!("\nResult page written to {}", written.display());
    Ok(())
}

/// Drives the update loop and paints every render into the document.
pub struct Shell {
    state: AppState,
    document: Document,
    runner: EffectRunner,
}

impl Shell {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            document: Document::new(PAGE_TITLE),
            runner,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Types `url` into the form, submits it and waits for the result.
    pub fn analyze(&mut self, url: &str, wait_limit: Duration) -> Vec<VisualState> {
        let mut verdicts = Vec::new();
        verdicts.extend(self.dispatch(Msg::UrlInputChanged(url.to_string())));
        verdicts.extend(self.dispatch(Msg::Submitted));

        let deadline = Instant::now() + wait_limit;
        while self.runner.pending() > 0 {
            if Instant::now() >= deadline {
                let expired = self.runner.fail_in_flight(TransportFailure::Timeout);
                for msg in expired {
                    verdicts.extend(self.dispatch(msg));
                }
                break;
            }
            for msg in self.runner.poll(POLL_INTERVAL) {
                verdicts.extend(self.dispatch(msg));
            }
        }
        verdicts
    }

    /// Applies one message; returns the verdicts it put on screen.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<VisualState> {
        let applies_verdict = matches!(msg, Msg::AnalysisFinished { .. });
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let immediate = self.runner.enqueue(&effects);

        let mut verdicts = Vec::new();
        if self.state.consume_dirty() {
            let view = self.state.view();
            let misses = self.document.apply_all(render(&view));
            if misses > 0 {
                phish_warn!("{} render command(s) targeted missing elements", misses);
            }
            if applies_verdict {
                if let ResultPanel::Verdict(verdict) = view.panel {
                    verdicts.push(verdict);
                }
            }
        }
        self.document.apply_all(render_effects(&effects));

        for msg in immediate {
            verdicts.extend(self.dispatch(msg));
        }
        verdicts
    }
}
