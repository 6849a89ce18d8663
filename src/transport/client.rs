use std::sync::mpsc;

use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::TransportError;
use crate::event::{AppEvent, StreamEvent};
use crate::model::{RunId, SessionRequest};
use crate::transport::{sse, RunTransport};

/// Streams research runs from a LangGraph agent server.
///
/// Owns a small tokio runtime so the synchronous UI loop never blocks on
/// the network. Events go back to the loop over the shared `AppEvent` channel.
pub struct LangGraphClient {
    http: reqwest::Client,
    runs_url: String,
    assistant_id: String,
    runtime: Runtime,
    events: mpsc::Sender<AppEvent>,
    active: Option<JoinHandle<()>>,
}

impl LangGraphClient {
    pub fn new(config: &Config, events: mpsc::Sender<AppEvent>) -> Result<Self, TransportError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("research-stream")
            .enable_all()
            .build()
            .map_err(|e| TransportError::Http(format!("failed to start runtime: {}", e)))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("research-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            runs_url: runs_stream_url(&config.api_url),
            assistant_id: config.assistant_id.clone(),
            runtime,
            events,
            active: None,
        })
    }
}

impl RunTransport for LangGraphClient {
    fn start(&mut self, run_id: RunId, request: SessionRequest) {
        // One subscription at a time
        self.stop();

        let body = request.run_payload(&self.assistant_id);
        tracing::info!(%run_id, url = %self.runs_url, "opening stream");

        let task = stream_run(
            self.http.clone(),
            self.runs_url.clone(),
            body,
            run_id,
            self.events.clone(),
        );
        self.active = Some(self.runtime.spawn(task));
    }

    fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            if !handle.is_finished() {
                tracing::info!("aborting active stream");
            }
            handle.abort();
        }
    }
}

impl Drop for LangGraphClient {
    fn drop(&mut self) {
        self.stop();
    }
}

fn runs_stream_url(api_url: &str) -> String {
    format!("{}/runs/stream", api_url.trim_end_matches('/'))
}

/// Drive one run to completion and report how it ended.
async fn stream_run(
    http: reqwest::Client,
    url: String,
    body: Value,
    run_id: RunId,
    tx: mpsc::Sender<AppEvent>,
) {
    let outcome = match forward_events(&http, &url, &body, &run_id, &tx).await {
        Ok(()) => StreamEvent::Finished,
        Err(e) => StreamEvent::Failed(e),
    };
    let _ = tx.send(AppEvent::Stream {
        run_id,
        event: outcome,
    });
}

async fn forward_events(
    http: &reqwest::Client,
    url: &str,
    body: &Value,
    run_id: &RunId,
    tx: &mpsc::Sender<AppEvent>,
) -> Result<(), TransportError> {
    let response = http
        .post(url)
        .header(ACCEPT, "text/event-stream")
        .json(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let mut stream = response.bytes_stream().eventsource();
    while let Some(sse) = stream.next().await {
        let sse = sse.map_err(|e| TransportError::Stream(e.to_string()))?;
        tracing::trace!(event = %sse.event, data = %sse.data, "SSE");

        let event = match sse::decode_event(&sse.event, &sse.data) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(TransportError::Json { event, message }) => {
                // Undecodable payloads never end the turn
                tracing::warn!(%event, %message, "skipping undecodable SSE event");
                continue;
            }
            Err(e) => return Err(e),
        };

        let sent = tx.send(AppEvent::Stream {
            run_id: run_id.clone(),
            event,
        });
        if sent.is_err() {
            // UI loop is gone
            return Ok(());
        }
    }

    Ok(())
}
