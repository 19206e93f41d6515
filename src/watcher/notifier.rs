use futures_util::{Stream, StreamExt};
use reqwest::StatusCode;

use super::event::Event;
use super::runtime::{ContainerRuntime, RuntimeError};
use super::webhook::{NotificationPayload, WebhookError, WebhookSink};
use crate::config::NotifierConfig;

/// How a single event was settled when no step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a watched container transition.
    Ignored,
    /// The container does not carry the watch label.
    Unwatched,
    /// The webhook answered 200.
    Delivered(StatusCode),
    /// The webhook answered with a non-error status other than 200.
    Unexpected(StatusCode),
}

/// A step failed; the event is abandoned.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Error inspecting container {id}: {source}")]
    Inspect { id: String, source: RuntimeError },
    #[error("Error fetching logs for container {id}: {source}")]
    Logs { id: String, source: RuntimeError },
    #[error("Failed to send webhook for {name}: {source}")]
    Webhook { name: String, source: WebhookError },
}

impl EventError {
    fn log(&self) {
        match self {
            EventError::Logs {
                id,
                source: RuntimeError::NotFound(_),
            } => log::warn!("Container {id} not found for logs"),
            EventError::Inspect {
                id,
                source: RuntimeError::NotFound(_),
            } => log::warn!("Container {id} not found for inspection"),
            e => log::error!("{e}"),
        }
    }
}

/// Filters, enriches and forwards container events, one at a time.
pub struct Notifier<R, W> {
    config: NotifierConfig,
    runtime: R,
    sink: W,
}

impl<R: ContainerRuntime, W: WebhookSink> Notifier<R, W> {
    pub fn new(config: NotifierConfig, runtime: R, sink: W) -> Self {
        Self {
            config,
            runtime,
            sink,
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Pulls events until the source fails or ends. Per-event failures are
    /// logged and never stop the loop.
    pub async fn run<S>(&self, mut events: S) -> Result<(), RuntimeError>
    where
        S: Stream<Item = Result<Event, RuntimeError>> + Unpin,
    {
        log::info!("Listening for Docker events...");
        while let Some(event) = events.next().await {
            let event = event.inspect_err(|e| log::error!("Docker event stream failed: {e}"))?;
            log::debug!("Received event: {event:?}");

            if let Err(e) = self.handle(&event).await {
                e.log();
            }
        }
        log::error!("Docker event stream closed");
        Err(RuntimeError::EventStreamClosed)
    }

    /// Runs every step for one event. The first failing step aborts the rest.
    pub async fn handle(&self, event: &Event) -> Result<Outcome, EventError> {
        let Some(action) = event.watched_action() else {
            return Ok(Outcome::Ignored);
        };
        let id = &event.actor_id;
        log::debug!(
            "Event: {}, Action: {} on container {:?} ({id})",
            event.kind,
            event.action,
            event.container_name()
        );

        let snapshot = self
            .runtime
            .inspect(id)
            .await
            .map_err(|source| EventError::Inspect {
                id: id.clone(),
                source,
            })?;
        log::debug!("Container {} labels: {:?}", snapshot.id, snapshot.labels);

        if !snapshot.is_watched(&self.config.watch_label) {
            return Ok(Outcome::Unwatched);
        }

        let container_name = event
            .container_name()
            .map(str::to_string)
            .or_else(|| snapshot.name.clone());
        log::info!(
            "Event: {}, Action: {} on LABELED container {} ({id})",
            event.kind,
            event.action,
            container_name.as_deref().unwrap_or("<unnamed>")
        );

        let logs = self
            .runtime
            .logs(id, self.config.log_tail)
            .await
            .map_err(|source| EventError::Logs {
                id: id.clone(),
                source,
            })?;

        let payload = NotificationPayload::new(
            container_name,
            action.status(),
            snapshot.started_at,
            snapshot.finished_at,
            logs,
        );
        log::debug!("Payload for webhook: {payload:?}");

        let name = payload.container_name.clone().unwrap_or_else(|| id.clone());
        let response = self
            .sink
            .send(&payload)
            .await
            .map_err(|source| EventError::Webhook {
                name: name.clone(),
                source,
            })?;

        if response.status == StatusCode::OK {
            log::info!(
                "Webhook sent successfully for {name}: {} {}",
                response.status,
                response.body
            );
            Ok(Outcome::Delivered(response.status))
        } else {
            log::error!(
                "Failed to send webhook for {name}: {} (HTTP {})",
                response.status,
                response.status.as_u16()
            );
            Ok(Outcome::Unexpected(response.status))
        }
    }
}
