//! Docker backend using bollard.
//!
//! Provides the event subscription and the two point lookups (inspect and
//! logs) the notifier needs, translated into the crate's own types.

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{ContainerInspectResponse, EventMessage};
use bollard::query_parameters::{
    EventsOptionsBuilder, InspectContainerOptions, InspectContainerOptionsBuilder, LogsOptions,
    LogsOptionsBuilder,
};
use futures_util::StreamExt;
use futures_util::stream::BoxStream;

use super::event::{CONTAINER_EVENT_TYPE, Event, WatchedAction};
use super::runtime::{ContainerRuntime, ContainerSnapshot, RuntimeError};

pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connects using the local defaults (Unix socket on Linux/macOS, named
    /// pipe on Windows, `DOCKER_HOST` when set) and checks the daemon answers.
    pub async fn connect() -> Result<Self, RuntimeError> {
        let docker = Docker::connect_with_local_defaults()?;
        docker.ping().await.inspect_err(|e| {
            log::error!("Error connecting to Docker: {e}");
        })?;
        log::debug!("Docker is running");
        Ok(Self { docker })
    }

    /// Subscribes to container events. The daemon pre-filters coarsely;
    /// callers still apply [`Event::watched_action`].
    pub fn events(&self) -> BoxStream<'_, Result<Event, RuntimeError>> {
        // A bare `health_status` makes the daemon prefix-match every value,
        // which also covers `health_status: healthy`.
        let actions = vec![
            WatchedAction::Start.as_str(),
            WatchedAction::Stop.as_str(),
            "health_status",
        ];
        let filters = HashMap::from([("type", vec![CONTAINER_EVENT_TYPE]), ("event", actions)]);
        let options = EventsOptionsBuilder::new().filters(&filters).build();

        self.docker
            .events(Some(options))
            .map(|message| message.map(Event::from).map_err(RuntimeError::from))
            .boxed()
    }
}

fn classify(id: &str, err: bollard::errors::Error) -> RuntimeError {
    match err {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => RuntimeError::NotFound(id.to_string()),
        e => RuntimeError::Docker(e),
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn inspect(&self, id: &str) -> Result<ContainerSnapshot, RuntimeError> {
        let options: InspectContainerOptions = InspectContainerOptionsBuilder::new().build();
        let info = self
            .docker
            .inspect_container(id, Some(options))
            .await
            .map_err(|e| classify(id, e))?;
        Ok(snapshot_from_inspect(id, info))
    }

    async fn logs(&self, id: &str, tail: usize) -> Result<Option<String>, RuntimeError> {
        let options: LogsOptions = LogsOptionsBuilder::new()
            .stdout(true)
            .stderr(true)
            .follow(false)
            .timestamps(false)
            .tail(&tail.to_string())
            .build();

        let mut stream = self.docker.logs(id, Some(options));
        let mut raw = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| classify(id, e))?;
            raw.extend_from_slice(&chunk.into_bytes());
        }

        join_log_output(raw)
    }
}

/// Joined log chunks as text. Empty output is `None`; bytes that are not
/// UTF-8 fail the whole fetch.
fn join_log_output(raw: Vec<u8>) -> Result<Option<String>, RuntimeError> {
    let logs = String::from_utf8(raw)?;
    Ok((!logs.is_empty()).then_some(logs))
}

impl From<EventMessage> for Event {
    fn from(value: EventMessage) -> Self {
        let actor = value.actor.unwrap_or_default();
        Event {
            kind: value.typ.map(|t| t.to_string()).unwrap_or_default(),
            action: value.action.unwrap_or_default(),
            actor_id: actor.id.unwrap_or_default(),
            actor_attributes: actor.attributes.unwrap_or_default(),
        }
    }
}

fn snapshot_from_inspect(id: &str, info: ContainerInspectResponse) -> ContainerSnapshot {
    let state = info.state.unwrap_or_default();
    ContainerSnapshot {
        id: info.id.unwrap_or_else(|| id.to_string()),
        name: info.name.map(|n| n.trim_start_matches('/').to_string()),
        labels: info.config.and_then(|c| c.labels).unwrap_or_default(),
        started_at: state.started_at,
        finished_at: state.finished_at,
    }
}
