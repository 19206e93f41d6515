use std::collections::HashMap;
use std::string::FromUtf8Error;

use async_trait::async_trait;

/// Point-in-time view of a container, fetched fresh for every event.
/// Timestamps are the runtime's text, untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSnapshot {
    pub id: String,
    pub name: Option<String>,
    pub labels: HashMap<String, String>,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

impl ContainerSnapshot {
    /// The label must be present with the exact value `"true"`.
    pub fn is_watched(&self, label: &str) -> bool {
        self.labels.get(label).is_some_and(|v| v == "true")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Container {0} not found")]
    NotFound(String),
    #[error("Docker API error: {0}")]
    Docker(#[from] bollard::errors::Error),
    #[error("Log output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
    #[error("Docker event stream closed")]
    EventStreamClosed,
}

/// Lookups the notifier performs against the container runtime.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn inspect(&self, id: &str) -> Result<ContainerSnapshot, RuntimeError>;

    /// Last `tail` lines of stdout and stderr. `None` when there is no output.
    async fn logs(&self, id: &str, tail: usize) -> Result<Option<String>, RuntimeError>;
}
