use std::collections::HashMap;

/// Event type reported by the runtime for container lifecycle changes.
pub const CONTAINER_EVENT_TYPE: &str = "container";

/// A single record from the runtime's event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub kind: String,
    pub action: String,
    pub actor_id: String,
    pub actor_attributes: HashMap<String, String>,
}

impl Event {
    /// Name of the container as reported in the event, if any.
    pub fn container_name(&self) -> Option<&str> {
        self.actor_attributes.get("name").map(String::as_str)
    }

    /// Returns the watched action when this event is worth looking at.
    pub fn watched_action(&self) -> Option<WatchedAction> {
        if self.kind != CONTAINER_EVENT_TYPE {
            return None;
        }
        WatchedAction::parse(&self.action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchedAction {
    Start,
    Stop,
    Healthy,
    Unhealthy,
}

impl WatchedAction {
    pub const ALL: [WatchedAction; 4] = [
        WatchedAction::Start,
        WatchedAction::Stop,
        WatchedAction::Healthy,
        WatchedAction::Unhealthy,
    ];

    /// Docker writes health transitions as `health_status: healthy`; the
    /// space after the colon is optional here.
    pub fn parse(action: &str) -> Option<Self> {
        let action = match action.split_once(':') {
            Some(("health_status", state)) => match state.trim_start() {
                "healthy" => return Some(WatchedAction::Healthy),
                "unhealthy" => return Some(WatchedAction::Unhealthy),
                _ => return None,
            },
            _ => action,
        };
        Self::ALL.into_iter().find(|a| a.as_str() == action)
    }

    /// Raw action name as the runtime reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchedAction::Start => "start",
            WatchedAction::Stop => "stop",
            WatchedAction::Healthy => "health_status:healthy",
            WatchedAction::Unhealthy => "health_status:unhealthy",
        }
    }

    /// Status reported in the notification.
    pub fn status(&self) -> &'static str {
        match self {
            WatchedAction::Healthy => "healthy",
            WatchedAction::Unhealthy => "unhealthy",
            other => other.as_str(),
        }
    }
}
