// Repository trait for energy data access
use crate::domain::energy::RawReading;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// Category of an upstream fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Auth,
    NotFound,
    Unavailable,
    Timeout,
    Unknown,
}

impl FetchErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchErrorKind::Network => "network",
            FetchErrorKind::Auth => "auth",
            FetchErrorKind::NotFound => "not_found",
            FetchErrorKind::Unavailable => "unavailable",
            FetchErrorKind::Timeout => "timeout",
            FetchErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Current state of a single entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
}

#[async_trait]
pub trait EnergyRepository: Send + Sync {
    /// Fetch the current state of one entity
    async fn fetch_state(&self, entity_id: &str) -> Result<EntityState, FetchError>;

    /// Fetch raw history since `start` for several entities in one request,
    /// keyed by entity id. Entities without history are absent from the map.
    async fn fetch_history(
        &self,
        entity_ids: &[String],
        start: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<RawReading>>, FetchError>;
}
