// Home Assistant REST API repository implementation
use crate::application::energy_repository::{
    EnergyRepository, EntityState, FetchError, FetchErrorKind,
};
use crate::domain::energy::RawReading;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HomeAssistantClient {
    host: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct HaState {
    #[serde(default)]
    entity_id: String,
    #[serde(default)]
    state: String,
}

/// With `minimal_response` only the first entry of each list carries the
/// entity id.
#[derive(Debug, Deserialize)]
struct HaHistoryEntry {
    #[serde(default)]
    entity_id: Option<String>,
    state: String,
    last_changed: DateTime<Utc>,
}

impl HomeAssistantClient {
    pub fn new(host: String, token: String) -> reqwest::Result<Self> {
        Self::with_timeout(host, token, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(host: String, token: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.host, endpoint);
        tracing::debug!("Requesting {}", endpoint);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        if let Some(err) = status_error(response.status(), endpoint) {
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(&e)
            } else {
                FetchError::new(
                    FetchErrorKind::Unknown,
                    format!("Failed to parse Home Assistant response: {}", e),
                )
            }
        })
    }
}

fn transport_error(e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::new(
            FetchErrorKind::Timeout,
            "Home Assistant not responding (timeout)",
        )
    } else if e.is_connect() || e.is_request() {
        FetchError::new(FetchErrorKind::Network, "Unable to connect to Home Assistant")
    } else {
        FetchError::new(FetchErrorKind::Unknown, format!("Unexpected error: {}", e))
    }
}

fn status_error(status: StatusCode, endpoint: &str) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }
    let err = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::new(
            FetchErrorKind::Auth,
            "Authentication failed - check HA_TOKEN",
        ),
        StatusCode::NOT_FOUND => FetchError::new(
            FetchErrorKind::NotFound,
            format!("Endpoint not found: {}", endpoint),
        ),
        StatusCode::SERVICE_UNAVAILABLE => FetchError::new(
            FetchErrorKind::Unavailable,
            "Home Assistant data is currently unavailable",
        ),
        _ => FetchError::new(
            FetchErrorKind::Unknown,
            format!("Home Assistant returned status {}", status.as_u16()),
        ),
    };
    Some(err)
}

fn history_endpoint(entity_ids: &[String], start: DateTime<Utc>) -> String {
    let start_iso = start.to_rfc3339_opts(SecondsFormat::Millis, true);
    let filter = entity_ids
        .iter()
        .map(|id| urlencoding::encode(id).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "/api/history/period/{}?filter_entity_id={}&minimal_response&no_attributes",
        urlencoding::encode(&start_iso),
        filter
    )
}

fn group_history(history: Vec<Vec<HaHistoryEntry>>) -> HashMap<String, Vec<RawReading>> {
    let mut grouped = HashMap::new();
    for entries in history {
        let Some(entity_id) = entries.first().and_then(|e| e.entity_id.clone()) else {
            continue;
        };
        let readings = entries
            .into_iter()
            .map(|e| RawReading::new(e.last_changed, e.state))
            .collect();
        grouped.insert(entity_id, readings);
    }
    grouped
}

#[async_trait]
impl EnergyRepository for HomeAssistantClient {
    async fn fetch_state(&self, entity_id: &str) -> Result<EntityState, FetchError> {
        let endpoint = format!("/api/states/{}", urlencoding::encode(entity_id));
        let state: HaState = self.get_json(&endpoint).await?;

        if state.entity_id.is_empty() {
            return Err(FetchError::new(
                FetchErrorKind::NotFound,
                format!("Entity not found: {}", entity_id),
            ));
        }

        Ok(EntityState {
            entity_id: state.entity_id,
            state: state.state,
        })
    }

    async fn fetch_history(
        &self,
        entity_ids: &[String],
        start: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<RawReading>>, FetchError> {
        let endpoint = history_endpoint(entity_ids, start);
        let history: Vec<Vec<HaHistoryEntry>> = self.get_json(&endpoint).await?;

        let grouped = group_history(history);
        tracing::debug!(
            "Fetched history for {} of {} entities",
            grouped.len(),
            entity_ids.len()
        );
        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::HeaderMap;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::TimeZone;
    use serde_json::json;

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    async fn state_handler(Path(entity): Path<String>, headers: HeaderMap) -> axum::response::Response {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer secret") {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        match entity.as_str() {
            "sensor.missing" => StatusCode::NOT_FOUND.into_response(),
            "sensor.empty" => Json(json!({})).into_response(),
            "sensor.booting" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
            "sensor.slow" => {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({"entity_id": entity, "state": "1"})).into_response()
            }
            _ => Json(json!({"entity_id": entity, "state": "1234.5"})).into_response(),
        }
    }

    async fn history_handler() -> Json<serde_json::Value> {
        Json(json!([
            [
                {"entity_id": "sensor.pv_power", "state": "100", "last_changed": "2024-06-01T10:00:00+00:00"},
                {"state": "unavailable", "last_changed": "2024-06-01T10:05:00+00:00"},
                {"state": "250.5", "last_changed": "2024-06-01T10:10:00.123+00:00"}
            ],
            []
        ]))
    }

    fn mock_router() -> Router {
        Router::new()
            .route("/api/states/:entity", get(state_handler))
            .route("/api/history/period/:start", get(history_handler))
    }

    #[test]
    fn test_history_endpoint() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let endpoint = history_endpoint(
            &["sensor.pv_power".to_string(), "sensor.active_power".to_string()],
            start,
        );
        assert_eq!(
            endpoint,
            "/api/history/period/2024-06-01T12%3A00%3A00.000Z?filter_entity_id=sensor.pv_power,sensor.active_power&minimal_response&no_attributes"
        );
    }

    #[test]
    fn test_status_classification() {
        assert!(status_error(StatusCode::OK, "/x").is_none());
        assert_eq!(status_error(StatusCode::FORBIDDEN, "/x").unwrap().kind, FetchErrorKind::Auth);
        assert_eq!(status_error(StatusCode::NOT_FOUND, "/x").unwrap().kind, FetchErrorKind::NotFound);
        assert_eq!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, "/x").unwrap().kind,
            FetchErrorKind::Unavailable
        );
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "/x").unwrap();
        assert_eq!(err.kind, FetchErrorKind::Unknown);
        assert_eq!(err.message, "Home Assistant returned status 500");
    }

    #[test]
    fn test_group_history_skips_anonymous_lists() {
        let history: Vec<Vec<HaHistoryEntry>> = serde_json::from_value(json!([
            [{"entity_id": "sensor.a", "state": "1", "last_changed": "2024-06-01T10:00:00Z"},
             {"state": "2", "last_changed": "2024-06-01T10:01:00Z"}],
            [{"state": "3", "last_changed": "2024-06-01T10:00:00Z"}],
            []
        ]))
        .unwrap();

        let grouped = group_history(history);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["sensor.a"].len(), 2);
        assert_eq!(grouped["sensor.a"][1].state, "2");
    }

    #[tokio::test]
    async fn test_fetch_state() {
        let host = spawn_mock(mock_router()).await;
        let client = HomeAssistantClient::new(host, "secret".to_string()).unwrap();

        let state = client.fetch_state("sensor.pv_power").await.unwrap();
        assert_eq!(state.entity_id, "sensor.pv_power");
        assert_eq!(state.state, "1234.5");

        let err = client.fetch_state("sensor.missing").await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::NotFound);

        let err = client.fetch_state("sensor.empty").await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::NotFound);
        assert_eq!(err.message, "Entity not found: sensor.empty");

        let err = client.fetch_state("sensor.booting").await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn test_bad_token_is_auth_error() {
        let host = spawn_mock(mock_router()).await;
        let client = HomeAssistantClient::new(host, "wrong".to_string()).unwrap();

        let err = client.fetch_state("sensor.pv_power").await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Auth);
    }

    #[tokio::test]
    async fn test_fetch_history() {
        let host = spawn_mock(mock_router()).await;
        let client = HomeAssistantClient::new(host, "secret".to_string()).unwrap();

        let ids = vec!["sensor.pv_power".to_string(), "sensor.active_power".to_string()];
        let history = client
            .fetch_history(&ids, Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap())
            .await
            .unwrap();

        assert_eq!(history.len(), 1);
        let pv = &history["sensor.pv_power"];
        assert_eq!(pv.len(), 3);
        assert_eq!(pv[1].state, "unavailable");
        assert_eq!(pv[0].timestamp, Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_timeout() {
        let host = spawn_mock(mock_router()).await;
        let client =
            HomeAssistantClient::with_timeout(host, "secret".to_string(), Duration::from_millis(100))
                .unwrap();

        let err = client.fetch_state("sensor.slow").await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HomeAssistantClient::new(format!("http://{}", addr), "secret".to_string()).unwrap();
        let err = client.fetch_state("sensor.pv_power").await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Network);
    }
}
