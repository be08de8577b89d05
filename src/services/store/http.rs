// HTTP implementation of the schedule store

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Serialize;
use std::thread;
use std::time::Duration;

use crate::models::activity::{ActivityKind, Version};
use crate::models::settings::SchedulerConfig;
use crate::models::snapshot::ScheduleSnapshot;

use super::{MutationOutcome, MutationRequest, ScheduleScope, ScheduleStore, StoreError};

const CALENDAR_PATH: &str = "/api/padel/calendar";
const STALE_VERSION_CODE: &str = "STALE_VERSION";

/// Store client over the dashboard's calendar endpoint.
///
/// Reads are retried a bounded number of times on transport failure;
/// mutations never are: a conflict, stale-version, or lock answer is a
/// definitive decision by the store, and blindly re-issuing a create
/// could double-book a court.
pub struct HttpScheduleStore {
    client: Client,
    base_url: String,
    scope: ScheduleScope,
    max_fetch_retries: usize,
    retry_delay_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MutationBody<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_id: Option<i64>,
    start_at: String,
    end_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    court_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
}

impl HttpScheduleStore {
    pub fn new(base_url: impl Into<String>, scope: ScheduleScope, config: &SchedulerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build calendar store HTTP client")?;

        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(anyhow!("Calendar store base URL must not be empty"));
        }

        Ok(Self {
            client,
            base_url,
            scope,
            max_fetch_retries: 2,
            retry_delay_ms: 400,
        })
    }

    fn calendar_url(&self, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, CALENDAR_PATH);
        for (i, (key, value)) in query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            url.push(sep);
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn fetch_once(&self, scope: &ScheduleScope) -> Result<ScheduleSnapshot, StoreError> {
        let url = self.calendar_url(&[("eventId", scope.event_id.to_string())]);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| StoreError::Transport(format!("Calendar fetch failed: {}", e)))?;

        let response = check_status(response)?;
        response
            .json::<ScheduleSnapshot>()
            .map_err(|e| StoreError::Transport(format!("Calendar payload did not parse: {}", e)))
    }

    fn mutation_body<'a>(&self, request: &'a MutationRequest) -> MutationBody<'a> {
        MutationBody {
            kind: request.kind.as_str(),
            id: request.id,
            // Creations are scoped to the event; updates already carry an id
            event_id: request.id.is_none().then_some(self.scope.event_id),
            start_at: request.start_at.to_rfc3339(),
            end_at: request.end_at.to_rfc3339(),
            court_id: request.court_id,
            version: request.version.as_ref().map(Version::as_str),
        }
    }
}

impl ScheduleStore for HttpScheduleStore {
    fn fetch(&self, scope: &ScheduleScope) -> Result<ScheduleSnapshot, StoreError> {
        let mut last_error = StoreError::Transport("Calendar fetch never attempted".to_string());

        for attempt in 0..=self.max_fetch_retries {
            match self.fetch_once(scope) {
                Ok(snapshot) => return Ok(snapshot),
                Err(err @ StoreError::Transport(_)) => {
                    if attempt < self.max_fetch_retries {
                        log::warn!("Calendar fetch attempt {} failed: {}", attempt + 1, err);
                        thread::sleep(Duration::from_millis(self.retry_delay_ms));
                    }
                    last_error = err;
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error)
    }

    fn mutate(&self, request: &MutationRequest) -> Result<MutationOutcome, StoreError> {
        let url = self.calendar_url(&[]);
        let body = self.mutation_body(request);

        let builder = if request.id.is_some() {
            self.client.patch(&url)
        } else {
            self.client.post(&url)
        };

        let response = builder
            .json(&body)
            .send()
            .map_err(|e| StoreError::Transport(format!("Mutation request failed: {}", e)))?;

        let response = check_status(response)?;
        let payload: serde_json::Value = response
            .json()
            .map_err(|e| StoreError::Transport(format!("Mutation response did not parse: {}", e)))?;

        Ok(outcome_from_payload(request, &payload))
    }

    fn delete(&self, kind: ActivityKind, id: i64) -> Result<(), StoreError> {
        if kind == ActivityKind::Match {
            return Err(StoreError::Precondition(
                "Matches cannot be deleted from the calendar; reschedule or unassign them instead"
                    .to_string(),
            ));
        }

        let url = self.calendar_url(&[
            ("type", kind.as_str().to_string()),
            ("id", id.to_string()),
        ]);
        let response = self
            .client
            .delete(&url)
            .send()
            .map_err(|e| StoreError::Transport(format!("Delete request failed: {}", e)))?;

        check_status(response).map(|_| ())
    }
}

/// Map an HTTP answer onto the store failure taxonomy.
fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(response);

    match status {
        StatusCode::CONFLICT => {
            if message.as_deref() == Some(STALE_VERSION_CODE) {
                Err(StoreError::StaleVersion)
            } else {
                Err(StoreError::Conflict(message.unwrap_or_else(|| {
                    "The requested slot collides with an existing entry".to_string()
                })))
            }
        }
        StatusCode::LOCKED => Err(StoreError::Locked),
        _ => Err(StoreError::Transport(match message {
            Some(msg) => format!("Store answered {}: {}", status, msg),
            None => format!("Store answered {}", status),
        })),
    }
}

/// Pull the `error` string out of a failure body, when there is one.
fn error_message(response: Response) -> Option<String> {
    let payload: serde_json::Value = response.json().ok()?;
    payload
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::to_string)
}

/// The store echoes the updated entity under a key named after its kind;
/// the fresh version token is its `updatedAt`.
fn outcome_from_payload(request: &MutationRequest, payload: &serde_json::Value) -> MutationOutcome {
    let entity = payload.get(request.kind.as_str());
    let id = entity
        .and_then(|e| e.get("id"))
        .and_then(|id| id.as_i64())
        .or(request.id)
        .unwrap_or_default();
    let version = entity
        .and_then(|e| e.get("updatedAt"))
        .and_then(|v| v.as_str())
        .map(Version::new);

    MutationOutcome { id, version }
}
