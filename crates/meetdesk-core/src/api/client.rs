//! API client for the meet-management REST backend.
//!
//! This module provides the `ApiClient` struct, which implements the
//! `MeetBackend` and `RosterBackend` traits over HTTP with JSON bodies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::models::{
    Athlete, AthleteField, EventGroup, Gender, Meet, MeetPage, MeetPatch, NewAthlete, NewEntry,
    NewMeet, NewMeetEvent, Season, Team,
};

use super::{ApiError, MeetBackend, RosterBackend};

// ============================================================================
// Constants
// ============================================================================

/// Default base URL, matching the backend's development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default HTTP request timeout in seconds.
/// Long enough for a slow page load, short enough that a hung request
/// does not leave the console stuck on "loading…".
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API client for the meet backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error built from the body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);
        debug!(%method, url = %url, "Sending request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, url = %url, error = %e, "Request failed to send");
            ApiError::Network(e)
        })?;

        let response = Self::check_response(response).await;
        if let Err(ref e) = response {
            warn!(%method, url = %url, error = %e, "Request returned an error status");
        }
        response
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        Self::decode(path, response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::decode(path, response).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        Self::decode(path, response).await
    }

    /// POST whose response body is not needed; the caller reloads afterwards.
    async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        debug!(status = %response.status(), path, "Created");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send::<()>(Method::DELETE, path, None).await?;
        debug!(status = %response.status(), path, "Deleted");
        Ok(())
    }

    /// `GET /health`; succeeds when the backend answers at all.
    pub async fn health(&self) -> Result<(), ApiError> {
        self.send::<()>(Method::GET, "/health", None).await.map(|_| ())
    }
}

#[async_trait]
impl MeetBackend for ApiClient {
    async fn list_meets(&self) -> Result<Vec<Meet>, ApiError> {
        self.get("/api/meets").await
    }

    async fn create_meet(&self, meet: &NewMeet) -> Result<Meet, ApiError> {
        self.post("/api/meets", meet).await
    }

    async fn update_meet(&self, meet_id: i64, patch: &MeetPatch) -> Result<Meet, ApiError> {
        self.patch(&format!("/api/meets/{}", meet_id), patch).await
    }

    async fn fetch_meet_page(&self, meet_id: i64, gender: Gender) -> Result<MeetPage, ApiError> {
        self.get(&format!("/api/meets/{}/page?gender={}", meet_id, gender.code()))
            .await
    }

    async fn add_meet_event(&self, meet_id: i64, event: &NewMeetEvent) -> Result<(), ApiError> {
        self.post_discard(&format!("/api/meets/{}/meet-events", meet_id), event)
            .await
    }

    async fn add_entry(&self, meet_event_id: i64, athlete_id: i64) -> Result<(), ApiError> {
        self.post_discard(
            &format!("/api/meet-events/{}/entries", meet_event_id),
            &NewEntry { athlete_id },
        )
        .await
    }

    async fn remove_entry(&self, meet_event_id: i64, athlete_id: i64) -> Result<(), ApiError> {
        self.delete(&format!(
            "/api/meet-events/{}/entries/{}",
            meet_event_id, athlete_id
        ))
        .await
    }

    async fn list_seasons(&self) -> Result<Vec<Season>, ApiError> {
        self.get("/api/seasons").await
    }
}

#[async_trait]
impl RosterBackend for ApiClient {
    async fn list_teams(&self) -> Result<Vec<Team>, ApiError> {
        self.get("/api/teams").await
    }

    async fn list_event_groups(&self) -> Result<Vec<EventGroup>, ApiError> {
        self.get("/api/event-groups").await
    }

    async fn list_athletes(&self, include_inactive: bool) -> Result<Vec<Athlete>, ApiError> {
        self.get(&format!("/api/athletes?include_inactive={}", include_inactive))
            .await
    }

    async fn create_athlete(&self, athlete: &NewAthlete) -> Result<Athlete, ApiError> {
        self.post("/api/athletes", athlete).await
    }

    async fn update_athlete(
        &self,
        athlete_id: i64,
        field: &AthleteField,
    ) -> Result<Athlete, ApiError> {
        self.patch(&format!("/api/athletes/{}", athlete_id), &field.to_body())
            .await
    }
}
