use async_trait::async_trait;

use crate::models::{
    Athlete, AthleteField, EventGroup, Gender, Meet, MeetPage, MeetPatch, NewAthlete, NewMeet,
    NewMeetEvent, Season, Team,
};

use super::ApiError;

/// Endpoints used by the meet editor.
#[async_trait]
pub trait MeetBackend: Send + Sync {
    /// `GET /api/meets`. Archived meets are excluded by the server.
    async fn list_meets(&self) -> Result<Vec<Meet>, ApiError>;

    async fn create_meet(&self, meet: &NewMeet) -> Result<Meet, ApiError>;

    async fn update_meet(&self, meet_id: i64, patch: &MeetPatch) -> Result<Meet, ApiError>;

    /// Meet, its events for `gender` with nested entries, and eligible athletes
    /// in one read.
    async fn fetch_meet_page(&self, meet_id: i64, gender: Gender) -> Result<MeetPage, ApiError>;

    async fn add_meet_event(&self, meet_id: i64, event: &NewMeetEvent) -> Result<(), ApiError>;

    /// Fails if the athlete is already entered or not eligible.
    async fn add_entry(&self, meet_event_id: i64, athlete_id: i64) -> Result<(), ApiError>;

    async fn remove_entry(&self, meet_event_id: i64, athlete_id: i64) -> Result<(), ApiError>;

    async fn list_seasons(&self) -> Result<Vec<Season>, ApiError>;
}

/// Endpoints used by the roster editor.
#[async_trait]
pub trait RosterBackend: Send + Sync {
    async fn list_teams(&self) -> Result<Vec<Team>, ApiError>;

    async fn list_event_groups(&self) -> Result<Vec<EventGroup>, ApiError>;

    async fn list_athletes(&self, include_inactive: bool) -> Result<Vec<Athlete>, ApiError>;

    async fn create_athlete(&self, athlete: &NewAthlete) -> Result<Athlete, ApiError>;

    async fn update_athlete(
        &self,
        athlete_id: i64,
        field: &AthleteField,
    ) -> Result<Athlete, ApiError>;
}
