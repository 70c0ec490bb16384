use serde::{Deserialize, Serialize};

use super::{Gender, Meet};

/// An athlete entered in a meet event, with display fields copied from the
/// athlete record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub athlete_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub unavailable: bool,
}

impl Entry {
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// One gender-partitioned contest inside a meet (e.g. "Boys 100m").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetEvent {
    pub meet_event_id: i64,
    #[serde(default)]
    pub event_id: Option<i64>,
    pub event_name: String,
    #[serde(default)]
    pub event_group: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub sort_order: i64,
    /// Insertion order as returned by the server.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl MeetEvent {
    pub fn has_athlete(&self, athlete_id: i64) -> bool {
        self.entries.iter().any(|e| e.athlete_id == athlete_id)
    }
}

/// Athlete as listed on the meet page for one gender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAthlete {
    pub athlete_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub varsity_meets: u32,
    #[serde(default)]
    pub unavailable: bool,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub event_group_name: Option<String>,
}

impl PageAthlete {
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Response of `GET /api/meets/{id}/page?gender=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetPage {
    pub meet: Meet,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub meet_events: Vec<MeetEvent>,
    #[serde(default)]
    pub athletes: Vec<PageAthlete>,
}

/// Body of `POST /api/meets/{id}/meet-events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMeetEvent {
    pub event_id: i64,
    pub gender: Gender,
    pub sort_order: i64,
}

/// Body of `POST /api/meet-events/{id}/entries`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewEntry {
    pub athlete_id: i64,
}
