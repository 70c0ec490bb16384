#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use meetdesk_core::api::{ApiError, MeetBackend, RosterBackend};
use meetdesk_core::models::{
    Athlete, AthleteField, Entry, EventGroup, Gender, Meet, MeetEvent, MeetPage, MeetPatch,
    NewAthlete, NewMeet, NewMeetEvent, PageAthlete, Season, Team, YesNo,
};

#[derive(Default)]
pub struct Inner {
    pub meets: Vec<Meet>,
    /// (meet_id, meet event)
    pub meet_events: Vec<(i64, MeetEvent)>,
    pub athletes: Vec<Athlete>,
    pub teams: Vec<Team>,
    pub event_groups: Vec<EventGroup>,
    pub seasons: Vec<Season>,
    pub calls: Vec<String>,
    pub next_id: i64,
    /// Return archived meets from `list_meets` too.
    pub leak_archived: bool,
    /// Make the next call whose name matches fail with this message.
    pub fail: Option<(String, String)>,
}

/// Backend that keeps everything in memory and records each call by name.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

fn server_error(message: &str) -> ApiError {
    ApiError::Server {
        status: 400,
        message: message.to_string(),
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        {
            let mut inner = backend.lock();
            inner.next_id = 100;
            inner.teams = vec![
                Team { team_id: 2, org_id: Some(1), name: "JV".to_string() },
                Team { team_id: 1, org_id: Some(1), name: "Varsity".to_string() },
            ];
            inner.event_groups = vec![
                EventGroup { event_group_id: 1, name: "Sprints".to_string() },
                EventGroup { event_group_id: 2, name: "Distance".to_string() },
            ];
            inner.seasons = vec![Season {
                season_id: 1,
                name: "Spring".to_string(),
                year: Some(2026),
                discipline: Some("Outdoor".to_string()),
            }];
        }
        backend
    }

    pub fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("backend mutex poisoned")
    }

    pub fn with_athlete(self, athlete_id: i64, first: &str, last: &str, gender: Gender) -> Self {
        self.lock().athletes.push(Athlete {
            athlete_id,
            org_id: Some(1),
            team_id: 1,
            event_group_id: 1,
            varsity_yn: YesNo::No,
            first_name: first.to_string(),
            last_name: last.to_string(),
            gender,
            available_yn: YesNo::Yes,
            expected_return: None,
            grad_year: None,
            is_active: YesNo::Yes,
        });
        self
    }

    pub fn with_meet(self, meet_id: i64, name: &str, is_archived: bool) -> Self {
        self.lock().meets.push(Meet {
            meet_id,
            name: name.to_string(),
            meet_date: None,
            location: None,
            venue_type: None,
            is_varsity: false,
            season_id: None,
            notes: None,
            is_archived,
        });
        self
    }

    /// Insert a meet event with entries directly, bypassing the call log.
    pub fn with_meet_event(self, meet_id: i64, meet_event_id: i64, gender: Gender, athletes: &[i64]) -> Self {
        {
            let mut inner = self.lock();
            let entries = athletes
                .iter()
                .map(|id| entry_for(&inner.athletes, *id))
                .collect();
            inner.meet_events.push((
                meet_id,
                MeetEvent {
                    meet_event_id,
                    event_id: Some(meet_event_id),
                    event_name: format!("Event {}", meet_event_id),
                    event_group: None,
                    gender: Some(gender),
                    sort_order: meet_event_id,
                    entries,
                },
            ));
        }
        self
    }

    pub fn fail_next(&self, call: &str, message: &str) {
        self.lock().fail = Some((call.to_string(), message.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.lock().calls.iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str) -> Result<MutexGuard<'_, Inner>, ApiError> {
        let mut inner = self.lock();
        inner.calls.push(call.to_string());
        if let Some((name, message)) = inner.fail.clone() {
            if name == call {
                inner.fail = None;
                return Err(server_error(&message));
            }
        }
        Ok(inner)
    }
}

fn entry_for(athletes: &[Athlete], athlete_id: i64) -> Entry {
    let athlete = athletes.iter().find(|a| a.athlete_id == athlete_id);
    Entry {
        athlete_id,
        first_name: athlete.map(|a| a.first_name.clone()).unwrap_or_default(),
        last_name: athlete.map(|a| a.last_name.clone()).unwrap_or_default(),
        unavailable: athlete.map(|a| !a.available_yn.is_yes()).unwrap_or(false),
    }
}

#[async_trait]
impl MeetBackend for InMemoryBackend {
    async fn list_meets(&self) -> Result<Vec<Meet>, ApiError> {
        let inner = self.record("list_meets")?;
        Ok(inner
            .meets
            .iter()
            .filter(|m| inner.leak_archived || !m.is_archived)
            .cloned()
            .collect())
    }

    async fn create_meet(&self, meet: &NewMeet) -> Result<Meet, ApiError> {
        let mut inner = self.record("create_meet")?;
        if meet.name.trim().is_empty() {
            return Err(server_error("name is required"));
        }
        inner.next_id += 1;
        let created = Meet {
            meet_id: inner.next_id,
            name: meet.name.clone(),
            meet_date: meet.meet_date,
            location: meet.location.clone(),
            venue_type: meet.venue_type,
            is_varsity: meet.is_varsity,
            season_id: meet.season_id,
            notes: meet.notes.clone(),
            is_archived: false,
        };
        inner.meets.push(created.clone());
        Ok(created)
    }

    async fn update_meet(&self, meet_id: i64, patch: &MeetPatch) -> Result<Meet, ApiError> {
        let mut inner = self.record("update_meet")?;
        let meet = inner
            .meets
            .iter_mut()
            .find(|m| m.meet_id == meet_id)
            .ok_or_else(|| server_error("Not found"))?;
        if let Some(ref name) = patch.name {
            meet.name = name.clone();
        }
        if let Some(ref location) = patch.location {
            meet.location = location.clone();
        }
        if let Some(meet_date) = patch.meet_date {
            meet.meet_date = meet_date;
        }
        if let Some(venue_type) = patch.venue_type {
            meet.venue_type = venue_type;
        }
        if let Some(season_id) = patch.season_id {
            meet.season_id = season_id;
        }
        if let Some(ref notes) = patch.notes {
            meet.notes = notes.clone();
        }
        if let Some(is_varsity) = patch.is_varsity {
            meet.is_varsity = is_varsity;
        }
        if let Some(is_archived) = patch.is_archived {
            meet.is_archived = is_archived;
        }
        Ok(meet.clone())
    }

    async fn fetch_meet_page(&self, meet_id: i64, gender: Gender) -> Result<MeetPage, ApiError> {
        let inner = self.record("fetch_meet_page")?;
        let meet = inner
            .meets
            .iter()
            .find(|m| m.meet_id == meet_id)
            .cloned()
            .ok_or_else(|| server_error("Not found"))?;
        let meet_events = inner
            .meet_events
            .iter()
            .filter(|(id, me)| *id == meet_id && me.gender == Some(gender))
            .map(|(_, me)| me.clone())
            .collect::<Vec<_>>();
        let athletes = inner
            .athletes
            .iter()
            .filter(|a| a.gender == gender && a.is_active())
            .map(|a| PageAthlete {
                athlete_id: a.athlete_id,
                first_name: a.first_name.clone(),
                last_name: a.last_name.clone(),
                gender: Some(a.gender),
                varsity_meets: 0,
                unavailable: !a.available_yn.is_yes(),
                team_name: None,
                event_group_name: None,
            })
            .collect();
        Ok(MeetPage {
            meet,
            gender: Some(gender),
            meet_events,
            athletes,
        })
    }

    async fn add_meet_event(&self, meet_id: i64, event: &NewMeetEvent) -> Result<(), ApiError> {
        let mut inner = self.record("add_meet_event")?;
        inner.next_id += 1;
        let meet_event_id = inner.next_id;
        inner.meet_events.push((
            meet_id,
            MeetEvent {
                meet_event_id,
                event_id: Some(event.event_id),
                event_name: format!("Event {}", event.event_id),
                event_group: None,
                gender: Some(event.gender),
                sort_order: event.sort_order,
                entries: Vec::new(),
            },
        ));
        Ok(())
    }

    async fn add_entry(&self, meet_event_id: i64, athlete_id: i64) -> Result<(), ApiError> {
        let mut inner = self.record("add_entry")?;
        let entry = entry_for(&inner.athletes, athlete_id);
        let (_, me) = inner
            .meet_events
            .iter_mut()
            .find(|(_, me)| me.meet_event_id == meet_event_id)
            .ok_or_else(|| server_error("Not found"))?;
        if me.has_athlete(athlete_id) {
            return Err(server_error("athlete already entered"));
        }
        me.entries.push(entry);
        Ok(())
    }

    async fn remove_entry(&self, meet_event_id: i64, athlete_id: i64) -> Result<(), ApiError> {
        let mut inner = self.record("remove_entry")?;
        if let Some((_, me)) = inner
            .meet_events
            .iter_mut()
            .find(|(_, me)| me.meet_event_id == meet_event_id)
        {
            me.entries.retain(|e| e.athlete_id != athlete_id);
        }
        Ok(())
    }

    async fn list_seasons(&self) -> Result<Vec<Season>, ApiError> {
        let inner = self.record("list_seasons")?;
        Ok(inner.seasons.clone())
    }
}

#[async_trait]
impl RosterBackend for InMemoryBackend {
    async fn list_teams(&self) -> Result<Vec<Team>, ApiError> {
        let inner = self.record("list_teams")?;
        Ok(inner.teams.clone())
    }

    async fn list_event_groups(&self) -> Result<Vec<EventGroup>, ApiError> {
        let inner = self.record("list_event_groups")?;
        Ok(inner.event_groups.clone())
    }

    async fn list_athletes(&self, include_inactive: bool) -> Result<Vec<Athlete>, ApiError> {
        let inner = self.record("list_athletes")?;
        let mut athletes: Vec<Athlete> = inner
            .athletes
            .iter()
            .filter(|a| include_inactive || a.is_active())
            .cloned()
            .collect();
        // Deliberately unordered to exercise client-side sorting.
        athletes.reverse();
        Ok(athletes)
    }

    async fn create_athlete(&self, athlete: &NewAthlete) -> Result<Athlete, ApiError> {
        let mut inner = self.record("create_athlete")?;
        inner.next_id += 1;
        let created = Athlete {
            athlete_id: inner.next_id,
            org_id: Some(1),
            team_id: athlete.team_id,
            event_group_id: athlete.event_group_id,
            varsity_yn: athlete.varsity_yn,
            first_name: athlete.first_name.clone(),
            last_name: athlete.last_name.clone(),
            gender: athlete.gender,
            available_yn: athlete.available_yn,
            expected_return: athlete.expected_return,
            grad_year: athlete.grad_year,
            is_active: YesNo::Yes,
        };
        inner.athletes.push(created.clone());
        Ok(created)
    }

    async fn update_athlete(
        &self,
        athlete_id: i64,
        field: &AthleteField,
    ) -> Result<Athlete, ApiError> {
        let mut inner = self.record("update_athlete")?;
        let athlete = inner
            .athletes
            .iter_mut()
            .find(|a| a.athlete_id == athlete_id)
            .ok_or_else(|| server_error("Not found"))?;
        athlete.apply(field);
        Ok(athlete.clone())
    }
}
