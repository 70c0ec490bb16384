use tracing::{debug, info, warn};

use crate::api::RosterBackend;
use crate::cache::Snapshot;
use crate::editor::EditorError;
use crate::models::{Athlete, AthleteField, EventGroup, Team, YesNo};

use super::AthleteForm;

/// Roster screen controller: lookups, the athlete list, and one-field edits.
pub struct RosterEditor<B: RosterBackend> {
    backend: B,
    teams: Vec<Team>,
    event_groups: Vec<EventGroup>,
    athletes: Snapshot<Vec<Athlete>>,
    include_inactive: bool,
    status: Option<String>,
}

impl<B: RosterBackend> RosterEditor<B> {
    pub fn new(backend: B, include_inactive: bool) -> Self {
        Self {
            backend,
            teams: Vec::new(),
            event_groups: Vec::new(),
            athletes: Snapshot::new(Vec::new()),
            include_inactive,
            status: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn event_groups(&self) -> &[EventGroup] {
        &self.event_groups
    }

    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes.data
    }

    pub fn athletes_snapshot(&self) -> &Snapshot<Vec<Athlete>> {
        &self.athletes
    }

    pub fn athlete(&self, athlete_id: i64) -> Option<&Athlete> {
        self.athletes().iter().find(|a| a.athlete_id == athlete_id)
    }

    pub fn include_inactive(&self) -> bool {
        self.include_inactive
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Blank new-athlete form defaulted to the first team and event group.
    pub fn blank_form(&self) -> AthleteForm {
        AthleteForm::new(
            self.teams.first().map(|t| t.team_id),
            self.event_groups.first().map(|g| g.event_group_id),
        )
    }

    /// Lookups first, then the roster.
    pub async fn initialize(&mut self) -> Result<(), EditorError> {
        self.load_lookups().await?;
        self.load_athletes().await
    }

    pub async fn load_lookups(&mut self) -> Result<(), EditorError> {
        self.status = Some("loading lookups…".to_string());
        let result = futures::try_join!(
            self.backend.list_teams(),
            self.backend.list_event_groups()
        );
        self.status = None;

        let (mut teams, event_groups) = result?;
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(
            teams = teams.len(),
            event_groups = event_groups.len(),
            "Lookups loaded"
        );
        self.teams = teams;
        self.event_groups = event_groups;
        Ok(())
    }

    pub async fn load_athletes(&mut self) -> Result<(), EditorError> {
        self.status = Some("loading athletes…".to_string());
        let result = self.backend.list_athletes(self.include_inactive).await;
        self.status = None;

        let mut athletes = result?;
        athletes.sort_by_key(|a| a.athlete_id);
        debug!(count = athletes.len(), include_inactive = self.include_inactive, "Athletes loaded");
        self.athletes = Snapshot::new(athletes);
        Ok(())
    }

    pub async fn set_include_inactive(&mut self, include_inactive: bool) -> Result<(), EditorError> {
        self.include_inactive = include_inactive;
        self.load_athletes().await
    }

    pub async fn toggle_include_inactive(&mut self) -> Result<(), EditorError> {
        self.set_include_inactive(!self.include_inactive).await
    }

    /// Validate locally, create, then reload the roster. Invalid forms never
    /// reach the backend.
    pub async fn create_athlete(&mut self, form: &AthleteForm) -> Result<Athlete, EditorError> {
        let athlete = form.validate()?;

        self.status = Some("adding…".to_string());
        let result = self.backend.create_athlete(&athlete).await;
        self.status = None;

        let created = result?;
        info!(athlete_id = created.athlete_id, name = %created.full_name(), "Athlete created");
        self.load_athletes().await?;
        Ok(created)
    }

    /// Patch a single field. On success the returned record replaces the local
    /// row; on failure the roster is reloaded before the error is returned.
    pub async fn update_field(
        &mut self,
        athlete_id: i64,
        field: AthleteField,
    ) -> Result<(), EditorError> {
        self.status = Some("saving…".to_string());
        let result = self.backend.update_athlete(athlete_id, &field).await;
        self.status = None;

        match result {
            Ok(updated) => {
                debug!(athlete_id, field = field.key(), "Athlete saved");
                let drops_from_list = !self.include_inactive && !updated.is_active();
                if drops_from_list {
                    return self.load_athletes().await;
                }
                if let Some(row) = self
                    .athletes
                    .data
                    .iter_mut()
                    .find(|a| a.athlete_id == athlete_id)
                {
                    *row = updated;
                }
                Ok(())
            }
            Err(e) => {
                warn!(athlete_id, field = field.key(), error = %e, "Athlete update failed");
                if let Err(reload) = self.load_athletes().await {
                    warn!(error = %reload, "Roster reload after failed update also failed");
                }
                Err(e.into())
            }
        }
    }

    /// Soft delete or restore.
    pub async fn set_active(&mut self, athlete_id: i64, active: bool) -> Result<(), EditorError> {
        self.update_field(athlete_id, AthleteField::Active(YesNo::from(active)))
            .await
    }
}
