//! Application state management for meetdesk.
//!
//! This module contains the core `App` struct: the two editors, UI state
//! (tab, focus, cursors, overlays), form state, and the single pending
//! command the main loop executes next.

use anyhow::Result;
use tracing::{debug, info, warn};

use meetdesk_core::api::ApiClient;
use meetdesk_core::config::API_URL_ENV;
use meetdesk_core::editor::{AddEntryOutcome, ArchiveOutcome, EditorError};
use meetdesk_core::models::{
    Athlete, AthleteField, Entry, Meet, MeetEvent, MeetPatch, NewMeet, PageAthlete,
};
use meetdesk_core::roster::AthleteForm;
use meetdesk_core::{Config, MeetEditor, RosterEditor};

use crate::forms::{AthleteFormField, FieldEditor, MeetEventForm, MeetForm};

// ============================================================================
// Constants
// ============================================================================

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Meets,
    Athletes,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Meets => "Meets",
            Tab::Athletes => "Athletes",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Meets => Tab::Athletes,
            Tab::Athletes => Tab::Meets,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        self.next()
    }
}

/// Focused column on the Meets tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetFocus {
    Meets,
    Events,
    Entries,
    Athletes,
}

impl MeetFocus {
    pub fn next(&self) -> Self {
        match self {
            MeetFocus::Meets => MeetFocus::Events,
            MeetFocus::Events => MeetFocus::Entries,
            MeetFocus::Entries => MeetFocus::Athletes,
            MeetFocus::Athletes => MeetFocus::Meets,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            MeetFocus::Meets => MeetFocus::Athletes,
            MeetFocus::Events => MeetFocus::Meets,
            MeetFocus::Entries => MeetFocus::Events,
            MeetFocus::Athletes => MeetFocus::Entries,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ShowingError,
    ConfirmingQuit,
    ConfirmingArchive,
    EditingMeet,
    AddingMeetEvent,
    AddingAthlete,
    EditingAthlete,
    Quitting,
}

impl AppState {
    /// States that draw a form overlay and take text input.
    pub fn is_form(&self) -> bool {
        matches!(
            self,
            AppState::EditingMeet
                | AppState::AddingMeetEvent
                | AppState::AddingAthlete
                | AppState::EditingAthlete
        )
    }
}

// ============================================================================
// Commands
// ============================================================================

/// A backend round-trip queued by the input handler. The main loop draws the
/// loading text, then awaits `App::execute`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Initialize,
    LoadMeets,
    OpenMeet(i64),
    SelectEvent(i64),
    ClearEventSelection,
    AddEntry(i64),
    RemoveEntry { meet_event_id: i64, athlete_id: i64 },
    ToggleGender,
    ToggleArchive,
    CreateMeet(NewMeet),
    UpdateMeet(MeetPatch),
    AddMeetEvent { event_id: i64, sort_order: Option<i64> },
    LoadSeasons,
    LoadAthletes,
    ToggleInactive,
    CreateAthlete(AthleteForm),
    UpdateAthlete(i64, AthleteField),
}

impl Command {
    pub fn loading_text(&self) -> &'static str {
        match self {
            Command::Initialize => "loading…",
            Command::LoadMeets => "loading meets…",
            Command::OpenMeet(_)
            | Command::SelectEvent(_)
            | Command::ClearEventSelection
            | Command::ToggleGender => "loading meet…",
            Command::AddEntry(_) => "adding entry…",
            Command::RemoveEntry { .. } => "removing entry…",
            Command::ToggleArchive => "saving…",
            Command::CreateMeet(_) => "creating meet…",
            Command::UpdateMeet(_) => "saving meet…",
            Command::AddMeetEvent { .. } => "adding event…",
            Command::LoadSeasons => "loading seasons…",
            Command::LoadAthletes | Command::ToggleInactive => "loading athletes…",
            Command::CreateAthlete(_) => "adding athlete…",
            Command::UpdateAthlete(..) => "saving…",
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub config: Config,
    pub meet_editor: MeetEditor<ApiClient>,
    pub roster: RosterEditor<ApiClient>,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub meet_focus: MeetFocus,

    // Selection indices
    pub meet_selection: usize,
    pub event_selection: usize,
    pub entry_selection: usize,
    pub athlete_selection: usize,
    pub roster_selection: usize,

    // Forms
    pub meet_form: MeetForm,
    pub meet_event_form: MeetEventForm,
    pub athlete_form: AthleteForm,
    pub athlete_form_field: AthleteFormField,
    pub field_editor: Option<FieldEditor>,
    pub form_error: Option<String>,

    // Messages
    pub error_message: Option<String>,
    pub status_message: Option<String>,

    pending: Option<Command>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let base_url = config.base_url(std::env::var(API_URL_ENV).ok());
        let timeout = config.timeout_secs();
        debug!(%base_url, timeout, "Creating API client");
        let api = ApiClient::new(&base_url, timeout)?;

        let meet_editor = MeetEditor::new(api.clone(), config.starting_gender());
        let roster = RosterEditor::new(api, config.show_inactive_athletes);

        Ok(Self {
            config,
            meet_editor,
            roster,

            state: AppState::Normal,
            current_tab: Tab::Meets,
            meet_focus: MeetFocus::Meets,

            meet_selection: 0,
            event_selection: 0,
            entry_selection: 0,
            athlete_selection: 0,
            roster_selection: 0,

            meet_form: MeetForm::new(),
            meet_event_form: MeetEventForm::default(),
            athlete_form: AthleteForm::default(),
            athlete_form_field: AthleteFormField::FirstName,
            field_editor: None,
            form_error: None,

            error_message: None,
            status_message: None,

            pending: None,
        })
    }

    // =========================================================================
    // Command queue
    // =========================================================================

    /// Queue a command. A newer command replaces one that has not started.
    pub fn queue(&mut self, command: Command) {
        if let Some(ref replaced) = self.pending {
            debug!(?replaced, "Replacing pending command");
        }
        self.pending = Some(command);
    }

    pub fn take_pending(&mut self) -> Option<Command> {
        self.pending.take()
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<&Command> {
        self.pending.as_ref()
    }

    /// Run one command against the editors. Failures open the error overlay.
    pub async fn execute(&mut self, command: Command) {
        debug!(?command, "Executing command");
        let loading = command.loading_text();
        self.status_message = Some(loading.to_string());
        let result = self.run(command).await;
        if self.status_message.as_deref() == Some(loading) {
            self.status_message = None;
        }
        if let Err(e) = result {
            warn!(error = %e, "Command failed");
            self.show_error(e.user_message());
        }
        self.clamp_cursors();
    }

    async fn run(&mut self, command: Command) -> Result<(), EditorError> {
        match command {
            Command::Initialize => self.initialize().await,
            Command::LoadMeets => self.meet_editor.load_meets().await,
            Command::OpenMeet(meet_id) => {
                self.event_selection = 0;
                self.entry_selection = 0;
                self.athlete_selection = 0;
                self.meet_editor.open_meet(meet_id).await
            }
            Command::SelectEvent(id) => {
                self.entry_selection = 0;
                self.meet_editor.select_event(id).await
            }
            Command::ClearEventSelection => self.meet_editor.clear_event_selection().await,
            Command::AddEntry(athlete_id) => {
                if self.meet_editor.add_entry(athlete_id).await? == AddEntryOutcome::AlreadyEntered
                {
                    self.status_message = Some("Already entered".to_string());
                }
                Ok(())
            }
            Command::RemoveEntry {
                meet_event_id,
                athlete_id,
            } => self.meet_editor.remove_entry(meet_event_id, athlete_id).await,
            Command::ToggleGender => {
                self.event_selection = 0;
                self.entry_selection = 0;
                self.meet_editor.toggle_gender().await
            }
            Command::ToggleArchive => {
                if self.meet_editor.toggle_archive().await? == ArchiveOutcome::Archived {
                    self.meet_focus = MeetFocus::Meets;
                }
                Ok(())
            }
            Command::CreateMeet(meet) => {
                let created = self.meet_editor.create_meet(meet).await?;
                if let Some(pos) = self
                    .meet_editor
                    .meets()
                    .iter()
                    .position(|m| m.meet_id == created.meet_id)
                {
                    self.meet_selection = pos;
                }
                self.meet_focus = MeetFocus::Events;
                Ok(())
            }
            Command::UpdateMeet(patch) => self.meet_editor.update_meet(patch).await,
            Command::AddMeetEvent {
                event_id,
                sort_order,
            } => self.meet_editor.add_meet_event(event_id, sort_order).await,
            Command::LoadSeasons => self.meet_editor.seasons().await.map(|_| ()),
            Command::LoadAthletes => self.roster.load_athletes().await,
            Command::ToggleInactive => self.roster.toggle_include_inactive().await,
            Command::CreateAthlete(form) => {
                let created = self.roster.create_athlete(&form).await?;
                self.athlete_form.clear_after_submit();
                if let Some(pos) = self
                    .roster
                    .athletes()
                    .iter()
                    .position(|a| a.athlete_id == created.athlete_id)
                {
                    self.roster_selection = pos;
                }
                self.status_message = Some(format!("Added {}", created.full_name()));
                Ok(())
            }
            Command::UpdateAthlete(athlete_id, field) => {
                self.roster.update_field(athlete_id, field).await
            }
        }
    }

    /// Load both screens and reopen the meet that was open last time.
    async fn initialize(&mut self) -> Result<(), EditorError> {
        self.meet_editor.load_meets().await?;
        if let Err(e) = self.roster.initialize().await {
            warn!(error = %e, "Roster failed to load");
            self.show_error(e.user_message());
        }
        self.athlete_form = self.roster.blank_form();

        if let Some(last) = self.config.last_meet_id {
            match self.meet_editor.meets().iter().position(|m| m.meet_id == last) {
                Some(pos) => {
                    info!(meet_id = last, "Reopening last meet");
                    self.meet_selection = pos;
                    self.meet_editor.open_meet(last).await?;
                }
                None => debug!(meet_id = last, "Last meet no longer listed"),
            }
        }
        Ok(())
    }

    // =========================================================================
    // Overlays
    // =========================================================================

    pub fn show_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.state = AppState::ShowingError;
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
        self.state = AppState::Normal;
    }

    pub fn start_new_meet(&mut self) {
        self.meet_form = MeetForm::new();
        self.form_error = None;
        self.state = AppState::EditingMeet;
        if self.meet_editor.cached_seasons().is_empty() {
            self.queue(Command::LoadSeasons);
        }
    }

    pub fn start_edit_meet(&mut self) {
        let Some(meet) = self.meet_editor.state().current_meet.clone() else {
            self.show_error(EditorError::NoMeetSelected.user_message());
            return;
        };
        self.meet_form = MeetForm::from_meet(&meet);
        self.form_error = None;
        self.state = AppState::EditingMeet;
        if self.meet_editor.cached_seasons().is_empty() {
            self.queue(Command::LoadSeasons);
        }
    }

    pub fn submit_meet_form(&mut self) {
        let command = match self.meet_form.meet_id {
            Some(_) => match self.meet_editor.state().current_meet.as_ref() {
                Some(original) => self.meet_form.to_patch(original).map(Command::UpdateMeet),
                None => Err(EditorError::NoMeetSelected.user_message()),
            },
            None => self.meet_form.to_new_meet().map(Command::CreateMeet),
        };
        match command {
            Ok(command) => {
                self.state = AppState::Normal;
                self.queue(command);
            }
            Err(message) => self.form_error = Some(message),
        }
    }

    pub fn start_add_meet_event(&mut self) {
        if self.meet_editor.state().current_meet_id.is_none() {
            self.show_error(EditorError::NoMeetSelected.user_message());
            return;
        }
        self.meet_event_form = MeetEventForm::default();
        self.form_error = None;
        self.state = AppState::AddingMeetEvent;
    }

    pub fn submit_meet_event_form(&mut self) {
        match self.meet_event_form.parse() {
            Ok((event_id, sort_order)) => {
                self.state = AppState::Normal;
                self.queue(Command::AddMeetEvent {
                    event_id,
                    sort_order,
                });
            }
            Err(message) => self.form_error = Some(message),
        }
    }

    pub fn start_new_athlete(&mut self) {
        if self.athlete_form.team_id.is_none() && self.athlete_form.event_group_id.is_none() {
            self.athlete_form = self.roster.blank_form();
        }
        self.athlete_form_field = AthleteFormField::FirstName;
        self.form_error = None;
        self.state = AppState::AddingAthlete;
    }

    /// Submit is disabled while the form is invalid; the reason is shown
    /// inline instead.
    pub fn submit_athlete_form(&mut self) {
        match self.athlete_form.validate() {
            Ok(_) => {
                self.state = AppState::Normal;
                self.queue(Command::CreateAthlete(self.athlete_form.clone()));
            }
            Err(e) => self.form_error = Some(e.to_string()),
        }
    }

    pub fn start_edit_athlete(&mut self) {
        if let Some(athlete) = self.selected_roster_athlete() {
            self.field_editor = Some(FieldEditor::open(athlete));
            self.form_error = None;
            self.state = AppState::EditingAthlete;
        }
    }

    pub fn submit_field_editor(&mut self) {
        let Some(editor) = self.field_editor.as_ref() else {
            self.state = AppState::Normal;
            return;
        };
        match editor.to_field() {
            Ok(field) => {
                let athlete_id = editor.athlete_id;
                self.field_editor = None;
                self.state = AppState::Normal;
                self.queue(Command::UpdateAthlete(athlete_id, field));
            }
            Err(e) => self.form_error = Some(e.to_string()),
        }
    }

    pub fn close_form(&mut self) {
        self.field_editor = None;
        self.form_error = None;
        self.state = AppState::Normal;
    }

    // =========================================================================
    // Selection helpers
    // =========================================================================

    pub fn highlighted_meet(&self) -> Option<&Meet> {
        self.meet_editor.meets().get(self.meet_selection)
    }

    pub fn meet_events(&self) -> &[MeetEvent] {
        self.meet_editor
            .view()
            .map(|v| v.events())
            .unwrap_or_default()
    }

    pub fn page_athletes(&self) -> &[PageAthlete] {
        self.meet_editor
            .view()
            .map(|v| v.athletes())
            .unwrap_or_default()
    }

    pub fn highlighted_event(&self) -> Option<&MeetEvent> {
        self.meet_events().get(self.event_selection)
    }

    /// The selected meet event on the loaded page, if any.
    pub fn selected_event(&self) -> Option<&MeetEvent> {
        let id = self.meet_editor.state().selected_meet_event_id?;
        self.meet_editor.view()?.event(id)
    }

    pub fn selected_entries(&self) -> &[Entry] {
        self.selected_event()
            .map(|me| me.entries.as_slice())
            .unwrap_or_default()
    }

    pub fn highlighted_entry(&self) -> Option<&Entry> {
        self.selected_entries().get(self.entry_selection)
    }

    pub fn highlighted_page_athlete(&self) -> Option<&PageAthlete> {
        self.page_athletes().get(self.athlete_selection)
    }

    pub fn selected_roster_athlete(&self) -> Option<&Athlete> {
        self.roster.athletes().get(self.roster_selection)
    }

    /// Length of the list the cursor keys currently move through.
    pub fn focused_list_len(&self) -> usize {
        match self.current_tab {
            Tab::Athletes => self.roster.athletes().len(),
            Tab::Meets => match self.meet_focus {
                MeetFocus::Meets => self.meet_editor.meets().len(),
                MeetFocus::Events => self.meet_events().len(),
                MeetFocus::Entries => self.selected_entries().len(),
                MeetFocus::Athletes => self.page_athletes().len(),
            },
        }
    }

    pub fn focused_cursor_mut(&mut self) -> &mut usize {
        match self.current_tab {
            Tab::Athletes => &mut self.roster_selection,
            Tab::Meets => match self.meet_focus {
                MeetFocus::Meets => &mut self.meet_selection,
                MeetFocus::Events => &mut self.event_selection,
                MeetFocus::Entries => &mut self.entry_selection,
                MeetFocus::Athletes => &mut self.athlete_selection,
            },
        }
    }

    /// Keep every cursor inside its list after a reload.
    pub fn clamp_cursors(&mut self) {
        fn clamp(cursor: &mut usize, len: usize) {
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
        let meets = self.meet_editor.meets().len();
        let events = self.meet_events().len();
        let entries = self.selected_entries().len();
        let athletes = self.page_athletes().len();
        let roster = self.roster.athletes().len();
        clamp(&mut self.meet_selection, meets);
        clamp(&mut self.event_selection, events);
        clamp(&mut self.entry_selection, entries);
        clamp(&mut self.athlete_selection, athletes);
        clamp(&mut self.roster_selection, roster);
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Remember the open meet, gender and roster toggle for next start.
    pub fn save_config(&mut self) -> Result<()> {
        let state = self.meet_editor.state();
        self.config.last_meet_id = state.current_meet_id;
        self.config.default_gender = Some(state.current_gender);
        self.config.show_inactive_athletes = self.roster.include_inactive();
        self.config.save()
    }
}

// ============================================================================
// Tests
// ============================================================================
