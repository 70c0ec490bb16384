//! Overlay form state: create/edit meet, add meet event, new athlete, and the
//! single-field athlete editor.
//!
//! Forms hold raw text while the user types. Parsing happens on submit so a
//! half-typed date never reaches the editors.

use meetdesk_core::models::{
    name_of, position_of, Athlete, AthleteField, EventGroup, Gender, Lookup, Meet, MeetPatch,
    NewMeet, Season, Team, VenueType,
};
use meetdesk_core::roster::{parse_grad_year, parse_optional_date, AthleteForm, FormError};

// ============================================================================
// Text input helpers
// ============================================================================

/// Maximum length for any single text field.
const MAX_INPUT_LENGTH: usize = 64;

/// Check if a character should be accepted into a text field
pub fn can_add_input_char(current_len: usize, c: char) -> bool {
    current_len < MAX_INPUT_LENGTH && !c.is_control()
}

fn push_char(target: &mut String, c: char) {
    if can_add_input_char(target.chars().count(), c) {
        target.push(c);
    }
}

fn push_digit(target: &mut String, c: char) {
    if c.is_ascii_digit() {
        push_char(target, c);
    }
}

/// Step through a lookup list. `None` sits before the first entry when
/// `allow_none` is set.
fn cycle_lookup<T: Lookup>(items: &[T], current: Option<i64>, allow_none: bool) -> Option<i64> {
    if items.is_empty() {
        return None;
    }
    let next = match current.and_then(|id| position_of(items, id)) {
        Some(pos) if pos + 1 < items.len() => Some(pos + 1),
        Some(_) if allow_none => None,
        Some(_) => Some(0),
        None => Some(0),
    };
    next.map(|pos| items[pos].id())
}

// ============================================================================
// Meet form
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetFormField {
    Name,
    Date,
    Location,
    Venue,
    Varsity,
    Season,
    Notes,
}

impl MeetFormField {
    pub const ALL: [MeetFormField; 7] = [
        MeetFormField::Name,
        MeetFormField::Date,
        MeetFormField::Location,
        MeetFormField::Venue,
        MeetFormField::Varsity,
        MeetFormField::Season,
        MeetFormField::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MeetFormField::Name => "Name",
            MeetFormField::Date => "Date",
            MeetFormField::Location => "Location",
            MeetFormField::Venue => "Venue",
            MeetFormField::Varsity => "Varsity",
            MeetFormField::Season => "Season",
            MeetFormField::Notes => "Notes",
        }
    }

    pub fn next(&self) -> Self {
        let pos = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let pos = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Fields changed with Space/←/→ instead of typing.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            MeetFormField::Venue | MeetFormField::Varsity | MeetFormField::Season
        )
    }
}

/// Create/edit meet dialog. `meet_id` is set when editing.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetForm {
    pub meet_id: Option<i64>,
    pub name: String,
    pub meet_date: String,
    pub location: String,
    pub venue_type: Option<VenueType>,
    pub is_varsity: bool,
    pub season_id: Option<i64>,
    pub notes: String,
    pub focus: MeetFormField,
}

impl Default for MeetForm {
    fn default() -> Self {
        Self {
            meet_id: None,
            name: String::new(),
            meet_date: String::new(),
            location: String::new(),
            venue_type: None,
            is_varsity: false,
            season_id: None,
            notes: String::new(),
            focus: MeetFormField::Name,
        }
    }
}

impl MeetForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_meet(meet: &Meet) -> Self {
        Self {
            meet_id: Some(meet.meet_id),
            name: meet.name.clone(),
            meet_date: meet
                .meet_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            location: meet.location.clone().unwrap_or_default(),
            venue_type: meet.venue_type,
            is_varsity: meet.is_varsity,
            season_id: meet.season_id,
            notes: meet.notes.clone().unwrap_or_default(),
            focus: MeetFormField::Name,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.meet_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            " Edit Meet "
        } else {
            " New Meet "
        }
    }

    pub fn season_label(&self, seasons: &[Season]) -> String {
        match self.season_id {
            Some(id) => seasons
                .iter()
                .find(|s| s.season_id == id)
                .map(|s| s.label())
                .unwrap_or_else(|| name_of(seasons, id).to_string()),
            None => "(none)".to_string(),
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            MeetFormField::Name => push_char(&mut self.name, c),
            MeetFormField::Date => {
                if c.is_ascii_digit() || c == '-' {
                    push_char(&mut self.meet_date, c);
                }
            }
            MeetFormField::Location => push_char(&mut self.location, c),
            MeetFormField::Notes => push_char(&mut self.notes, c),
            MeetFormField::Venue | MeetFormField::Varsity | MeetFormField::Season => {}
        }
    }

    pub fn backspace(&mut self) {
        let target = match self.focus {
            MeetFormField::Name => &mut self.name,
            MeetFormField::Date => &mut self.meet_date,
            MeetFormField::Location => &mut self.location,
            MeetFormField::Notes => &mut self.notes,
            MeetFormField::Venue | MeetFormField::Varsity | MeetFormField::Season => return,
        };
        target.pop();
    }

    /// Advance the focused choice field.
    pub fn cycle_choice(&mut self, seasons: &[Season]) {
        match self.focus {
            MeetFormField::Venue => self.venue_type = VenueType::cycle(self.venue_type),
            MeetFormField::Varsity => self.is_varsity = !self.is_varsity,
            MeetFormField::Season => self.season_id = cycle_lookup(seasons, self.season_id, true),
            _ => {}
        }
    }

    fn validated_name(&self) -> Result<String, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Meet name is required".to_string());
        }
        Ok(name.to_string())
    }

    fn validated_date(&self) -> Result<Option<chrono::NaiveDate>, String> {
        parse_optional_date(&self.meet_date).map_err(|e| e.to_string())
    }

    pub fn to_new_meet(&self) -> Result<NewMeet, String> {
        Ok(NewMeet {
            name: self.validated_name()?,
            is_varsity: self.is_varsity,
            venue_type: self.venue_type,
            meet_date: self.validated_date()?,
            location: non_blank(&self.location),
            season_id: self.season_id,
            notes: non_blank(&self.notes),
        })
    }

    /// Partial update holding only the fields that differ from `original`.
    pub fn to_patch(&self, original: &Meet) -> Result<MeetPatch, String> {
        let name = self.validated_name()?;
        let meet_date = self.validated_date()?;
        let location = non_blank(&self.location);
        let notes = non_blank(&self.notes);

        let mut patch = MeetPatch::default();
        if name != original.name {
            patch.name = Some(name);
        }
        if meet_date != original.meet_date {
            patch.meet_date = Some(meet_date);
        }
        if location != original.location {
            patch.location = Some(location);
        }
        if self.venue_type != original.venue_type {
            patch.venue_type = Some(self.venue_type);
        }
        if self.is_varsity != original.is_varsity {
            patch.is_varsity = Some(self.is_varsity);
        }
        if self.season_id != original.season_id {
            patch.season_id = Some(self.season_id);
        }
        if notes != original.notes {
            patch.notes = Some(notes);
        }
        Ok(patch)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ============================================================================
// Add meet event form
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetEventForm {
    pub event_id: String,
    pub sort_order: String,
    pub editing_sort_order: bool,
}

impl MeetEventForm {
    pub fn input_char(&mut self, c: char) {
        if self.editing_sort_order {
            push_digit(&mut self.sort_order, c);
        } else {
            push_digit(&mut self.event_id, c);
        }
    }

    pub fn backspace(&mut self) {
        if self.editing_sort_order {
            self.sort_order.pop();
        } else {
            self.event_id.pop();
        }
    }

    pub fn toggle_focus(&mut self) {
        self.editing_sort_order = !self.editing_sort_order;
    }

    /// Event id, and the sort order if one was typed.
    pub fn parse(&self) -> Result<(i64, Option<i64>), String> {
        let event_id = self
            .event_id
            .trim()
            .parse::<i64>()
            .map_err(|_| "Enter an event id".to_string())?;
        let sort_order = match self.sort_order.trim() {
            "" => None,
            s => Some(
                s.parse::<i64>()
                    .map_err(|_| "Sort order must be a number".to_string())?,
            ),
        };
        Ok((event_id, sort_order))
    }
}

// ============================================================================
// New athlete form
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AthleteFormField {
    FirstName,
    LastName,
    Gender,
    Team,
    EventGroup,
    Varsity,
    Available,
    ExpectedReturn,
    GradYear,
}

impl AthleteFormField {
    pub const ALL: [AthleteFormField; 9] = [
        AthleteFormField::FirstName,
        AthleteFormField::LastName,
        AthleteFormField::Gender,
        AthleteFormField::Team,
        AthleteFormField::EventGroup,
        AthleteFormField::Varsity,
        AthleteFormField::Available,
        AthleteFormField::ExpectedReturn,
        AthleteFormField::GradYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AthleteFormField::FirstName => "First name",
            AthleteFormField::LastName => "Last name",
            AthleteFormField::Gender => "Gender",
            AthleteFormField::Team => "Team",
            AthleteFormField::EventGroup => "Event group",
            AthleteFormField::Varsity => "Varsity",
            AthleteFormField::Available => "Available",
            AthleteFormField::ExpectedReturn => "Expected return",
            AthleteFormField::GradYear => "Grad year",
        }
    }

    /// Choice fields cycle with ←/→/Space; the rest take typed text.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            AthleteFormField::Gender
                | AthleteFormField::Team
                | AthleteFormField::EventGroup
                | AthleteFormField::Varsity
                | AthleteFormField::Available
        )
    }

    pub fn next(&self) -> Self {
        let pos = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let pos = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub fn athlete_form_input(form: &mut AthleteForm, field: AthleteFormField, c: char) {
    match field {
        AthleteFormField::FirstName => push_char(&mut form.first_name, c),
        AthleteFormField::LastName => push_char(&mut form.last_name, c),
        AthleteFormField::ExpectedReturn => {
            if c.is_ascii_digit() || c == '-' {
                push_char(&mut form.expected_return, c);
            }
        }
        AthleteFormField::GradYear => push_digit(&mut form.grad_year, c),
        _ => {}
    }
}

pub fn athlete_form_backspace(form: &mut AthleteForm, field: AthleteFormField) {
    match field {
        AthleteFormField::FirstName => {
            form.first_name.pop();
        }
        AthleteFormField::LastName => {
            form.last_name.pop();
        }
        AthleteFormField::ExpectedReturn => {
            form.expected_return.pop();
        }
        AthleteFormField::GradYear => {
            form.grad_year.pop();
        }
        _ => {}
    }
}

pub fn athlete_form_cycle(
    form: &mut AthleteForm,
    field: AthleteFormField,
    teams: &[Team],
    event_groups: &[EventGroup],
) {
    match field {
        AthleteFormField::Gender => form.gender = form.gender.next(),
        AthleteFormField::Team => form.team_id = cycle_lookup(teams, form.team_id, false),
        AthleteFormField::EventGroup => {
            form.event_group_id = cycle_lookup(event_groups, form.event_group_id, false)
        }
        AthleteFormField::Varsity => form.varsity = form.varsity.flipped(),
        AthleteFormField::Available => form.available = form.available.flipped(),
        _ => {}
    }
}

// ============================================================================
// Single-field athlete editor
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    FirstName,
    LastName,
    Gender,
    Team,
    EventGroup,
    ExpectedReturn,
    GradYear,
}

impl EditableField {
    pub const ALL: [EditableField; 7] = [
        EditableField::FirstName,
        EditableField::LastName,
        EditableField::Gender,
        EditableField::Team,
        EditableField::EventGroup,
        EditableField::ExpectedReturn,
        EditableField::GradYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditableField::FirstName => "First name",
            EditableField::LastName => "Last name",
            EditableField::Gender => "Gender",
            EditableField::Team => "Team",
            EditableField::EventGroup => "Event group",
            EditableField::ExpectedReturn => "Expected return",
            EditableField::GradYear => "Grad year",
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            EditableField::Gender | EditableField::Team | EditableField::EventGroup
        )
    }
}

/// Edits one field of one athlete; submitting sends exactly that field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEditor {
    pub athlete_id: i64,
    pub field: EditableField,
    pub input: String,
    pub gender: Gender,
    pub team_id: i64,
    pub event_group_id: i64,
    original: Athlete,
}

impl FieldEditor {
    pub fn open(athlete: &Athlete) -> Self {
        let mut editor = Self {
            athlete_id: athlete.athlete_id,
            field: EditableField::FirstName,
            input: String::new(),
            gender: athlete.gender,
            team_id: athlete.team_id,
            event_group_id: athlete.event_group_id,
            original: athlete.clone(),
        };
        editor.load_input();
        editor
    }

    pub fn athlete_name(&self) -> String {
        self.original.full_name()
    }

    fn load_input(&mut self) {
        self.input = match self.field {
            EditableField::FirstName => self.original.first_name.clone(),
            EditableField::LastName => self.original.last_name.clone(),
            EditableField::ExpectedReturn => self
                .original
                .expected_return
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            EditableField::GradYear => self
                .original
                .grad_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            EditableField::Gender | EditableField::Team | EditableField::EventGroup => {
                String::new()
            }
        };
        self.gender = self.original.gender;
        self.team_id = self.original.team_id;
        self.event_group_id = self.original.event_group_id;
    }

    pub fn next_field(&mut self) {
        let pos = EditableField::ALL
            .iter()
            .position(|f| *f == self.field)
            .unwrap_or(0);
        self.field = EditableField::ALL[(pos + 1) % EditableField::ALL.len()];
        self.load_input();
    }

    pub fn prev_field(&mut self) {
        let len = EditableField::ALL.len();
        let pos = EditableField::ALL
            .iter()
            .position(|f| *f == self.field)
            .unwrap_or(0);
        self.field = EditableField::ALL[(pos + len - 1) % len];
        self.load_input();
    }

    pub fn input_char(&mut self, c: char) {
        match self.field {
            EditableField::FirstName | EditableField::LastName => push_char(&mut self.input, c),
            EditableField::ExpectedReturn => {
                if c.is_ascii_digit() || c == '-' {
                    push_char(&mut self.input, c);
                }
            }
            EditableField::GradYear => push_digit(&mut self.input, c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        if !self.field.is_choice() {
            self.input.pop();
        }
    }

    pub fn cycle_choice(&mut self, teams: &[Team], event_groups: &[EventGroup]) {
        match self.field {
            EditableField::Gender => self.gender = self.gender.next(),
            EditableField::Team => {
                if let Some(id) = cycle_lookup(teams, Some(self.team_id), false) {
                    self.team_id = id;
                }
            }
            EditableField::EventGroup => {
                if let Some(id) = cycle_lookup(event_groups, Some(self.event_group_id), false) {
                    self.event_group_id = id;
                }
            }
            _ => {}
        }
    }

    /// Current value as display text.
    pub fn value_display(&self, teams: &[Team], event_groups: &[EventGroup]) -> String {
        match self.field {
            EditableField::Gender => self.gender.code().to_string(),
            EditableField::Team => name_of(teams, self.team_id).to_string(),
            EditableField::EventGroup => name_of(event_groups, self.event_group_id).to_string(),
            _ => self.input.clone(),
        }
    }

    pub fn to_field(&self) -> Result<AthleteField, FormError> {
        Ok(match self.field {
            EditableField::FirstName => {
                if self.input.trim().is_empty() {
                    return Err(FormError::MissingFirstName);
                }
                AthleteField::FirstName(self.input.trim().to_string())
            }
            EditableField::LastName => {
                if self.input.trim().is_empty() {
                    return Err(FormError::MissingLastName);
                }
                AthleteField::LastName(self.input.trim().to_string())
            }
            EditableField::Gender => AthleteField::Gender(self.gender),
            EditableField::Team => AthleteField::Team(self.team_id),
            EditableField::EventGroup => AthleteField::EventGroup(self.event_group_id),
            EditableField::ExpectedReturn => {
                AthleteField::ExpectedReturn(parse_optional_date(&self.input)?)
            }
            EditableField::GradYear => AthleteField::GradYear(parse_grad_year(&self.input)?),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
