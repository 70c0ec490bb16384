use std::ops::RangeInclusive;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Gender, NewAthlete, YesNo};

/// Graduation years accepted by the new-athlete form.
pub const GRAD_YEAR_RANGE: RangeInclusive<i32> = 2000..=2100;

/// Problems caught before anything is sent to the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("First name is required")]
    MissingFirstName,

    #[error("Last name is required")]
    MissingLastName,

    #[error("Choose a team")]
    MissingTeam,

    #[error("Choose an event group")]
    MissingEventGroup,

    #[error("Graduation year must be a whole number, got '{0}'")]
    GradYearNotANumber(String),

    #[error("Graduation year must be between 2000 and 2100, got {0}")]
    GradYearOutOfRange(i32),

    #[error("Expected return must be a YYYY-MM-DD date, got '{0}'")]
    InvalidDate(String),
}

/// Text-level state of the new-athlete form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AthleteForm {
    pub team_id: Option<i64>,
    pub event_group_id: Option<i64>,
    pub varsity: YesNo,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub available: YesNo,
    pub expected_return: String,
    pub grad_year: String,
}

impl AthleteForm {
    /// Blank form with the first team and event group preselected, the way
    /// the pickers default.
    pub fn new(default_team: Option<i64>, default_event_group: Option<i64>) -> Self {
        Self {
            team_id: default_team,
            event_group_id: default_event_group,
            available: YesNo::Yes,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<NewAthlete, FormError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        if first_name.is_empty() {
            return Err(FormError::MissingFirstName);
        }
        if last_name.is_empty() {
            return Err(FormError::MissingLastName);
        }
        let team_id = self.team_id.ok_or(FormError::MissingTeam)?;
        let event_group_id = self.event_group_id.ok_or(FormError::MissingEventGroup)?;
        let grad_year = parse_grad_year(&self.grad_year)?;
        let expected_return = parse_optional_date(&self.expected_return)?;

        Ok(NewAthlete {
            team_id,
            event_group_id,
            varsity_yn: self.varsity,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender: self.gender,
            available_yn: self.available,
            expected_return,
            grad_year,
        })
    }

    /// Whether the submit control is enabled.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Clear the per-athlete fields after a successful add; pickers keep
    /// their values for the next entry.
    pub fn clear_after_submit(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.expected_return.clear();
        self.grad_year.clear();
    }
}

/// Empty input means "no graduation year".
pub fn parse_grad_year(input: &str) -> Result<Option<i32>, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let year: i32 = input
        .parse()
        .map_err(|_| FormError::GradYearNotANumber(input.to_string()))?;
    if !GRAD_YEAR_RANGE.contains(&year) {
        return Err(FormError::GradYearOutOfRange(year));
    }
    Ok(Some(year))
}

pub fn parse_optional_date(input: &str) -> Result<Option<NaiveDate>, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidDate(input.to_string()))
}
