use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use super::{Gender, YesNo};

/// Roster record from `GET /api/athletes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub athlete_id: i64,
    #[serde(default)]
    pub org_id: Option<i64>,
    pub team_id: i64,
    pub event_group_id: i64,
    #[serde(default)]
    pub varsity_yn: YesNo,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    #[serde(default = "yes")]
    pub available_yn: YesNo,
    /// Stored by the backend as free text; anything that is not a
    /// `YYYY-MM-DD` date reads as unset.
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    pub expected_return: Option<NaiveDate>,
    #[serde(default)]
    pub grad_year: Option<i32>,
    #[serde(default = "yes")]
    pub is_active: YesNo,
}

fn yes() -> YesNo {
    YesNo::Yes
}

fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(text) = raw.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(_) => {
            warn!(value = text, "Ignoring expected_return that is not a date");
            Ok(None)
        }
    }
}

impl Athlete {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    pub fn is_active(&self) -> bool {
        self.is_active.is_yes()
    }

    /// Apply a field update locally. Used to mirror a successful PATCH when
    /// the response body is the updated record.
    pub fn apply(&mut self, field: &AthleteField) {
        match field {
            AthleteField::Team(id) => self.team_id = *id,
            AthleteField::EventGroup(id) => self.event_group_id = *id,
            AthleteField::Varsity(v) => self.varsity_yn = *v,
            AthleteField::FirstName(name) => self.first_name = name.clone(),
            AthleteField::LastName(name) => self.last_name = name.clone(),
            AthleteField::Gender(g) => self.gender = *g,
            AthleteField::Available(v) => self.available_yn = *v,
            AthleteField::ExpectedReturn(date) => self.expected_return = *date,
            AthleteField::GradYear(year) => self.grad_year = *year,
            AthleteField::Active(v) => self.is_active = *v,
        }
    }
}

/// Body of `POST /api/athletes`. Built by the roster form after local
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAthlete {
    pub team_id: i64,
    pub event_group_id: i64,
    pub varsity_yn: YesNo,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub available_yn: YesNo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_return: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grad_year: Option<i32>,
}

/// A single-field roster update. The inline editor patches one field at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum AthleteField {
    Team(i64),
    EventGroup(i64),
    Varsity(YesNo),
    FirstName(String),
    LastName(String),
    Gender(Gender),
    Available(YesNo),
    ExpectedReturn(Option<NaiveDate>),
    GradYear(Option<i32>),
    Active(YesNo),
}

impl AthleteField {
    /// Wire name of the field.
    pub fn key(&self) -> &'static str {
        match self {
            AthleteField::Team(_) => "team_id",
            AthleteField::EventGroup(_) => "event_group_id",
            AthleteField::Varsity(_) => "varsity_yn",
            AthleteField::FirstName(_) => "first_name",
            AthleteField::LastName(_) => "last_name",
            AthleteField::Gender(_) => "gender",
            AthleteField::Available(_) => "available_yn",
            AthleteField::ExpectedReturn(_) => "expected_return",
            AthleteField::GradYear(_) => "grad_year",
            AthleteField::Active(_) => "is_active",
        }
    }

    /// `{ "<field>": value }` body for `PATCH /api/athletes/{id}`.
    pub fn to_body(&self) -> Value {
        let value = match self {
            AthleteField::Team(id) | AthleteField::EventGroup(id) => json!(id),
            AthleteField::Varsity(v) | AthleteField::Available(v) | AthleteField::Active(v) => {
                json!(v)
            }
            AthleteField::FirstName(name) | AthleteField::LastName(name) => json!(name.trim()),
            AthleteField::Gender(g) => json!(g),
            AthleteField::ExpectedReturn(date) => json!(date),
            AthleteField::GradYear(year) => json!(year),
        };
        let mut body = serde_json::Map::new();
        body.insert(self.key().to_string(), value);
        Value::Object(body)
    }
}
