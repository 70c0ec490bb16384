use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a meet is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Indoor,
    Outdoor,
    Both,
}

impl VenueType {
    pub fn label(&self) -> &'static str {
        match self {
            VenueType::Indoor => "Indoor",
            VenueType::Outdoor => "Outdoor",
            VenueType::Both => "Indoor/Outdoor",
        }
    }

    /// Cycle used by the meet form's venue picker. `None` means unset.
    pub fn cycle(current: Option<VenueType>) -> Option<VenueType> {
        match current {
            None => Some(VenueType::Outdoor),
            Some(VenueType::Outdoor) => Some(VenueType::Indoor),
            Some(VenueType::Indoor) => Some(VenueType::Both),
            Some(VenueType::Both) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meet {
    pub meet_id: i64,
    pub name: String,
    #[serde(default)]
    pub meet_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub venue_type: Option<VenueType>,
    #[serde(default)]
    pub is_varsity: bool,
    #[serde(default)]
    pub season_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
}

impl Meet {
    /// Second line of a meet list row: location and date.
    pub fn subtitle(&self) -> String {
        let location = self
            .location
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or("—");
        match self.meet_date {
            Some(date) => format!("{} • {}", location, date.format("%Y-%m-%d")),
            None => location.to_string(),
        }
    }

    /// Label for the archive toggle given the current flag.
    pub fn archive_action_label(&self) -> &'static str {
        if self.is_archived {
            "Unarchive"
        } else {
            "Archive"
        }
    }
}

/// Body of `POST /api/meets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewMeet {
    pub name: String,
    pub is_varsity: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<VenueType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewMeet {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body of `PATCH /api/meets/{id}`. Only the fields that are `Some` are sent.
///
/// Nullable columns are doubly optional: `Some(None)` sends `null` and clears
/// the value on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_varsity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<Option<VenueType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl MeetPatch {
    pub fn archived(is_archived: bool) -> Self {
        Self {
            is_archived: Some(is_archived),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
