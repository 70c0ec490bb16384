use serde::{Deserialize, Serialize};

/// Gender code used for athletes and for partitioning meet events.
///
/// Meet events are only ever partitioned into `Male` and `Female`; `Other`
/// exists because the roster accepts `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "X")]
    Other,
}

impl Gender {
    /// The two values meet events are split along.
    pub const PARTITIONS: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "X",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            c if c.eq_ignore_ascii_case("m") => Some(Gender::Male),
            c if c.eq_ignore_ascii_case("f") => Some(Gender::Female),
            c if c.eq_ignore_ascii_case("x") => Some(Gender::Other),
            _ => None,
        }
    }

    /// Label used on the meet editor's gender tabs.
    pub fn partition_label(&self) -> &'static str {
        match self {
            Gender::Male => "Boys",
            Gender::Female => "Girls",
            Gender::Other => "Open",
        }
    }

    pub fn is_partition(&self) -> bool {
        Self::PARTITIONS.contains(self)
    }

    /// The other meet partition. `Other` maps to `Male` so a toggle always
    /// lands on a valid partition.
    pub fn toggled(&self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female | Gender::Other => Gender::Male,
        }
    }

    /// Cycle through all three roster codes.
    pub fn next(&self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Other,
            Gender::Other => Gender::Male,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// `"Y"` / `"N"` flag as stored by the roster backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum YesNo {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }

    pub fn flipped(&self) -> Self {
        match self {
            YesNo::Yes => YesNo::No,
            YesNo::No => YesNo::Yes,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            YesNo::Yes => "Y",
            YesNo::No => "N",
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}
