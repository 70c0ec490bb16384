use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: i64,
    #[serde(default)]
    pub org_id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGroup {
    pub event_group_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub season_id: i64,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub discipline: Option<String>,
}

impl Season {
    pub fn label(&self) -> String {
        match (self.year, self.discipline.as_deref()) {
            (Some(year), Some(discipline)) => format!("{} {} ({})", year, self.name, discipline),
            (Some(year), None) => format!("{} {}", year, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Id/name pair shared by the lookup lists shown in pickers.
pub trait Lookup {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

impl Lookup for Team {
    fn id(&self) -> i64 {
        self.team_id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Lookup for EventGroup {
    fn id(&self) -> i64 {
        self.event_group_id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Lookup for Season {
    fn id(&self) -> i64 {
        self.season_id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Name for `id` in a lookup list, or `"?"` when the id is unknown.
pub fn name_of<T: Lookup>(items: &[T], id: i64) -> &str {
    items
        .iter()
        .find(|item| item.id() == id)
        .map(|item| item.name())
        .unwrap_or("?")
}

/// Position of `id` in a lookup list, used to step pickers.
pub fn position_of<T: Lookup>(items: &[T], id: i64) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_label() {
        let season = Season {
            season_id: 1,
            name: "Spring".to_string(),
            year: Some(2026),
            discipline: Some("Outdoor".to_string()),
        };
        assert_eq!(season.label(), "2026 Spring (Outdoor)");
    }

    #[test]
    fn test_name_of() {
        let teams = vec![
            Team { team_id: 1, org_id: Some(1), name: "Varsity".to_string() },
            Team { team_id: 2, org_id: Some(1), name: "JV".to_string() },
        ];
        assert_eq!(name_of(&teams, 2), "JV");
        assert_eq!(name_of(&teams, 9), "?");
        assert_eq!(position_of(&teams, 2), Some(1));
    }
}
