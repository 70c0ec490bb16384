use std::collections::{HashMap, HashSet};

use crate::models::{Gender, Meet, MeetEvent, MeetPage, PageAthlete};

/// Athlete ids entered in the selected meet event.
///
/// Empty when nothing is selected or when the selected id is not on the page
/// (e.g. the event was removed elsewhere). Neither case is an error.
pub fn selected_athlete_ids(events: &[MeetEvent], selected: Option<i64>) -> HashSet<i64> {
    let Some(selected) = selected else {
        return HashSet::new();
    };
    events
        .iter()
        .find(|me| me.meet_event_id == selected)
        .map(|me| me.entries.iter().map(|e| e.athlete_id).collect())
        .unwrap_or_default()
}

/// Number of meet events each athlete is entered in.
///
/// An athlete listed twice in the same event still counts once for it.
pub fn entry_counts(events: &[MeetEvent]) -> HashMap<i64, usize> {
    events.iter().fold(HashMap::new(), |mut counts, me| {
        let distinct: HashSet<i64> = me.entries.iter().map(|e| e.athlete_id).collect();
        for athlete_id in distinct {
            *counts.entry(athlete_id).or_insert(0) += 1;
        }
        counts
    })
}

/// Meets that belong in the default list. The backend already hides archived
/// meets; this keeps that true even when it does not.
pub fn visible_meets(meets: Vec<Meet>) -> Vec<Meet> {
    meets.into_iter().filter(|m| !m.is_archived).collect()
}

/// Everything the meet screen renders for one loaded page.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetPageView {
    pub page: MeetPage,
    pub gender: Gender,
    entry_counts: HashMap<i64, usize>,
}

impl MeetPageView {
    pub fn derive(page: MeetPage, gender: Gender) -> Self {
        let entry_counts = entry_counts(&page.meet_events);
        Self {
            page,
            gender,
            entry_counts,
        }
    }

    pub fn meet(&self) -> &Meet {
        &self.page.meet
    }

    pub fn events(&self) -> &[MeetEvent] {
        &self.page.meet_events
    }

    pub fn athletes(&self) -> &[PageAthlete] {
        &self.page.athletes
    }

    pub fn event(&self, meet_event_id: i64) -> Option<&MeetEvent> {
        self.events().iter().find(|me| me.meet_event_id == meet_event_id)
    }

    pub fn entry_count(&self, athlete_id: i64) -> usize {
        self.entry_counts.get(&athlete_id).copied().unwrap_or(0)
    }

    /// Projection of `selected` onto this page's entries.
    pub fn selected_athlete_ids(&self, selected: Option<i64>) -> HashSet<i64> {
        selected_athlete_ids(self.events(), selected)
    }
}
