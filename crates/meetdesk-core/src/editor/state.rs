use crate::models::{Gender, Meet};

/// Top-level phase of the meet editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetPhase {
    NoMeetSelected,
    MeetLoading,
    MeetLoaded,
}

/// Nested selection inside a loaded meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSelection {
    NoEventSelected,
    EventSelected(i64),
}

impl EventSelection {
    pub fn id(&self) -> Option<i64> {
        match self {
            EventSelection::NoEventSelected => None,
            EventSelection::EventSelected(id) => Some(*id),
        }
    }
}

impl From<Option<i64>> for EventSelection {
    fn from(id: Option<i64>) -> Self {
        match id {
            Some(id) => EventSelection::EventSelected(id),
            None => EventSelection::NoEventSelected,
        }
    }
}

/// View state for the open meet. Rebuilt from the server on every reload;
/// only the controller's transition methods mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub current_meet_id: Option<i64>,
    pub current_gender: Gender,
    pub selected_meet_event_id: Option<i64>,
    pub current_meet: Option<Meet>,
    pub phase: MeetPhase,
}

impl EditorState {
    pub fn new(gender: Gender) -> Self {
        Self {
            current_meet_id: None,
            current_gender: if gender.is_partition() {
                gender
            } else {
                Gender::Male
            },
            selected_meet_event_id: None,
            current_meet: None,
            phase: MeetPhase::NoMeetSelected,
        }
    }

    pub fn selection(&self) -> EventSelection {
        self.selected_meet_event_id.into()
    }

    pub(crate) fn open(&mut self, meet_id: i64) {
        self.current_meet_id = Some(meet_id);
        self.selected_meet_event_id = None;
        self.current_meet = None;
        self.phase = MeetPhase::MeetLoading;
    }

    /// Drop everything scoped to the open meet.
    pub(crate) fn close(&mut self) {
        self.current_meet_id = None;
        self.selected_meet_event_id = None;
        self.current_meet = None;
        self.phase = MeetPhase::NoMeetSelected;
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Gender::Male)
    }
}

/// Identifies one page load. Only the newest ticket may update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic counter handing out page-load tickets.
#[derive(Debug, Default)]
pub struct RequestSeq {
    issued: u64,
}

impl RequestSeq {
    pub fn next(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}

/// A page load that has been issued but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: Ticket,
    pub meet_id: i64,
    pub gender: Gender,
}
