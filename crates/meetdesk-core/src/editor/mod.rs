//! Meet editor: state, derived views, and the reload-after-every-change
//! controller.
//!
//! The controller never patches entry lists locally. Every change is sent to
//! the backend and followed by a full page reload, and everything the screen
//! shows (selected athletes, entry counts) is derived from that page.

pub mod controller;
pub mod derive;
pub mod error;
pub mod state;

pub use controller::{AddEntryOutcome, ArchiveOutcome, MeetEditor};
pub use derive::{entry_counts, selected_athlete_ids, visible_meets, MeetPageView};
pub use error::EditorError;
pub use state::{EditorState, EventSelection, MeetPhase, PageRequest, RequestSeq, Ticket};
