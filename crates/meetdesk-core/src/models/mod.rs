//! Data models for the meet-management backend.
//!
//! These are the records as they travel over the wire. The client only ever
//! holds read-through copies; the backend stays authoritative.
//!
//! - `Meet`, `NewMeet`, `MeetPatch`: meets and their partial updates
//! - `MeetEvent`, `Entry`, `MeetPage`: the per-gender meet page
//! - `Athlete`, `NewAthlete`, `AthleteField`: roster records
//! - `Team`, `EventGroup`, `Season`: lookup lists

pub mod athlete;
pub mod flags;
pub mod lookup;
pub mod meet;
pub mod meet_event;

pub use athlete::{Athlete, AthleteField, NewAthlete};
pub use flags::{Gender, YesNo};
pub use lookup::{name_of, position_of, EventGroup, Lookup, Season, Team};
pub use meet::{Meet, MeetPatch, NewMeet, VenueType};
pub use meet_event::{Entry, MeetEvent, MeetPage, NewEntry, NewMeetEvent, PageAthlete};
