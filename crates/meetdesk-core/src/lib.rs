//! meetdesk core library.
//!
//! Client-side logic for a track-and-field meet and roster backend:
//!
//! - `api`: REST client and the backend traits the editors depend on
//! - `models`: wire records (meets, meet events, entries, athletes, lookups)
//! - `editor`: the meet editor controller and its derived views
//! - `roster`: the athlete roster controller and form validation
//! - `cache`: in-memory snapshots and the session-long season cache
//! - `config`: persisted user configuration

pub mod api;
pub mod cache;
pub mod config;
pub mod editor;
pub mod models;
pub mod roster;
pub mod utils;

pub use api::{ApiClient, ApiError, MeetBackend, RosterBackend};
pub use config::Config;
pub use editor::{EditorError, MeetEditor};
pub use roster::RosterEditor;
