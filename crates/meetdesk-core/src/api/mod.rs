//! REST API access for the meet-management backend.
//!
//! `ApiClient` is the reqwest implementation. The editors only see the
//! `MeetBackend` and `RosterBackend` traits so they can be driven by an
//! in-memory backend in tests.

pub mod backend;
pub mod client;
pub mod error;

pub use backend::{MeetBackend, RosterBackend};
pub use client::ApiClient;
pub use error::{ApiError, GENERIC_FAILURE_MESSAGE};
