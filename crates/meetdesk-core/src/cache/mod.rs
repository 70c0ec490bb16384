//! In-memory snapshots of server data.
//!
//! Nothing here is persisted. A `Snapshot` remembers when it was fetched so
//! the status bar can say how old the view is, and `SeasonCache` keeps the
//! season list for the lifetime of the process.

pub mod seasons;
pub mod snapshot;

pub use seasons::SeasonCache;
pub use snapshot::Snapshot;
