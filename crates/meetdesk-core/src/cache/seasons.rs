use tracing::debug;

use crate::api::{ApiError, MeetBackend};
use crate::models::Season;

use super::Snapshot;

/// Season list fetched once and reused until the process exits.
///
/// Failed fetches are not cached, so the next caller tries again.
#[derive(Debug, Default)]
pub struct SeasonCache {
    seasons: Option<Snapshot<Vec<Season>>>,
}

impl SeasonCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self) -> Option<&[Season]> {
        self.seasons.as_ref().map(|s| s.data.as_slice())
    }

    pub async fn get_or_fetch<B: MeetBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<&[Season], ApiError> {
        if self.seasons.is_none() {
            let seasons = backend.list_seasons().await?;
            debug!(count = seasons.len(), "Seasons cached");
            self.seasons = Some(Snapshot::new(seasons));
        }
        Ok(self.cached().unwrap_or_default())
    }
}
