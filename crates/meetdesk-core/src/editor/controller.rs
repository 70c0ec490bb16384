//! Meet editor controller.
//!
//! Owns the `EditorState` for one open meet and the last loaded page. Every
//! transition that changes server data or the selection ends in
//! `load_meet_page()`, so the view is never more than one round-trip behind
//! the backend.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::api::{ApiError, MeetBackend};
use crate::cache::{SeasonCache, Snapshot};
use crate::models::{Gender, Meet, MeetPage, MeetPatch, NewMeet, NewMeetEvent, Season};

use super::{
    derive::visible_meets, EditorError, EditorState, MeetPageView, MeetPhase, PageRequest,
    RequestSeq,
};

/// Result of clicking an athlete while an event is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddEntryOutcome {
    Added,
    /// Already entered in the selected event; nothing was sent.
    AlreadyEntered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// The meet was archived and the editor closed.
    Archived,
    Unarchived,
}

pub struct MeetEditor<B: MeetBackend> {
    backend: B,
    state: EditorState,
    meets: Snapshot<Vec<Meet>>,
    view: Option<Snapshot<MeetPageView>>,
    seasons: SeasonCache,
    seq: RequestSeq,
    status: Option<String>,
}

impl<B: MeetBackend> MeetEditor<B> {
    pub fn new(backend: B, gender: Gender) -> Self {
        Self {
            backend,
            state: EditorState::new(gender),
            meets: Snapshot::new(Vec::new()),
            view: None,
            seasons: SeasonCache::new(),
            seq: RequestSeq::default(),
            status: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn meets(&self) -> &[Meet] {
        &self.meets.data
    }

    pub fn meets_snapshot(&self) -> &Snapshot<Vec<Meet>> {
        &self.meets
    }

    /// The last applied page, if it belongs to the open meet.
    pub fn view(&self) -> Option<&MeetPageView> {
        self.view.as_ref().map(|s| &s.data)
    }

    pub fn view_snapshot(&self) -> Option<&Snapshot<MeetPageView>> {
        self.view.as_ref()
    }

    /// Transient "loading…" text while a call is in flight.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Athletes entered in the selected event, derived from the loaded page.
    pub fn selected_athlete_ids(&self) -> HashSet<i64> {
        self.view()
            .map(|v| v.selected_athlete_ids(self.state.selected_meet_event_id))
            .unwrap_or_default()
    }

    // =========================================================================
    // Meet list
    // =========================================================================

    pub async fn load_meets(&mut self) -> Result<(), EditorError> {
        self.status = Some("loading meets…".to_string());
        let result = self.backend.list_meets().await;
        self.status = None;

        let meets = visible_meets(result?);
        debug!(count = meets.len(), "Meets loaded");
        self.meets = Snapshot::new(meets);
        Ok(())
    }

    pub async fn create_meet(&mut self, meet: NewMeet) -> Result<Meet, EditorError> {
        self.status = Some("creating meet…".to_string());
        let result = self.backend.create_meet(&meet).await;
        self.status = None;

        let created = result?;
        info!(meet_id = created.meet_id, name = %created.name, "Meet created");
        self.load_meets().await?;
        self.open_meet(created.meet_id).await?;
        Ok(created)
    }

    // =========================================================================
    // Page loading
    // =========================================================================

    /// Switch the editor to `meet_id` and load its page.
    pub async fn open_meet(&mut self, meet_id: i64) -> Result<(), EditorError> {
        debug!(meet_id, "Opening meet");
        self.state.open(meet_id);
        self.view = None;
        self.load_meet_page().await
    }

    /// Issue a ticket for a page load of the current meet and gender.
    /// Returns `None` when no meet is open.
    pub fn begin_page_load(&mut self) -> Option<PageRequest> {
        let meet_id = self.state.current_meet_id?;
        self.status = Some("loading meet…".to_string());
        Some(PageRequest {
            ticket: self.seq.next(),
            meet_id,
            gender: self.state.current_gender,
        })
    }

    /// Apply the response for `request`. Responses for anything but the newest
    /// request are dropped and `Ok(false)` is returned.
    pub fn finish_page_load(
        &mut self,
        request: PageRequest,
        response: Result<MeetPage, ApiError>,
    ) -> Result<bool, EditorError> {
        if !self.seq.is_current(request.ticket) {
            debug!(
                meet_id = request.meet_id,
                ticket = ?request.ticket,
                "Discarding stale page response"
            );
            return Ok(false);
        }
        self.status = None;

        let page = response?;
        if self.state.current_meet_id != Some(request.meet_id) {
            // Meet was closed while the request was out.
            return Ok(false);
        }

        self.state.current_meet = Some(page.meet.clone());
        self.state.phase = MeetPhase::MeetLoaded;
        if let Some(selected) = self.state.selected_meet_event_id {
            if !page.meet_events.iter().any(|me| me.meet_event_id == selected) {
                debug!(selected, "Selected meet event not on page");
            }
        }
        self.view = Some(Snapshot::new(MeetPageView::derive(page, request.gender)));
        Ok(true)
    }

    /// Refetch the whole page for the open meet and re-derive everything.
    /// Does nothing when no meet is open.
    pub async fn load_meet_page(&mut self) -> Result<(), EditorError> {
        let Some(request) = self.begin_page_load() else {
            return Ok(());
        };
        let response = self
            .backend
            .fetch_meet_page(request.meet_id, request.gender)
            .await;
        self.finish_page_load(request, response).map(|_| ())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub async fn select_event(&mut self, meet_event_id: i64) -> Result<(), EditorError> {
        self.require_meet()?;
        self.state.selected_meet_event_id = Some(meet_event_id);
        self.load_meet_page().await
    }

    pub async fn clear_event_selection(&mut self) -> Result<(), EditorError> {
        self.require_meet()?;
        self.state.selected_meet_event_id = None;
        self.load_meet_page().await
    }

    /// Switch the gender partition. The event selection never carries over.
    pub async fn switch_gender(&mut self, gender: Gender) -> Result<(), EditorError> {
        self.state.selected_meet_event_id = None;
        self.state.current_gender = if gender.is_partition() {
            gender
        } else {
            Gender::Male
        };
        self.load_meet_page().await
    }

    pub async fn toggle_gender(&mut self) -> Result<(), EditorError> {
        let next = self.state.current_gender.toggled();
        self.switch_gender(next).await
    }

    // =========================================================================
    // Entries
    // =========================================================================

    /// Enter `athlete_id` in the selected event, then reload.
    ///
    /// A failed create still reloads before the error is returned.
    pub async fn add_entry(&mut self, athlete_id: i64) -> Result<AddEntryOutcome, EditorError> {
        self.require_meet()?;
        let meet_event_id = self
            .state
            .selected_meet_event_id
            .ok_or(EditorError::NoEventSelected)?;

        if self.selected_athlete_ids().contains(&athlete_id) {
            debug!(meet_event_id, athlete_id, "Athlete already entered, skipping");
            return Ok(AddEntryOutcome::AlreadyEntered);
        }

        self.status = Some("adding entry…".to_string());
        let created = self.backend.add_entry(meet_event_id, athlete_id).await;
        if let Err(ref e) = created {
            warn!(meet_event_id, athlete_id, error = %e, "Add entry failed");
        }
        self.reload_after(created).await?;
        Ok(AddEntryOutcome::Added)
    }

    pub async fn remove_entry(
        &mut self,
        meet_event_id: i64,
        athlete_id: i64,
    ) -> Result<(), EditorError> {
        self.require_meet()?;
        self.status = Some("removing entry…".to_string());
        let removed = self.backend.remove_entry(meet_event_id, athlete_id).await;
        if let Err(ref e) = removed {
            warn!(meet_event_id, athlete_id, error = %e, "Remove entry failed");
        }
        self.reload_after(removed).await
    }

    // =========================================================================
    // Meet events
    // =========================================================================

    /// Add an event to the open meet for the current gender. `sort_order`
    /// defaults to the end of the current list.
    pub async fn add_meet_event(
        &mut self,
        event_id: i64,
        sort_order: Option<i64>,
    ) -> Result<(), EditorError> {
        let meet_id = self.require_meet()?;
        let sort_order = sort_order.unwrap_or_else(|| self.next_sort_order());
        let event = NewMeetEvent {
            event_id,
            gender: self.state.current_gender,
            sort_order,
        };

        self.status = Some("adding event…".to_string());
        let created = self.backend.add_meet_event(meet_id, &event).await;
        if let Err(ref e) = created {
            warn!(meet_id, event_id, error = %e, "Add meet event failed");
        }
        self.reload_after(created).await
    }

    fn next_sort_order(&self) -> i64 {
        self.view()
            .and_then(|v| v.events().iter().map(|me| me.sort_order).max())
            .map(|max| max + 1)
            .unwrap_or(0)
    }

    // =========================================================================
    // Meet updates
    // =========================================================================

    /// Send a partial update for the open meet, refresh the list and reload.
    pub async fn update_meet(&mut self, patch: MeetPatch) -> Result<(), EditorError> {
        let meet_id = self.require_meet()?;
        if patch.is_empty() {
            return Ok(());
        }

        self.status = Some("saving meet…".to_string());
        let updated = self.backend.update_meet(meet_id, &patch).await;
        match updated {
            Ok(meet) => {
                self.state.current_meet = Some(meet);
                self.load_meets().await?;
                self.load_meet_page().await
            }
            Err(e) => {
                warn!(meet_id, error = %e, "Meet update failed");
                self.reload_after(Err(e)).await
            }
        }
    }

    /// Flip the archived flag of the open meet.
    ///
    /// Archiving closes the editor: the meet leaves the default list, so no
    /// meet-scoped state may survive.
    pub async fn toggle_archive(&mut self) -> Result<ArchiveOutcome, EditorError> {
        let meet_id = self.require_meet()?;
        let currently_archived = self
            .state
            .current_meet
            .as_ref()
            .map(|m| m.is_archived)
            .ok_or(EditorError::NoMeetSelected)?;
        let next_archived = !currently_archived;

        self.status = Some(if next_archived { "archive…" } else { "unarchive…" }.to_string());
        let result = self
            .backend
            .update_meet(meet_id, &MeetPatch::archived(next_archived))
            .await;
        self.status = None;
        let updated = result?;
        self.state.current_meet = Some(updated);

        self.load_meets().await?;

        if next_archived {
            info!(meet_id, "Meet archived, closing editor");
            self.close_meet();
            Ok(ArchiveOutcome::Archived)
        } else {
            info!(meet_id, "Meet unarchived");
            self.load_meet_page().await?;
            Ok(ArchiveOutcome::Unarchived)
        }
    }

    /// Tear down all meet-scoped state.
    pub fn close_meet(&mut self) {
        self.state.close();
        self.view = None;
        // Invalidate any load still in flight for the closed meet.
        self.seq.next();
        self.status = None;
    }

    // =========================================================================
    // Seasons
    // =========================================================================

    pub async fn seasons(&mut self) -> Result<&[Season], EditorError> {
        Ok(self.seasons.get_or_fetch(&self.backend).await?)
    }

    /// Seasons if they were already fetched this session.
    pub fn cached_seasons(&self) -> &[Season] {
        self.seasons.cached().unwrap_or_default()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn require_meet(&self) -> Result<i64, EditorError> {
        self.state.current_meet_id.ok_or(EditorError::NoMeetSelected)
    }

    /// Reload after a mutation whatever its outcome. The mutation's error wins
    /// over a reload error.
    async fn reload_after(&mut self, mutation: Result<(), ApiError>) -> Result<(), EditorError> {
        let reload = self.load_meet_page().await;
        mutation?;
        reload
    }
}
