mod common;

use common::InMemoryBackend;
use meetdesk_core::api::MeetBackend;
use meetdesk_core::editor::{
    AddEntryOutcome, ArchiveOutcome, EditorError, EventSelection, MeetEditor, MeetPhase,
};
use meetdesk_core::models::{Gender, MeetPatch, NewMeet};

fn roster() -> InMemoryBackend {
    InMemoryBackend::new()
        .with_athlete(41, "Ada", "Runner", Gender::Male)
        .with_athlete(42, "Ben", "Sprinter", Gender::Male)
        .with_athlete(43, "Cy", "Jumper", Gender::Male)
        .with_athlete(51, "Dee", "Hurdler", Gender::Female)
}

/// Meet 1 with three boys' events: 10 = {41, 42}, 11 = {42}, 12 = {}.
fn overlapping_meet() -> InMemoryBackend {
    roster()
        .with_meet(1, "Dual Meet", false)
        .with_meet_event(1, 10, Gender::Male, &[41, 42])
        .with_meet_event(1, 11, Gender::Male, &[42])
        .with_meet_event(1, 12, Gender::Male, &[])
        .with_meet_event(1, 20, Gender::Female, &[51])
}

#[tokio::test]
async fn test_create_open_add_event_and_entry() {
    let backend = roster();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);

    let mut new_meet = NewMeet::named("Invitational");
    new_meet.is_varsity = true;
    let meet = editor.create_meet(new_meet).await.expect("create meet");

    assert!(editor.meets().iter().any(|m| m.meet_id == meet.meet_id));
    assert_eq!(editor.state().current_meet_id, Some(meet.meet_id));
    assert_eq!(editor.state().phase, MeetPhase::MeetLoaded);
    assert!(editor.state().current_meet.as_ref().map(|m| m.is_varsity).unwrap_or(false));

    editor.add_meet_event(7, None).await.expect("add meet event");
    let meet_event_id = {
        let view = editor.view().expect("page loaded");
        assert_eq!(view.events().len(), 1);
        assert_eq!(view.events()[0].event_id, Some(7));
        assert_eq!(view.events()[0].gender, Some(Gender::Male));
        assert_eq!(view.events()[0].sort_order, 0);
        view.events()[0].meet_event_id
    };

    editor.select_event(meet_event_id).await.expect("select event");
    assert_eq!(
        editor.state().selection(),
        EventSelection::EventSelected(meet_event_id)
    );

    let outcome = editor.add_entry(42).await.expect("add entry");
    assert_eq!(outcome, AddEntryOutcome::Added);

    let view = editor.view().expect("page reloaded");
    assert_eq!(view.events().len(), 1);
    let entered: Vec<i64> = view.events()[0].entries.iter().map(|e| e.athlete_id).collect();
    assert_eq!(entered, vec![42]);
    assert!(editor.selected_athlete_ids().contains(&42));
    assert_eq!(editor.selected_athlete_ids().len(), 1);
    assert_eq!(view.entry_count(42), 1);
}

#[tokio::test]
async fn test_selected_set_matches_selected_event() {
    let mut editor = MeetEditor::new(overlapping_meet(), Gender::Male);
    editor.open_meet(1).await.expect("open");
    assert!(editor.selected_athlete_ids().is_empty());

    editor.select_event(10).await.expect("select 10");
    let ids = editor.selected_athlete_ids();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&41) && ids.contains(&42));

    editor.select_event(12).await.expect("select 12");
    assert!(editor.selected_athlete_ids().is_empty());

    // Unknown id is not an error, just an empty projection.
    editor.select_event(999).await.expect("select missing");
    assert!(editor.selected_athlete_ids().is_empty());

    editor.clear_event_selection().await.expect("clear");
    assert_eq!(editor.state().selection(), EventSelection::NoEventSelected);
}

#[tokio::test]
async fn test_entry_counts_fold_over_events() {
    let mut editor = MeetEditor::new(overlapping_meet(), Gender::Male);
    editor.open_meet(1).await.expect("open");

    let view = editor.view().expect("view");
    assert_eq!(view.entry_count(41), 1);
    assert_eq!(view.entry_count(42), 2);
    assert_eq!(view.entry_count(43), 0);
    // Girls' events are not on the boys' page.
    assert_eq!(view.entry_count(51), 0);
}

#[tokio::test]
async fn test_add_entry_already_entered_sends_nothing() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");
    editor.select_event(10).await.expect("select");

    let before = backend.calls().len();
    let outcome = editor.add_entry(41).await.expect("no-op");
    assert_eq!(outcome, AddEntryOutcome::AlreadyEntered);
    assert_eq!(backend.calls().len(), before);
    assert_eq!(backend.count("add_entry"), 0);
}

#[tokio::test]
async fn test_add_entry_requires_selected_event() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);

    let err = editor.add_entry(41).await.expect_err("no meet");
    assert!(matches!(err, EditorError::NoMeetSelected));

    editor.open_meet(1).await.expect("open");
    let err = editor.add_entry(43).await.expect_err("no event");
    assert!(matches!(err, EditorError::NoEventSelected));
    assert_eq!(err.user_message(), "Click an event first.");
    assert_eq!(backend.count("add_entry"), 0);
}

#[tokio::test]
async fn test_failed_add_entry_still_reloads() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");
    editor.select_event(11).await.expect("select");

    let loads_before = backend.count("fetch_meet_page");
    backend.fail_next("add_entry", "meet is locked");
    let err = editor.add_entry(43).await.expect_err("server refused");

    assert_eq!(err.user_message(), "meet is locked");
    assert_eq!(backend.count("fetch_meet_page"), loads_before + 1);
    assert!(!editor.selected_athlete_ids().contains(&43));
    assert_eq!(editor.state().selected_meet_event_id, Some(11));
}

#[tokio::test]
async fn test_remove_entry_reloads() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");
    editor.select_event(10).await.expect("select");

    editor.remove_entry(10, 42).await.expect("remove");
    let ids = editor.selected_athlete_ids();
    assert!(ids.contains(&41));
    assert!(!ids.contains(&42));
    assert_eq!(editor.view().expect("view").entry_count(42), 1);
}

#[tokio::test]
async fn test_failed_remove_entry_still_reloads() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");
    editor.select_event(10).await.expect("select");

    let loads_before = backend.count("fetch_meet_page");
    backend.fail_next("remove_entry", "entry is locked");
    let err = editor.remove_entry(10, 42).await.expect_err("server refused");

    assert_eq!(err.user_message(), "entry is locked");
    assert_eq!(backend.count("fetch_meet_page"), loads_before + 1);
    assert!(editor.selected_athlete_ids().contains(&42));
    assert_eq!(editor.view().expect("view").entry_count(42), 2);
}

#[tokio::test]
async fn test_gender_switch_resets_selection() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");
    editor.select_event(10).await.expect("select");

    editor.toggle_gender().await.expect("switch");
    assert_eq!(editor.state().current_gender, Gender::Female);
    assert_eq!(editor.state().selection(), EventSelection::NoEventSelected);
    assert!(editor.selected_athlete_ids().is_empty());

    let view = editor.view().expect("girls page");
    assert_eq!(view.gender, Gender::Female);
    assert_eq!(view.events().len(), 1);
    assert_eq!(view.events()[0].meet_event_id, 20);
}

#[tokio::test]
async fn test_archive_closes_editor_and_hides_meet() {
    let backend = overlapping_meet().with_meet(2, "Relays", false);
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.load_meets().await.expect("list");
    assert_eq!(editor.meets().len(), 2);

    editor.open_meet(1).await.expect("open");
    editor.select_event(10).await.expect("select");

    let outcome = editor.toggle_archive().await.expect("archive");
    assert_eq!(outcome, ArchiveOutcome::Archived);
    assert_eq!(editor.state().current_meet_id, None);
    assert_eq!(editor.state().selected_meet_event_id, None);
    assert_eq!(editor.state().current_meet, None);
    assert_eq!(editor.state().phase, MeetPhase::NoMeetSelected);
    assert!(editor.view().is_none());
    assert!(editor.selected_athlete_ids().is_empty());
    assert!(editor.meets().iter().all(|m| m.meet_id != 1));

    editor.load_meets().await.expect("list again");
    assert!(editor.meets().iter().all(|m| m.meet_id != 1));
}

#[tokio::test]
async fn test_unarchive_keeps_meet_open() {
    let backend = roster().with_meet(3, "Old Meet", true);
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(3).await.expect("open archived");

    let outcome = editor.toggle_archive().await.expect("unarchive");
    assert_eq!(outcome, ArchiveOutcome::Unarchived);
    assert_eq!(editor.state().current_meet_id, Some(3));
    assert!(editor.meets().iter().any(|m| m.meet_id == 3));
    assert!(!editor.view().expect("view").meet().is_archived);
}

#[tokio::test]
async fn test_archived_meets_never_listed() {
    let backend = roster()
        .with_meet(1, "Live", false)
        .with_meet(2, "Gone", true);
    backend.lock().leak_archived = true;

    let mut editor = MeetEditor::new(backend, Gender::Male);
    editor.load_meets().await.expect("list");
    let ids: Vec<i64> = editor.meets().iter().map(|m| m.meet_id).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_update_meet_refreshes_list_and_page() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.load_meets().await.expect("list");
    editor.open_meet(1).await.expect("open");

    let patch = MeetPatch {
        name: Some("County Championship".to_string()),
        ..MeetPatch::default()
    };
    editor.update_meet(patch).await.expect("update");
    assert_eq!(editor.meets()[0].name, "County Championship");
    assert_eq!(editor.view().expect("view").meet().name, "County Championship");

    let calls = backend.count("update_meet");
    editor.update_meet(MeetPatch::default()).await.expect("empty patch");
    assert_eq!(backend.count("update_meet"), calls);
}

#[tokio::test]
async fn test_failed_update_meet_reloads() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");

    let loads = backend.count("fetch_meet_page");
    backend.fail_next("update_meet", "name is required");
    let err = editor
        .update_meet(MeetPatch {
            name: Some(String::new()),
            ..MeetPatch::default()
        })
        .await
        .expect_err("refused");
    assert_eq!(err.user_message(), "name is required");
    assert_eq!(backend.count("fetch_meet_page"), loads + 1);
    assert_eq!(editor.view().expect("view").meet().name, "Dual Meet");
}

#[tokio::test]
async fn test_update_meet_clears_optional_fields() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");
    editor
        .update_meet(MeetPatch {
            location: Some(Some("Memorial Field".to_string())),
            ..MeetPatch::default()
        })
        .await
        .expect("set location");
    assert_eq!(
        editor.view().expect("view").meet().location.as_deref(),
        Some("Memorial Field")
    );

    let calls = backend.count("update_meet");
    editor
        .update_meet(MeetPatch {
            location: Some(None),
            ..MeetPatch::default()
        })
        .await
        .expect("clear location");
    assert_eq!(backend.count("update_meet"), calls + 1);
    assert_eq!(editor.view().expect("view").meet().location, None);
}

#[tokio::test]
async fn test_failed_add_meet_event_still_reloads() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");

    let loads_before = backend.count("fetch_meet_page");
    backend.fail_next("add_meet_event", "event_id is not valid");
    let err = editor.add_meet_event(99, None).await.expect_err("server refused");

    assert_eq!(err.user_message(), "event_id is not valid");
    assert_eq!(backend.count("fetch_meet_page"), loads_before + 1);
    assert_eq!(editor.view().expect("view").events().len(), 3);
}

#[tokio::test]
async fn test_add_meet_event_appends_sort_order() {
    let mut editor = MeetEditor::new(overlapping_meet(), Gender::Male);
    editor.open_meet(1).await.expect("open");
    editor.add_meet_event(99, None).await.expect("add");

    let view = editor.view().expect("view");
    let added = view
        .events()
        .iter()
        .find(|me| me.event_id == Some(99))
        .expect("new event on page");
    assert_eq!(added.sort_order, 13);
}

#[tokio::test]
async fn test_stale_page_response_is_discarded() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");

    let first = editor.begin_page_load().expect("meet open");
    let first_response = backend.fetch_meet_page(1, Gender::Male).await;

    let second = editor.begin_page_load().expect("meet open");
    let mut second_response = backend.fetch_meet_page(1, Gender::Male).await;
    if let Ok(ref mut page) = second_response {
        page.meet.name = "Newest".to_string();
    }

    assert!(editor.finish_page_load(second, second_response).expect("apply newest"));
    assert!(!editor.finish_page_load(first, first_response).expect("stale dropped"));
    assert_eq!(editor.view().expect("view").meet().name, "Newest");
}

#[tokio::test]
async fn test_response_after_close_is_dropped() {
    let backend = overlapping_meet();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);
    editor.open_meet(1).await.expect("open");

    let request = editor.begin_page_load().expect("meet open");
    let response = backend.fetch_meet_page(1, Gender::Male).await;
    editor.close_meet();

    assert!(!editor.finish_page_load(request, response).expect("dropped"));
    assert!(editor.view().is_none());
    assert_eq!(editor.state().phase, MeetPhase::NoMeetSelected);
}

#[tokio::test]
async fn test_seasons_fetched_once() {
    let backend = roster();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);

    let first = editor.seasons().await.expect("seasons").len();
    let second = editor.seasons().await.expect("seasons again").len();
    assert_eq!(first, 1);
    assert_eq!(second, 1);
    assert_eq!(backend.count("list_seasons"), 1);
}

#[tokio::test]
async fn test_failed_season_fetch_is_retried() {
    let backend = roster();
    let mut editor = MeetEditor::new(backend.clone(), Gender::Male);

    backend.fail_next("list_seasons", "down");
    assert!(editor.seasons().await.is_err());
    assert_eq!(editor.seasons().await.expect("retry").len(), 1);
    assert_eq!(backend.count("list_seasons"), 2);
}
