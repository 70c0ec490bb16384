mod common;

use common::InMemoryBackend;
use meetdesk_core::editor::EditorError;
use meetdesk_core::models::{AthleteField, Gender, YesNo};
use meetdesk_core::roster::{FormError, RosterEditor};

fn backend() -> InMemoryBackend {
    InMemoryBackend::new()
        .with_athlete(3, "Cy", "Jumper", Gender::Male)
        .with_athlete(1, "Ada", "Runner", Gender::Female)
        .with_athlete(2, "Ben", "Sprinter", Gender::Male)
}

#[tokio::test]
async fn test_initialize_loads_sorted_lookups_and_roster() {
    let mut roster = RosterEditor::new(backend(), false);
    roster.initialize().await.expect("initialize");

    let teams: Vec<&str> = roster.teams().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(teams, vec!["JV", "Varsity"]);
    assert_eq!(roster.event_groups().len(), 2);

    let ids: Vec<i64> = roster.athletes().iter().map(|a| a.athlete_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let form = roster.blank_form();
    assert_eq!(form.team_id, Some(2));
    assert_eq!(form.event_group_id, Some(1));
}

#[tokio::test]
async fn test_invalid_form_never_reaches_backend() {
    let backend = backend();
    let mut roster = RosterEditor::new(backend.clone(), false);
    roster.initialize().await.expect("initialize");

    let mut form = roster.blank_form();
    form.first_name = "   ".to_string();
    form.last_name = "Walker".to_string();
    let err = roster.create_athlete(&form).await.expect_err("blank name");
    assert!(matches!(err, EditorError::Validation(FormError::MissingFirstName)));

    form.first_name = "Eve".to_string();
    form.grad_year = "1999".to_string();
    let err = roster.create_athlete(&form).await.expect_err("old grad year");
    assert!(matches!(
        err,
        EditorError::Validation(FormError::GradYearOutOfRange(1999))
    ));

    assert_eq!(backend.count("create_athlete"), 0);
}

#[tokio::test]
async fn test_create_athlete_reloads_roster() {
    let backend = backend();
    let mut roster = RosterEditor::new(backend.clone(), false);
    roster.initialize().await.expect("initialize");

    let mut form = roster.blank_form();
    form.first_name = " Eve ".to_string();
    form.last_name = "Walker".to_string();
    form.grad_year = "2028".to_string();
    let created = roster.create_athlete(&form).await.expect("create");

    assert_eq!(created.first_name, "Eve");
    assert_eq!(created.grad_year, Some(2028));
    assert!(roster.athlete(created.athlete_id).is_some());
    assert_eq!(backend.count("list_athletes"), 2);
}

#[tokio::test]
async fn test_update_field_replaces_row() {
    let backend = backend();
    let mut roster = RosterEditor::new(backend.clone(), false);
    roster.initialize().await.expect("initialize");

    roster
        .update_field(2, AthleteField::Varsity(YesNo::Yes))
        .await
        .expect("update");
    assert_eq!(roster.athlete(2).map(|a| a.varsity_yn), Some(YesNo::Yes));
    // Success patches the row without a reload.
    assert_eq!(backend.count("list_athletes"), 1);
}

#[tokio::test]
async fn test_failed_update_reloads_roster() {
    let backend = backend();
    let mut roster = RosterEditor::new(backend.clone(), false);
    roster.initialize().await.expect("initialize");

    backend.fail_next("update_athlete", "invalid grad_year");
    let err = roster
        .update_field(1, AthleteField::GradYear(Some(1900)))
        .await
        .expect_err("refused");
    assert_eq!(err.user_message(), "invalid grad_year");
    assert_eq!(backend.count("list_athletes"), 2);
    assert_eq!(roster.athlete(1).and_then(|a| a.grad_year), None);
}

#[tokio::test]
async fn test_deactivate_hides_until_inactive_shown() {
    let mut roster = RosterEditor::new(backend(), false);
    roster.initialize().await.expect("initialize");

    roster.set_active(3, false).await.expect("deactivate");
    assert!(roster.athlete(3).is_none());

    roster.toggle_include_inactive().await.expect("show inactive");
    assert!(roster.include_inactive());
    let athlete = roster.athlete(3).expect("inactive athlete listed");
    assert!(!athlete.is_active());

    roster.set_active(3, true).await.expect("restore");
    assert!(roster.athlete(3).map(|a| a.is_active()).unwrap_or(false));
}
