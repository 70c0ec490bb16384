//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes. Anything that needs the backend is queued as a
//! `Command`; the main loop runs it after the next draw.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use meetdesk_core::editor::EditorError;
use meetdesk_core::models::{AthleteField, YesNo};

use crate::app::{App, AppState, Command, MeetFocus, Tab, PAGE_SCROLL_SIZE};
use crate::forms::{athlete_form_backspace, athlete_form_cycle, athlete_form_input};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle error overlay
    if matches!(app.state, AppState::ShowingError) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_error();
        }
        return Ok(false);
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle archive confirmation
    if matches!(app.state, AppState::ConfirmingArchive) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Normal;
                app.queue(Command::ToggleArchive);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.state {
        AppState::EditingMeet => return handle_meet_form_input(app, key),
        AppState::AddingMeetEvent => return handle_meet_event_form_input(app, key),
        AppState::AddingAthlete => return handle_athlete_form_input(app, key),
        AppState::EditingAthlete => return handle_field_editor_input(app, key),
        _ => {}
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('1') => app.current_tab = Tab::Meets,
        KeyCode::Char('2') => app.current_tab = Tab::Athletes,
        KeyCode::Left => app.current_tab = app.current_tab.prev(),
        KeyCode::Right => app.current_tab = app.current_tab.next(),
        KeyCode::Up => move_cursor_up(app, 1),
        KeyCode::Down => move_cursor_down(app, 1),
        KeyCode::PageUp => move_cursor_up(app, PAGE_SCROLL_SIZE),
        KeyCode::PageDown => move_cursor_down(app, PAGE_SCROLL_SIZE),
        KeyCode::Home => *app.focused_cursor_mut() = 0,
        KeyCode::End => {
            let last = app.focused_list_len().saturating_sub(1);
            *app.focused_cursor_mut() = last;
        }
        _ => match app.current_tab {
            Tab::Meets => handle_meets_tab_input(app, key),
            Tab::Athletes => handle_athletes_tab_input(app, key),
        },
    }

    Ok(false)
}

fn move_cursor_up(app: &mut App, step: usize) {
    let cursor = app.focused_cursor_mut();
    *cursor = cursor.saturating_sub(step);
}

fn move_cursor_down(app: &mut App, step: usize) {
    let last = app.focused_list_len().saturating_sub(1);
    let cursor = app.focused_cursor_mut();
    *cursor = (*cursor + step).min(last);
}

// ============================================================================
// Meets tab
// ============================================================================

fn handle_meets_tab_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => app.meet_focus = app.meet_focus.next(),
        KeyCode::BackTab => app.meet_focus = app.meet_focus.prev(),
        KeyCode::Enter => activate_focused(app),
        KeyCode::Esc => {
            if app.meet_editor.state().selected_meet_event_id.is_some() {
                app.queue(Command::ClearEventSelection);
            }
        }
        KeyCode::Char('g') => app.queue(Command::ToggleGender),
        KeyCode::Char('n') => app.start_new_meet(),
        KeyCode::Char('e') => app.start_edit_meet(),
        KeyCode::Char('a') => app.start_add_meet_event(),
        KeyCode::Char('r') => app.queue(Command::LoadMeets),
        KeyCode::Char('x') => {
            if app.meet_focus != MeetFocus::Entries {
                return;
            }
            let target = app
                .selected_event()
                .map(|me| me.meet_event_id)
                .zip(app.highlighted_entry().map(|e| e.athlete_id));
            if let Some((meet_event_id, athlete_id)) = target {
                app.queue(Command::RemoveEntry {
                    meet_event_id,
                    athlete_id,
                });
            }
        }
        KeyCode::Char('A') => {
            if app.meet_editor.state().current_meet.is_some() {
                app.state = AppState::ConfirmingArchive;
            } else {
                app.show_error(EditorError::NoMeetSelected.user_message());
            }
        }
        _ => {}
    }
}

/// Enter on the Meets tab: open meet, select event, or add an entry,
/// depending on the focused column.
fn activate_focused(app: &mut App) {
    match app.meet_focus {
        MeetFocus::Meets => {
            if let Some(meet_id) = app.highlighted_meet().map(|m| m.meet_id) {
                app.queue(Command::OpenMeet(meet_id));
            }
        }
        MeetFocus::Events => {
            if let Some(id) = app.highlighted_event().map(|me| me.meet_event_id) {
                app.queue(Command::SelectEvent(id));
            }
        }
        MeetFocus::Entries => {}
        MeetFocus::Athletes => {
            if let Some(athlete_id) = app.highlighted_page_athlete().map(|a| a.athlete_id) {
                app.queue(Command::AddEntry(athlete_id));
            }
        }
    }
}

// ============================================================================
// Athletes tab
// ============================================================================

fn handle_athletes_tab_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.start_new_athlete(),
        KeyCode::Char('i') => app.queue(Command::ToggleInactive),
        KeyCode::Char('r') => app.queue(Command::LoadAthletes),
        KeyCode::Enter => app.start_edit_athlete(),
        KeyCode::Char('v') | KeyCode::Char('y') | KeyCode::Char('d') => {
            let Some(athlete) = app.selected_roster_athlete() else {
                return;
            };
            let athlete_id = athlete.athlete_id;
            let field = match key.code {
                KeyCode::Char('v') => AthleteField::Varsity(athlete.varsity_yn.flipped()),
                KeyCode::Char('y') => AthleteField::Available(athlete.available_yn.flipped()),
                _ => AthleteField::Active(YesNo::from(!athlete.is_active())),
            };
            app.queue(Command::UpdateAthlete(athlete_id, field));
        }
        _ => {}
    }
}

// ============================================================================
// Forms
// ============================================================================

fn handle_meet_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let focus = app.meet_form.focus;
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_meet_form(),
        KeyCode::Tab | KeyCode::Down => app.meet_form.focus = focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.meet_form.focus = focus.prev(),
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if focus.is_choice() => {
            let seasons = app.meet_editor.cached_seasons();
            app.meet_form.cycle_choice(seasons);
        }
        KeyCode::Backspace => app.meet_form.backspace(),
        KeyCode::Char(c) => app.meet_form.input_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_meet_event_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_meet_event_form(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.meet_event_form.toggle_focus()
        }
        KeyCode::Backspace => app.meet_event_form.backspace(),
        KeyCode::Char(c) => app.meet_event_form.input_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_athlete_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let field = app.athlete_form_field;
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_athlete_form(),
        KeyCode::Tab | KeyCode::Down => app.athlete_form_field = field.next(),
        KeyCode::BackTab | KeyCode::Up => app.athlete_form_field = field.prev(),
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if field.is_choice() => {
            athlete_form_cycle(
                &mut app.athlete_form,
                field,
                app.roster.teams(),
                app.roster.event_groups(),
            )
        }
        KeyCode::Backspace => athlete_form_backspace(&mut app.athlete_form, field),
        KeyCode::Char(c) => athlete_form_input(&mut app.athlete_form, field, c),
        _ => {}
    }
    app.form_error = app.athlete_form.validate().err().map(|e| e.to_string());
    Ok(false)
}

fn handle_field_editor_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.close_form();
            return Ok(false);
        }
        KeyCode::Enter => {
            app.submit_field_editor();
            return Ok(false);
        }
        _ => {}
    }

    let Some(editor) = app.field_editor.as_mut() else {
        app.close_form();
        return Ok(false);
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => editor.next_field(),
        KeyCode::BackTab | KeyCode::Up => editor.prev_field(),
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if editor.field.is_choice() => {
            editor.cycle_choice(app.roster.teams(), app.roster.event_groups())
        }
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Char(c) => editor.input_char(c),
        _ => {}
    }
    Ok(false)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::AthleteFormField;
    use crossterm::event::KeyModifiers;
    use meetdesk_core::Config;

    fn app() -> App {
        let config = Config {
            api_base_url: Some("http://127.0.0.1:9".to_string()),
            ..Default::default()
        };
        App::new(config).expect("app")
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE)).expect("input")
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!press(&mut app, KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Normal);
        press(&mut app, KeyCode::Char('q'));
        assert!(press(&mut app, KeyCode::Char('y')));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_error_overlay_swallows_keys() {
        let mut app = app();
        app.show_error("name is required".to_string());
        press(&mut app, KeyCode::Char('g'));
        assert!(app.pending().is_none());
        assert_eq!(app.state, AppState::ShowingError);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state, AppState::ShowingHelp);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_tab_switching_and_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.current_tab, Tab::Athletes);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_tab, Tab::Meets);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.meet_focus, MeetFocus::Events);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.meet_focus, MeetFocus::Meets);
    }

    #[test]
    fn test_gender_key_queues_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.take_pending(), Some(Command::ToggleGender));
    }

    #[test]
    fn test_archive_without_meet_shows_error() {
        let mut app = app();
        press(&mut app, KeyCode::Char('A'));
        assert_eq!(app.state, AppState::ShowingError);
        assert!(app.pending().is_none());
    }

    #[test]
    fn test_enter_on_empty_lists_does_nothing() {
        let mut app = app();
        for _ in 0..4 {
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Char('x'));
        assert!(app.pending().is_none());
    }

    #[test]
    fn test_meet_form_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state, AppState::EditingMeet);
        app.take_pending();
        for c in "Dual".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.meet_form.name, "Dua");
        // 'q' is text inside a form, not quit.
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.state, AppState::EditingMeet);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_meet_event_form_submits_command() {
        let mut app = app();
        app.state = AppState::AddingMeetEvent;
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(
            app.take_pending(),
            Some(Command::AddMeetEvent {
                event_id: 7,
                sort_order: None
            })
        );
    }

    #[test]
    fn test_athlete_form_shows_validation_inline() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state, AppState::AddingAthlete);
        press(&mut app, KeyCode::Char('J'));
        assert_eq!(app.athlete_form.first_name, "J");
        assert!(app.form_error.is_some());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::AddingAthlete);
        assert!(app.pending().is_none());
    }

    #[test]
    fn test_athlete_form_names_accept_spaces() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('n'));
        for c in "Mary Ann".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.athlete_form.first_name, "Mary Ann");

        press(&mut app, KeyCode::Tab);
        for c in "De La Cruz".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.athlete_form.last_name, "De La Cruz");

        // Space still cycles a choice field.
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.athlete_form_field, AthleteFormField::Gender);
        let before = app.athlete_form.gender;
        press(&mut app, KeyCode::Char(' '));
        assert_ne!(app.athlete_form.gender, before);
    }
}
