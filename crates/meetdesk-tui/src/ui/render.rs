use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use meetdesk_core::models::Gender;

use crate::app::{App, AppState, Tab};

use super::dialogs;
use super::styles;
use super::tabs::{athletes, meets};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::ConfirmingArchive => render_archive_overlay(frame, app),
        AppState::EditingMeet => dialogs::render_meet_form(frame, app),
        AppState::AddingMeetEvent => dialogs::render_meet_event_form(frame, app),
        AppState::AddingAthlete => dialogs::render_athlete_form(frame, app),
        AppState::EditingAthlete => dialogs::render_field_editor(frame, app),
        AppState::ShowingError => render_error_overlay(frame, app),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  meetdesk";
    let meet_name = app
        .meet_editor
        .state()
        .current_meet
        .as_ref()
        .map(|m| format!("  ·  {}", m.name))
        .unwrap_or_default();
    let help_hint = "[?] Help";
    let used = title.chars().count() + meet_name.chars().count() + help_hint.len() + 4;

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::styled(meet_name, styles::highlight_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let main_tabs = [
        ("[1] Meets", app.current_tab == Tab::Meets),
        ("[2] Athletes", app.current_tab == Tab::Athletes),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, selected)) in main_tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(*label, styles::tab_style(*selected)));
    }

    // Gender partition toggle on the right of the Meets tab
    if app.current_tab == Tab::Meets {
        let current = app.meet_editor.state().current_gender;
        let labels: Vec<(String, bool)> = Gender::PARTITIONS
            .iter()
            .map(|g| (g.partition_label().to_string(), *g == current))
            .collect();
        let main_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let toggle_width: usize =
            4 + labels.iter().map(|(l, _)| l.len()).sum::<usize>() + (labels.len() - 1) * 3;
        let padding = (area.width as usize).saturating_sub(main_width + toggle_width + 2);
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled("[g] ", styles::help_key_style()));
        for (i, (label, selected)) in labels.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", styles::muted_style()));
            }
            spans.push(Span::styled(label, styles::tab_style(selected)));
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Meets => meets::render(frame, app, area),
        Tab::Athletes => athletes::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.current_tab {
        Tab::Meets => "[n]ew [e]dit [a]dd event [A]rchive | [q]uit",
        Tab::Athletes => "[n]ew [i]nactive [v]arsity a[y]ail [d]eactivate | [q]uit",
    };

    let in_flight = app
        .status_message
        .as_deref()
        .or_else(|| app.meet_editor.status())
        .or_else(|| app.roster.status());

    let left_text = match in_flight {
        Some(msg) => format!(" {} ", msg),
        None => {
            let age = match app.current_tab {
                Tab::Meets => app
                    .meet_editor
                    .view_snapshot()
                    .map(|s| s.age_display())
                    .unwrap_or_else(|| app.meet_editor.meets_snapshot().age_display()),
                Tab::Athletes => app.roster.athletes_snapshot().age_display(),
            };
            format!(" Updated {} ", age)
        }
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(56, 30, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            format!("  meetdesk {}", version),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("1-2 ←/→", "Switch tabs"),
        help_line("↑/↓", "Navigate list"),
        help_line("Tab", "Cycle column (meets/events/entries/athletes)"),
        help_line("Enter", "Open meet / select event / add entry"),
        help_line("Esc", "Clear event selection"),
        Line::from(""),
        Line::from(Span::styled(" Meets Tab", styles::highlight_style())),
        help_line("g", "Switch Boys/Girls"),
        help_line("n", "New meet"),
        help_line("e", "Edit open meet"),
        help_line("a", "Add event to open meet"),
        help_line("x", "Remove focused entry"),
        help_line("A", "Archive/unarchive open meet"),
        help_line("r", "Reload meets"),
        Line::from(""),
        Line::from(Span::styled(" Athletes Tab", styles::highlight_style())),
        help_line("n", "New athlete"),
        help_line("Enter", "Edit a field"),
        help_line("v/y/d", "Toggle varsity/available/active"),
        help_line("i", "Show/hide inactive athletes"),
        Line::from(""),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_error_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(52, 8, frame.area());
    frame.render_widget(Clear, area);

    let message = app.error_message.as_deref().unwrap_or_default();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {}", message), styles::error_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Enter]", styles::help_key_style()),
            Span::styled(" to continue", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Error ")
        .title_style(styles::error_style())
        .borders(Borders::ALL)
        .border_style(styles::error_style());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_archive_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(52, 8, frame.area());
    frame.render_widget(Clear, area);

    let (action, name) = app
        .meet_editor
        .state()
        .current_meet
        .as_ref()
        .map(|m| (m.archive_action_label(), m.name.as_str()))
        .unwrap_or(("Archive", ""));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("   {} \"{}\"?", action, name),
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to confirm, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
pub(crate) fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
