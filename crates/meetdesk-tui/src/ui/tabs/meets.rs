use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use meetdesk_core::utils::{format_date, format_optional, truncate_string};

use crate::app::{App, MeetFocus};
use crate::ui::styles;

/// Render the Meets tab: meet list, events and entries, eligible athletes
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(36),
            Constraint::Percentage(36),
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    render_meet_list(frame, app, columns[0]);
    if app.meet_editor.view().is_some() {
        render_events(frame, app, middle[0]);
        render_entries(frame, app, middle[1]);
        render_athletes(frame, app, columns[2]);
    } else {
        render_placeholder(frame, app, columns[1], "Open a meet with Enter, or press [n] for a new one.");
        render_placeholder(frame, app, columns[2], "");
    }
}

fn table_block(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
}

fn row_style(is_cursor: bool, focused: bool) -> ratatui::style::Style {
    if is_cursor && focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    }
}

fn render_meet_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.meet_focus == MeetFocus::Meets;
    let open_id = app.meet_editor.state().current_meet_id;

    let rows: Vec<Row> = app
        .meet_editor
        .meets()
        .iter()
        .enumerate()
        .map(|(i, meet)| {
            let marker = if Some(meet.meet_id) == open_id { "▶" } else { " " };
            let varsity = if meet.is_varsity { "V" } else { "" };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(truncate_string(&meet.name, 28)),
                Cell::from(varsity),
                Cell::from(format_date(meet.meet_date)),
            ])
            .style(row_style(i == app.meet_selection, focused))
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(12),
    ];

    let title = format!(" Meets ({}) ", app.meet_editor.meets().len());
    let table = Table::new(rows, widths)
        .block(table_block(title, focused))
        .row_highlight_style(if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        });

    let mut state = TableState::default();
    state.select(Some(app.meet_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_events(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.meet_focus == MeetFocus::Events;
    let selected_id = app.meet_editor.state().selected_meet_event_id;
    let events = app.meet_events();

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Event"),
        Cell::from("Group"),
        Cell::from("#"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = events
        .iter()
        .enumerate()
        .map(|(i, me)| {
            let is_selected = Some(me.meet_event_id) == selected_id;
            let marker = if is_selected { "●" } else { " " };
            let style = if is_selected && !(i == app.event_selection && focused) {
                styles::highlight_style()
            } else {
                row_style(i == app.event_selection, focused)
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(me.event_name.clone()),
                Cell::from(format_optional(me.event_group.as_deref(), "")),
                Cell::from(format!("{:>2}", me.entries.len())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Length(3),
    ];

    let subtitle = app
        .meet_editor
        .view()
        .map(|v| v.meet().subtitle())
        .unwrap_or_default();
    let title = format!(" Events ({}) {} ", events.len(), subtitle);

    let table = Table::new(rows, widths)
        .header(header)
        .block(table_block(title, focused));

    let mut state = TableState::default();
    state.select(Some(app.event_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_entries(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.meet_focus == MeetFocus::Entries;

    let Some(event) = app.selected_event() else {
        let block = table_block(" Entries ".to_string(), focused);
        let hint = Paragraph::new(Line::from(Span::styled(
            " Select an event to see its entries.",
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let rows: Vec<Row> = event
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if entry.unavailable && !(i == app.entry_selection && focused) {
                styles::unavailable_style()
            } else {
                row_style(i == app.entry_selection, focused)
            };
            Row::new(vec![Cell::from(entry.display_name())]).style(style)
        })
        .collect();

    let title = format!(" {} ({}) [x] remove ", event.event_name, event.entries.len());
    let table = Table::new(rows, [Constraint::Fill(1)]).block(table_block(title, focused));

    let mut state = TableState::default();
    state.select(Some(app.entry_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_athletes(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.meet_focus == MeetFocus::Athletes;
    let Some(view) = app.meet_editor.view() else {
        return;
    };
    let entered = app.meet_editor.selected_athlete_ids();

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Name"),
        Cell::from("Team"),
        Cell::from("Ev"),
        Cell::from("VM"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = view
        .athletes()
        .iter()
        .enumerate()
        .map(|(i, athlete)| {
            let is_entered = entered.contains(&athlete.athlete_id);
            let is_cursor = i == app.athlete_selection && focused;
            let style = if is_cursor {
                styles::selected_style()
            } else if is_entered {
                styles::entered_style()
            } else if athlete.unavailable {
                styles::unavailable_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(if is_entered { "✓" } else { " " }),
                Cell::from(athlete.display_name()),
                Cell::from(format_optional(athlete.team_name.as_deref(), "")),
                Cell::from(format!("{:>2}", view.entry_count(athlete.athlete_id))),
                Cell::from(format!("{:>2}", athlete.varsity_meets)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(3),
    ];

    let title = format!(
        " {} Athletes ({}) ",
        view.gender.partition_label(),
        view.athletes().len()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(table_block(title, focused));

    let mut state = TableState::default();
    state.select(Some(app.athlete_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect, text: &str) {
    let focused = app.meet_focus != MeetFocus::Meets;
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {}", text),
        styles::muted_style(),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_style(focused && !text.is_empty())),
    );
    frame.render_widget(paragraph, area);
}
