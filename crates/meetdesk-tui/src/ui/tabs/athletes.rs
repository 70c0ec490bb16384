use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use meetdesk_core::models::{name_of, Athlete};
use meetdesk_core::utils::{format_date, yes_no_mark};

use crate::app::App;
use crate::ui::styles;

/// Render the Athletes tab - roster table and detail panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(area);

    render_roster_table(frame, app, chunks[0]);
    render_athlete_detail(frame, app, app.selected_roster_athlete(), chunks[1]);
}

fn render_roster_table(frame: &mut Frame, app: &App, area: Rect) {
    let teams = app.roster.teams();

    let header_cells = [
        Cell::from("ID"),
        Cell::from("Name"),
        Cell::from("G"),
        Cell::from("Team"),
        Cell::from("V"),
        Cell::from("Av"),
        Cell::from("Grad"),
    ];
    let header = Row::new(header_cells)
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = app
        .roster
        .athletes()
        .iter()
        .enumerate()
        .map(|(i, athlete)| {
            let style = if i == app.roster_selection {
                styles::selected_style()
            } else if !athlete.is_active() {
                styles::unavailable_style()
            } else {
                styles::list_item_style()
            };

            Row::new(vec![
                Cell::from(format!("{:>4}", athlete.athlete_id)),
                Cell::from(athlete.display_name()),
                Cell::from(athlete.gender.code()),
                Cell::from(name_of(teams, athlete.team_id).to_string()),
                Cell::from(yes_no_mark(athlete.varsity_yn.is_yes())),
                Cell::from(yes_no_mark(athlete.available_yn.is_yes())),
                Cell::from(
                    athlete
                        .grad_year
                        .map(|y| y.to_string())
                        .unwrap_or_default(),
                ),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Fill(3),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(5),
    ];

    let scope = if app.roster.include_inactive() {
        "all"
    } else {
        "active"
    };
    let title = format!(" Athletes ({}, {}) ", app.roster.athletes().len(), scope);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.roster_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn detail_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<17}", label), styles::muted_style()),
        Span::raw(value),
    ])
}

fn render_athlete_detail(frame: &mut Frame, app: &App, selected: Option<&Athlete>, area: Rect) {
    let content = match selected {
        Some(athlete) => {
            let status = if athlete.is_active() {
                Span::styled("Active", styles::success_style())
            } else {
                Span::styled("Inactive", styles::error_style())
            };
            let expected_return = if athlete.expected_return.is_some() {
                format_date(athlete.expected_return)
            } else {
                "-".to_string()
            };

            vec![
                Line::from(Span::styled(athlete.full_name(), styles::title_style())),
                Line::from(status),
                Line::from(""),
                detail_line("Gender:", athlete.gender.code().to_string()),
                detail_line("Team:", name_of(app.roster.teams(), athlete.team_id).to_string()),
                detail_line(
                    "Event group:",
                    name_of(app.roster.event_groups(), athlete.event_group_id).to_string(),
                ),
                detail_line("Varsity:", yes_no_mark(athlete.varsity_yn.is_yes()).to_string()),
                detail_line(
                    "Available:",
                    yes_no_mark(athlete.available_yn.is_yes()).to_string(),
                ),
                detail_line("Expected return:", expected_return),
                detail_line(
                    "Grad year:",
                    athlete
                        .grad_year
                        .map(|y| y.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Line::from(""),
                Line::from(Span::styled(
                    "[Enter] edit  [v]/[y]/[d] toggle",
                    styles::muted_style(),
                )),
            ]
        }
        None => vec![Line::from(Span::styled(
            "No athletes. Press [n] to add one.",
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Details ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(paragraph, area);
}
