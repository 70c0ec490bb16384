//! Form overlays. Each form is a bordered box of `label: [value]` rows; the
//! focused row is highlighted and shows a cursor when it takes text.

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use meetdesk_core::models::name_of;

use crate::app::App;
use crate::forms::{AthleteFormField, MeetFormField};

use super::render::centered_rect_fixed;
use super::styles;

const LABEL_WIDTH: usize = 17;

fn field_line(label: &str, value: String, focused: bool, is_text: bool) -> Line<'static> {
    let cursor = if focused && is_text { "▌" } else { "" };
    let value = if focused && !is_text {
        format!("◀ {} ▶", value)
    } else {
        format!("{}{}", value, cursor)
    };
    Line::from(vec![
        Span::styled(format!("  {:<width$}", label, width = LABEL_WIDTH), styles::muted_style()),
        Span::styled(value, styles::input_style(focused)),
    ])
}

fn footer(lines: &mut Vec<Line<'static>>, error: Option<&str>, submit_enabled: bool) {
    lines.push(Line::from(""));
    match error {
        Some(message) => lines.push(Line::from(Span::styled(
            format!("  {}", message),
            styles::error_style(),
        ))),
        None => lines.push(Line::from("")),
    }
    let submit_style = if submit_enabled {
        styles::help_key_style()
    } else {
        styles::muted_style()
    };
    lines.push(Line::from(vec![
        Span::styled("  [Enter]", submit_style),
        Span::styled(" save  ", styles::muted_style()),
        Span::styled("[Tab]", styles::help_key_style()),
        Span::styled(" next field  ", styles::muted_style()),
        Span::styled("[Esc]", styles::help_key_style()),
        Span::styled(" cancel", styles::muted_style()),
    ]));
}

fn render_dialog(frame: &mut Frame, title: String, width: u16, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16 + 2;
    let area = centered_rect_fixed(width, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_meet_form(frame: &mut Frame, app: &App) {
    let form = &app.meet_form;
    let seasons = app.meet_editor.cached_seasons();

    let mut lines = vec![Line::from("")];
    for field in MeetFormField::ALL {
        let value = match field {
            MeetFormField::Name => form.name.clone(),
            MeetFormField::Date => {
                if form.meet_date.is_empty() && form.focus != field {
                    "YYYY-MM-DD".to_string()
                } else {
                    form.meet_date.clone()
                }
            }
            MeetFormField::Location => form.location.clone(),
            MeetFormField::Venue => form
                .venue_type
                .map(|v| v.label().to_string())
                .unwrap_or_else(|| "(none)".to_string()),
            MeetFormField::Varsity => if form.is_varsity { "Yes" } else { "No" }.to_string(),
            MeetFormField::Season => form.season_label(seasons),
            MeetFormField::Notes => form.notes.clone(),
        };
        lines.push(field_line(
            field.label(),
            value,
            form.focus == field,
            !field.is_choice(),
        ));
    }
    footer(&mut lines, app.form_error.as_deref(), true);

    render_dialog(frame, form.title().to_string(), 60, lines);
}

pub fn render_meet_event_form(frame: &mut Frame, app: &App) {
    let form = &app.meet_event_form;
    let gender = app.meet_editor.state().current_gender;

    let mut lines = vec![
        Line::from(Span::styled(
            format!("  Adds to the {} events", gender.partition_label()),
            styles::muted_style(),
        )),
        Line::from(""),
        field_line("Event id", form.event_id.clone(), !form.editing_sort_order, true),
        field_line(
            "Sort order",
            if form.sort_order.is_empty() && !form.editing_sort_order {
                "(end of list)".to_string()
            } else {
                form.sort_order.clone()
            },
            form.editing_sort_order,
            true,
        ),
    ];
    footer(&mut lines, app.form_error.as_deref(), true);

    render_dialog(frame, " Add Event ".to_string(), 56, lines);
}

pub fn render_athlete_form(frame: &mut Frame, app: &App) {
    let form = &app.athlete_form;
    let teams = app.roster.teams();
    let event_groups = app.roster.event_groups();

    let mut lines = vec![Line::from("")];
    for field in AthleteFormField::ALL {
        let value = match field {
            AthleteFormField::FirstName => form.first_name.clone(),
            AthleteFormField::LastName => form.last_name.clone(),
            AthleteFormField::Gender => form.gender.code().to_string(),
            AthleteFormField::Team => form
                .team_id
                .map(|id| name_of(teams, id).to_string())
                .unwrap_or_else(|| "(choose)".to_string()),
            AthleteFormField::EventGroup => form
                .event_group_id
                .map(|id| name_of(event_groups, id).to_string())
                .unwrap_or_else(|| "(choose)".to_string()),
            AthleteFormField::Varsity => form.varsity.code().to_string(),
            AthleteFormField::Available => form.available.code().to_string(),
            AthleteFormField::ExpectedReturn => form.expected_return.clone(),
            AthleteFormField::GradYear => form.grad_year.clone(),
        };
        lines.push(field_line(
            field.label(),
            value,
            app.athlete_form_field == field,
            !field.is_choice(),
        ));
    }
    footer(&mut lines, app.form_error.as_deref(), form.is_valid());

    render_dialog(frame, " New Athlete ".to_string(), 60, lines);
}

pub fn render_field_editor(frame: &mut Frame, app: &App) {
    let Some(editor) = app.field_editor.as_ref() else {
        return;
    };
    let value = editor.value_display(app.roster.teams(), app.roster.event_groups());

    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {}", editor.athlete_name()),
            styles::highlight_style(),
        )),
        Line::from(""),
        field_line(editor.field.label(), value, true, !editor.field.is_choice()),
    ];
    footer(&mut lines, app.form_error.as_deref(), true);

    render_dialog(frame, " Edit Athlete ".to_string(), 60, lines);
}
