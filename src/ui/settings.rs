//! Settings screen: one row per setting, drawn by its type's widget.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::traits::HttpClient;
use crate::ui::helpers::pad_to_width;
use crate::ui::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_DIRTY, COLOR_HEADER, COLOR_SELECTED_BG,
};

const LABEL_WIDTH: usize = 22;

pub fn render_settings<H: HttpClient + 'static>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let [list_area, detail_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(4)]).areas(area);

    let name = app
        .settings
        .chatbot_id()
        .and_then(|id| app.directory.chatbots().iter().find(|c| c.id == id))
        .map(|c| c.name.clone())
        .unwrap_or_default();
    let mut title = format!(" Settings · {} ", name);
    if app.settings.has_changes() {
        title.push_str("(unsaved) ");
    }
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(COLOR_HEADER)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(list_area);
    frame.render_widget(block, list_area);
    frame.render_widget(Paragraph::new(setting_rows(app, inner.height as usize)), inner);

    render_detail(frame, detail_area, app);
}

fn setting_rows<H: HttpClient + 'static>(app: &App<H>, height: usize) -> Vec<Line<'static>> {
    let settings = app.settings.settings();
    if settings.is_empty() {
        let text = if app.settings.is_loading() {
            "Loading settings…"
        } else {
            "This chatbot has no settings."
        };
        return vec![Line::from(Span::styled(text, Style::default().fg(COLOR_DIM)))];
    }

    let visible = height.max(1);
    let first = app.settings_cursor.saturating_sub(visible - 1);
    settings
        .values()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, setting)| {
            let focused = i == app.settings_cursor;
            let dirty = if app.settings.is_dirty(&setting.key) {
                Span::styled("● ", Style::default().fg(COLOR_DIRTY))
            } else {
                Span::raw("  ")
            };
            let label_style = if focused {
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(COLOR_DIM)
            };
            let mut spans = vec![
                dirty,
                Span::styled(pad_to_width(setting.label(), LABEL_WIDTH), label_style),
            ];
            spans.extend(
                app.widgets
                    .render(setting, &app.widget_ctx, focused)
                    .spans,
            );
            let line = Line::from(spans);
            if focused {
                line.style(Style::default().bg(COLOR_SELECTED_BG))
            } else {
                line
            }
        })
        .collect()
}

fn render_detail<H: HttpClient + 'static>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let Some(setting) = app
        .focused_setting_key()
        .and_then(|key| app.settings.settings().get(key))
    else {
        return;
    };
    let widget = app.widgets.widget_for(&setting.setting_type);
    let mut lines = vec![Line::from(vec![
        Span::styled(setting.key.clone(), Style::default().fg(COLOR_ACCENT)),
        Span::styled(
            format!("  {} · {}", setting.setting_type.as_str(), widget.name),
            Style::default().fg(COLOR_DIM),
        ),
    ])];
    if let Some(description) = &setting.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(COLOR_DIM),
        )));
    }
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
