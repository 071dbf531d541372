//! Modal overlays: the create form, delete confirmations and help.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Dialog};
use crate::state::FormField;
use crate::traits::HttpClient;
use crate::ui::components::{
    render_dialog_frame, render_input_field, DialogFrameConfig, InputFieldConfig,
    INPUT_FIELD_HEIGHT,
};
use crate::ui::layout::LayoutContext;
use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_ERROR};

pub fn render_dialog<H: HttpClient + 'static>(
    frame: &mut Frame,
    area: Rect,
    app: &App<H>,
    ctx: &LayoutContext,
) {
    match &app.dialog {
        Dialog::None => {}
        Dialog::CreateChatbot => render_create_form(frame, area, app, ctx),
        Dialog::ConfirmDeleteChatbot { name, .. } => render_confirm(
            frame,
            area,
            ctx,
            "Delete chatbot",
            format!("Delete \"{}\" and all of its threads?", name),
        ),
        Dialog::ConfirmDeleteSetting { key } => render_confirm(
            frame,
            area,
            ctx,
            "Delete setting",
            format!("Delete setting \"{}\"?", key),
        ),
        Dialog::Help => render_help(frame, area, ctx),
    }
}

fn render_create_form<H: HttpClient + 'static>(
    frame: &mut Frame,
    area: Rect,
    app: &App<H>,
    ctx: &LayoutContext,
) {
    let Some(form) = app.directory.form.as_ref() else {
        return;
    };
    let config = DialogFrameConfig::new("New chatbot", INPUT_FIELD_HEIGHT * 3 + 2).min_width(44);
    let inner = render_dialog_frame(frame, area, ctx, &config);

    let [name_area, type_area, desc_area, error_area, hint_area] = Layout::vertical([
        Constraint::Length(INPUT_FIELD_HEIGHT),
        Constraint::Length(INPUT_FIELD_HEIGHT),
        Constraint::Length(INPUT_FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_input_field(
        frame,
        name_area,
        &InputFieldConfig::new("Name", &form.name)
            .focused(form.focus == FormField::Name)
            .placeholder("support-bot"),
    );

    let types = app.directory.types();
    let type_label = types
        .get(form.type_index)
        .map(|t| format!("‹ {} ›", t.name))
        .unwrap_or_else(|| "no chatbot types available".to_string());
    render_input_field(
        frame,
        type_area,
        &InputFieldConfig::new("Type", &type_label).focused(form.focus == FormField::Type),
    );

    render_input_field(
        frame,
        desc_area,
        &InputFieldConfig::new("Description", &form.desc)
            .focused(form.focus == FormField::Description)
            .placeholder("optional"),
    );

    if let Some(error) = app.directory.error() {
        frame.render_widget(
            Paragraph::new(Span::styled(error.to_string(), Style::default().fg(COLOR_ERROR))),
            error_area,
        );
    }
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Tab next field · ←/→ type · Enter create · Esc cancel",
            Style::default().fg(COLOR_DIM),
        )),
        hint_area,
    );
}

fn render_confirm(
    frame: &mut Frame,
    area: Rect,
    ctx: &LayoutContext,
    title: &str,
    question: String,
) {
    let inner = render_dialog_frame(frame, area, ctx, &DialogFrameConfig::new(title, 4));
    let lines = vec![
        Line::from(Span::styled(question, Style::default().fg(COLOR_ACCENT))),
        Line::default(),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(COLOR_ERROR)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" delete   ", Style::default().fg(COLOR_DIM)),
            Span::styled("n", Style::default().fg(COLOR_BORDER_FOCUSED)),
            Span::styled(" cancel", Style::default().fg(COLOR_DIM)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

const HELP: &[(&str, &str)] = &[
    ("Chatbots", ""),
    ("↑/↓ j/k", "select"),
    ("Enter", "chat"),
    ("s / l", "settings / logs"),
    ("n / d", "new / delete"),
    ("r", "refresh"),
    ("Chat", ""),
    ("Enter", "send"),
    ("Ctrl+N", "new thread"),
    ("Settings", ""),
    ("←/→ space", "adjust"),
    ("Ctrl+S", "save and reload"),
    ("Ctrl+R / Ctrl+D", "reload / delete"),
    ("Anywhere", ""),
    ("Esc", "back"),
    ("Ctrl+C", "quit"),
];

fn render_help(frame: &mut Frame, area: Rect, ctx: &LayoutContext) {
    let config = DialogFrameConfig::new("Keys", HELP.len() as u16);
    let inner = render_dialog_frame(frame, area, ctx, &config);
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, action)| {
            if action.is_empty() {
                Line::from(Span::styled(
                    *keys,
                    Style::default()
                        .fg(COLOR_ACCENT)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(format!("  {:<18}", keys), Style::default().fg(COLOR_ACCENT)),
                    Span::styled(*action, Style::default().fg(COLOR_DIM)),
                ])
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
