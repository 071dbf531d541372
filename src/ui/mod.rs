//! UI rendering for the Mochi dashboard
//!
//! Every frame is a one-line header, the active screen, a status line and a
//! keybind hint line, with an optional dialog drawn on top. Rendering only
//! reads `App`; all mutation happens in the event loop.

mod chat;
mod chatbot_list;
pub mod components;
mod dialogs;
pub mod helpers;
pub mod layout;
mod logs;
mod settings;
pub mod theme;

pub use layout::LayoutContext;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Screen};
use crate::traits::HttpClient;
use components::StatusIndicator;
use theme::{COLOR_ACCENT, COLOR_DIM, COLOR_HEADER};

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the UI based on current screen
pub fn render<H: HttpClient + 'static>(frame: &mut Frame, app: &App<H>) {
    let area = frame.area();
    let ctx = LayoutContext::from_rect(area);

    let [header_area, body_area, status_area, keys_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area, app);
    match app.screen {
        Screen::ChatbotList => chatbot_list::render_chatbot_list(frame, body_area, app, &ctx),
        Screen::Chat => chat::render_chat(frame, body_area, app),
        Screen::Settings => settings::render_settings(frame, body_area, app),
        Screen::Logs => logs::render_logs(frame, body_area, app, &ctx),
    }
    if let Some(status) = status_for(app) {
        frame.render_widget(Paragraph::new(status.to_line()), status_area);
    }
    frame.render_widget(Paragraph::new(keybind_hints(app.screen)), keys_area);

    dialogs::render_dialog(frame, area, app, &ctx);
}

fn render_header<H: HttpClient + 'static>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let mut spans = vec![
        Span::styled(
            " mochi ",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("› ", Style::default().fg(COLOR_DIM)),
        Span::styled(app.screen.title(), Style::default().fg(COLOR_ACCENT)),
    ];
    let who = match &app.username {
        Some(name) => format!("  {} @ {}", name, app.ctx.base_url()),
        None => format!("  {}", app.ctx.base_url()),
    };
    spans.push(Span::styled(who, Style::default().fg(COLOR_DIM)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// What the status line shows for the current screen: an error first, then
/// a spinner while loading, then a confirmation.
fn status_for<H: HttpClient + 'static>(app: &App<H>) -> Option<StatusIndicator> {
    let tick = app.tick_count;
    let (error, busy) = match app.screen {
        Screen::ChatbotList => (
            app.directory.error(),
            app.directory.is_loading().then_some("Loading chatbots"),
        ),
        Screen::Chat => (
            app.chat.error(),
            if app.chat.is_creating_thread() {
                Some("Creating thread")
            } else if app.chat.is_sending() {
                Some("Sending")
            } else {
                None
            },
        ),
        Screen::Settings => (
            app.settings.error(),
            if app.settings.is_saving() {
                Some("Saving")
            } else if app.settings.is_busy() {
                Some("Loading settings")
            } else {
                None
            },
        ),
        Screen::Logs => (
            app.logs.error(),
            app.logs.is_loading().then_some("Loading logs"),
        ),
    };
    if let Some(error) = error {
        return Some(StatusIndicator::Error(error.to_string()));
    }
    if let Some(message) = busy {
        return Some(StatusIndicator::spinner(message, tick));
    }
    if app.screen == Screen::ChatbotList {
        return app
            .directory
            .status()
            .map(|s| StatusIndicator::Success(s.to_string()));
    }
    None
}

fn keybind_hints(screen: Screen) -> Line<'static> {
    let hints: &[(&str, &str)] = match screen {
        Screen::ChatbotList => &[
            ("enter", "chat"),
            ("s", "settings"),
            ("l", "logs"),
            ("n", "new"),
            ("d", "delete"),
            ("r", "refresh"),
            ("q", "quit"),
        ],
        Screen::Chat => &[("enter", "send"), ("ctrl+n", "new thread"), ("esc", "back")],
        Screen::Settings => &[
            ("←/→", "adjust"),
            ("space", "toggle"),
            ("ctrl+s", "save"),
            ("ctrl+d", "delete"),
            ("esc", "back"),
        ],
        Screen::Logs => &[("↑/↓", "thread"), ("J/K", "scroll"), ("r", "reload"), ("esc", "back")],
    };
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(COLOR_ACCENT)));
        spans.push(Span::styled(format!(" {}  ", action), Style::default().fg(COLOR_DIM)));
    }
    spans.push(Span::styled("F1", Style::default().fg(COLOR_ACCENT)));
    spans.push(Span::styled(" help", Style::default().fg(COLOR_DIM)));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockHttpClient;
    use crate::app::{App, Dialog};
    use crate::models::{Chatbot, Message, MessageRole, SendMessageResponse, Setting, SettingType, SettingValue, SettingsMap, Thread};
    use crate::state::NewChatbotForm;
    use crate::{api::MochiClient, auth::RequestContext, config::Config};
    use ratatui::{backend::TestBackend, Terminal};

    fn create_test_app() -> App<MockHttpClient> {
        App::new(
            MochiClient::new(MockHttpClient::new()),
            RequestContext::new("http://mochi.test/api"),
            &Config::default(),
        )
        .with_username(Some("ana".into()))
    }

    fn chatbot(id: &str, name: &str) -> Chatbot {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": name, "chatbot_type": "echo", "desc": "A test bot"
        }))
        .unwrap()
    }

    fn draw(app: &App<MockHttpClient>, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn with_thread(app: &mut App<MockHttpClient>) {
        let ticket = app
            .chat
            .select_chatbot(chatbot("1", "Helper").to_ref())
            .unwrap();
        let thread: Thread = serde_json::from_value(serde_json::json!({
            "id": "42", "chatbot_id": "1", "created_at": "2026-01-01T00:00:00Z"
        }))
        .unwrap();
        app.chat.complete_create_thread(ticket, Ok(thread));
        app.screen = Screen::Chat;
    }

    #[test]
    fn test_empty_chatbot_list() {
        let app = create_test_app();
        let screen = draw(&app, 80, 24);
        assert!(screen.contains("mochi"));
        assert!(screen.contains("ana @ http://mochi.test/api"));
        assert!(screen.contains("No chatbots yet"));
    }

    #[test]
    fn test_chatbot_list_rows() {
        let mut app = create_test_app();
        app.directory
            .complete_refresh(Ok(vec![chatbot("1", "Helper"), chatbot("2", "Greeter")]));
        let wide = draw(&app, 100, 24);
        assert!(wide.contains("Helper"));
        assert!(wide.contains("Greeter"));
        assert!(wide.contains("A test bot"));

        let narrow = draw(&app, 70, 24);
        assert!(!narrow.contains("A test bot"));
    }

    #[test]
    fn test_chat_shows_pending_then_confirmed() {
        let mut app = create_test_app();
        with_thread(&mut app);
        app.chat.set_input("hello");
        let ticket = app.chat.begin_send().unwrap();

        let pending = draw(&app, 80, 24);
        assert!(pending.contains("thread 42"));
        assert!(pending.contains("sending…"));
        assert!(pending.contains("hello"));

        app.chat.complete_send(
            ticket,
            Ok(SendMessageResponse {
                user_message: Message::new(MessageRole::User, "hello"),
                assistant_message: Message::new(MessageRole::Assistant, "hi!"),
            }),
        );
        let done = draw(&app, 80, 24);
        assert!(!done.contains("sending…"));
        assert!(done.contains("hi!"));
    }

    #[test]
    fn test_chat_error_in_status_line() {
        let mut app = create_test_app();
        with_thread(&mut app);
        app.chat.set_input("hello");
        let ticket = app.chat.begin_send().unwrap();
        app.chat
            .complete_send(ticket, Err(crate::error::ApiError::Unauthorized));
        let screen = draw(&app, 80, 24);
        assert!(screen.contains("✗"));
        assert!(!screen.contains("sending…"));
    }

    #[test]
    fn test_settings_rows_and_dirty_marker() {
        let mut app = create_test_app();
        let ticket = app.settings.begin_load("1");
        let mut map = SettingsMap::new();
        map.insert(
            "tone".into(),
            Setting::new("tone", SettingValue::Number(0.5), SettingType::Number)
                .with_display_name("Tone")
                .with_description("How formal replies are"),
        );
        map.insert(
            "verbose".into(),
            Setting::new("verbose", SettingValue::Bool(true), SettingType::Boolean),
        );
        app.settings.complete_load(ticket, Ok(map));
        app.screen = Screen::Settings;

        let clean = draw(&app, 80, 24);
        assert!(clean.contains("Tone"));
        assert!(clean.contains("0.50"));
        assert!(clean.contains("How formal replies are"));
        assert!(clean.contains("[●] on"));
        assert!(!clean.contains("(unsaved)"));

        app.settings.set_local("tone", SettingValue::Number(0.8));
        let dirty = draw(&app, 80, 24);
        assert!(dirty.contains("0.80"));
        assert!(dirty.contains("(unsaved)"));
    }

    #[test]
    fn test_logs_screen() {
        let mut app = create_test_app();
        app.logs.begin_load("1");
        let thread = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "messages": [
                {"role": "user", "content": "where is my order"},
                {"role": "assistant", "content": "on its way"}
            ]
        }))
        .unwrap();
        app.logs.complete_load("1", Ok(vec![thread]));
        app.screen = Screen::Logs;

        let screen = draw(&app, 100, 24);
        assert!(screen.contains("Threads (1)"));
        assert!(screen.contains("where is my order"));
        assert!(screen.contains("on its way"));
    }

    #[test]
    fn test_empty_logs_is_not_an_error() {
        let mut app = create_test_app();
        app.logs.begin_load("1");
        app.logs.complete_load("1", Ok(vec![]));
        app.screen = Screen::Logs;
        let screen = draw(&app, 100, 24);
        assert!(screen.contains("No conversations yet."));
        assert!(!screen.contains("✗"));
    }

    #[test]
    fn test_dialogs_render() {
        let mut app = create_test_app();
        app.directory.form = Some(NewChatbotForm::default());
        app.dialog = Dialog::CreateChatbot;
        assert!(draw(&app, 80, 24).contains("New chatbot"));

        app.dialog = Dialog::ConfirmDeleteChatbot {
            id: "1".into(),
            name: "Helper".into(),
        };
        assert!(draw(&app, 80, 24).contains("Delete \"Helper\""));

        app.dialog = Dialog::Help;
        assert!(draw(&app, 80, 30).contains("new thread"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let mut app = create_test_app();
        app.dialog = Dialog::Help;
        draw(&app, 20, 6);
        app.screen = Screen::Logs;
        draw(&app, 20, 6);
    }
}
