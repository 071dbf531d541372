//! Keyboard handling for the App.
//!
//! Open dialogs take every key first; otherwise keys are routed by screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::FormField;
use crate::traits::HttpClient;
use crate::widgets::WidgetInput;

use super::{App, Dialog, Screen};

impl<H: HttpClient + 'static> App<H> {
    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        if key.code == KeyCode::F(1) {
            self.dialog = Dialog::Help;
            return;
        }

        if self.dialog.is_open() {
            self.handle_dialog_key(key);
            return;
        }

        match self.screen {
            Screen::ChatbotList => self.handle_list_key(key),
            Screen::Chat => self.handle_chat_key(key, ctrl),
            Screen::Settings => self.handle_settings_key(key, ctrl),
            Screen::Logs => self.handle_logs_key(key),
        }
    }

    /// Return to the chatbot list.
    pub fn navigate_to_list(&mut self) {
        self.screen = Screen::ChatbotList;
        self.directory.clear_messages();
    }

    // ========================================================================
    // Dialogs
    // ========================================================================

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match self.dialog.clone() {
            Dialog::None => {}
            Dialog::Help => self.dialog = Dialog::None,
            Dialog::CreateChatbot => self.handle_form_key(key),
            Dialog::ConfirmDeleteChatbot { id, .. } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.dialog = Dialog::None;
                    self.delete_chatbot(id);
                }
                KeyCode::Char('n') | KeyCode::Esc => self.dialog = Dialog::None,
                _ => {}
            },
            Dialog::ConfirmDeleteSetting { key: setting } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.dialog = Dialog::None;
                    self.delete_setting(&setting);
                }
                KeyCode::Char('n') | KeyCode::Esc => self.dialog = Dialog::None,
                _ => {}
            },
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let type_count = self.directory.types().len();
        if matches!(key.code, KeyCode::Esc) {
            self.close_dialog();
            return;
        }
        if matches!(key.code, KeyCode::Enter) {
            self.submit_new_chatbot();
            return;
        }
        let Some(form) = self.directory.form.as_mut() else {
            self.dialog = Dialog::None;
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.next().next(),
            KeyCode::Left if form.focus == FormField::Type => form.cycle_type(false, type_count),
            KeyCode::Right if form.focus == FormField::Type => form.cycle_type(true, type_count),
            KeyCode::Char(' ') if form.focus == FormField::Type => {
                form.cycle_type(true, type_count)
            }
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
    }

    // ========================================================================
    // Screens
    // ========================================================================

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('?') => self.dialog = Dialog::Help,
            KeyCode::Up | KeyCode::Char('k') => self.directory.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.directory.select_next(),
            KeyCode::Enter | KeyCode::Char('c') => self.open_chat(),
            KeyCode::Char('s') => self.open_settings(),
            KeyCode::Char('l') => self.open_logs(),
            KeyCode::Char('n') => self.open_create_form(),
            KeyCode::Char('r') => self.refresh_chatbots(),
            KeyCode::Char('d') => {
                if let Some(chatbot) = self.directory.selected() {
                    self.dialog = Dialog::ConfirmDeleteChatbot {
                        id: chatbot.id.clone(),
                        name: chatbot.name.clone(),
                    };
                }
            }
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Esc => self.navigate_to_list(),
            KeyCode::Char('n') if ctrl => self.new_thread(),
            KeyCode::Enter => self.send_message(),
            KeyCode::Backspace => self.chat.pop_char(),
            KeyCode::Char(c) if !ctrl => self.chat.push_char(c),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Esc => self.navigate_to_list(),
            KeyCode::Char('s') if ctrl => self.save_settings(),
            KeyCode::Char('r') if ctrl => self.reload_settings(),
            KeyCode::Char('d') if ctrl => {
                if let Some(setting) = self.focused_setting_key() {
                    self.dialog = Dialog::ConfirmDeleteSetting {
                        key: setting.to_string(),
                    };
                }
            }
            KeyCode::Up => self.settings_cursor = self.settings_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.settings_cursor + 1 < self.settings.settings().len() {
                    self.settings_cursor += 1;
                }
            }
            KeyCode::Left => self.adjust_focused_setting(&[WidgetInput::Decrease]),
            KeyCode::Right => self.adjust_focused_setting(&[WidgetInput::Increase]),
            KeyCode::Enter => self.adjust_focused_setting(&[WidgetInput::Toggle]),
            KeyCode::Backspace => self.adjust_focused_setting(&[WidgetInput::Backspace]),
            // Space types into text fields and flips everything else
            KeyCode::Char(' ') if !ctrl => {
                self.adjust_focused_setting(&[WidgetInput::Char(' '), WidgetInput::Toggle])
            }
            KeyCode::Char(c) if !ctrl => self.adjust_focused_setting(&[WidgetInput::Char(c)]),
            _ => {}
        }
    }

    /// Feed the focused setting's widget the first input it accepts.
    fn adjust_focused_setting(&mut self, inputs: &[WidgetInput]) {
        let Some(key) = self.focused_setting_key().map(str::to_string) else {
            return;
        };
        let Some(setting) = self.settings.settings().get(&key) else {
            return;
        };
        let value = inputs
            .iter()
            .find_map(|input| self.widgets.adjust(setting, &self.widget_ctx, *input));
        if let Some(value) = value {
            self.settings.set_local(&key, value);
        }
    }

    fn handle_logs_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.navigate_to_list(),
            KeyCode::Char('?') => self.dialog = Dialog::Help,
            KeyCode::Up | KeyCode::Char('k') => self.logs.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.logs.select_next(),
            KeyCode::PageDown | KeyCode::Char('J') => self.logs.scroll_down(),
            KeyCode::PageUp | KeyCode::Char('K') => self.logs.scroll_up(),
            KeyCode::Char('r') => self.reload_logs(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::create_test_app;
    use super::*;
    use crate::models::{Setting, SettingType, SettingValue, SettingsMap};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn load_settings(app: &mut super::super::App<crate::adapters::MockHttpClient>) {
        let ticket = app.settings.begin_load("b");
        let mut map = SettingsMap::new();
        map.insert(
            "greeting".into(),
            Setting::new("greeting", "hi".into(), SettingType::String),
        );
        map.insert(
            "tone".into(),
            Setting::new("tone", SettingValue::Number(0.5), SettingType::Number),
        );
        map.insert(
            "verbose".into(),
            Setting::new("verbose", SettingValue::Bool(false), SettingType::Boolean),
        );
        app.settings.complete_load(ticket, Ok(map));
        app.screen = Screen::Settings;
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        let mut app = create_test_app();
        app.screen = Screen::Chat;
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_dialog_swallows_next_key() {
        let mut app = create_test_app();
        app.handle_key(press(KeyCode::Char('?')));
        assert_eq!(app.dialog, Dialog::Help);
        app.handle_key(press(KeyCode::Char('q')));
        assert_eq!(app.dialog, Dialog::None);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_chat_typing_and_escape() {
        let mut app = create_test_app();
        app.screen = Screen::Chat;
        app.handle_key(press(KeyCode::Char('h')));
        app.handle_key(press(KeyCode::Char('q')));
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.chat.input(), "h");

        // Without a thread Enter is a no-op
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.chat.input(), "h");

        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen, Screen::ChatbotList);
    }

    #[test]
    fn test_settings_keys_edit_focused_widget() {
        let mut app = create_test_app();
        load_settings(&mut app);

        // Keys are sorted: greeting, tone, verbose
        app.handle_key(press(KeyCode::Char('!')));
        app.handle_key(press(KeyCode::Char(' ')));
        assert_eq!(
            app.settings.settings()["greeting"].value,
            SettingValue::Text("hi! ".into())
        );

        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.settings.settings()["tone"].value, SettingValue::Number(0.55));
        assert!(app.settings.is_dirty("tone"));

        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Char(' ')));
        assert_eq!(app.settings.settings()["verbose"].value, SettingValue::Bool(true));

        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.focused_setting_key(), Some("verbose"));
    }

    #[test]
    fn test_settings_delete_asks_first() {
        let mut app = create_test_app();
        load_settings(&mut app);
        app.handle_key(ctrl('d'));
        assert_eq!(
            app.dialog,
            Dialog::ConfirmDeleteSetting {
                key: "greeting".into()
            }
        );
        app.handle_key(press(KeyCode::Char('n')));
        assert_eq!(app.dialog, Dialog::None);
        assert_eq!(app.settings.settings().len(), 3);
    }

    #[test]
    fn test_create_form_keys() {
        let mut app = create_test_app();
        app.handle_key(press(KeyCode::Char('n')));
        assert_eq!(app.dialog, Dialog::CreateChatbot);

        app.handle_key(press(KeyCode::Char('B')));
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Char('x')));
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Char('d')));
        let form = app.directory.form.as_ref().unwrap();
        assert_eq!(form.name, "B");
        assert_eq!(form.desc, "d");

        // Incomplete (no types loaded): Enter keeps the dialog open
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.dialog, Dialog::CreateChatbot);

        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.dialog, Dialog::None);
        assert!(app.directory.form.is_none());
    }

    #[test]
    fn test_delete_chatbot_requires_selection() {
        let mut app = create_test_app();
        app.handle_key(press(KeyCode::Char('d')));
        assert_eq!(app.dialog, Dialog::None);
    }
}
