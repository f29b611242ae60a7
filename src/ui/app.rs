use std::time::Duration;

use tokio::sync::mpsc;
use tui_textarea::TextArea;

use crate::core::controller::{ConversationController, PendingSend};
use crate::core::reveal::{RevealEvent, RevealUpdate, Revealer};
use crate::ui::theme::Theme;

/// Everything the chat screen owns: the conversation, the active reveal and
/// the input line. Only the event loop mutates it; rendering reads it.
pub struct ChatApp {
    pub controller: ConversationController,
    pub revealer: Revealer,
    pub input: TextArea<'static>,
    pub theme: Theme,
    pub sidebar_collapsed: bool,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll_from_bottom: u16,
    pub exit_requested: bool,
}

impl ChatApp {
    pub fn new(
        controller: ConversationController,
        reveal_interval: Duration,
        theme: Theme,
    ) -> (Self, mpsc::UnboundedReceiver<(RevealEvent, u64)>) {
        let (revealer, reveal_rx) = Revealer::new(reveal_interval);
        let mut input = TextArea::default();
        input.set_cursor_line_style(ratatui::style::Style::default());
        input.set_style(theme.input_text_style);
        (
            Self {
                controller,
                revealer,
                input,
                theme,
                sidebar_collapsed: false,
                scroll_from_bottom: 0,
                exit_requested: false,
            },
            reveal_rx,
        )
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.input = {
            let mut fresh = TextArea::default();
            fresh.set_cursor_line_style(ratatui::style::Style::default());
            fresh.set_style(self.theme.input_text_style);
            fresh
        };
    }

    /// Start a send of `text`. The input line is cleared only if the send
    /// was accepted.
    pub fn submit(&mut self, text: &str) -> Option<PendingSend> {
        let pending = self.controller.begin_send(text)?;
        self.clear_input();
        self.scroll_to_bottom();
        Some(pending)
    }

    pub fn complete_send(&mut self, pending: PendingSend, result: Result<String, String>) {
        self.controller.complete_send(pending, result);
        self.scroll_to_bottom();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    pub fn new_session(&mut self) {
        self.controller.create_new_session();
        self.scroll_to_bottom();
    }

    /// Move the selection `delta` places through the newest-first session list.
    pub fn cycle_session(&mut self, delta: isize) {
        let sessions = self.controller.sessions();
        if sessions.is_empty() {
            return;
        }
        let current = self
            .controller
            .current_session_id()
            .and_then(|id| sessions.iter().position(|session| session.id == id));
        let target = match current {
            Some(index) => {
                let last = sessions.len() as isize - 1;
                (index as isize + delta).clamp(0, last) as usize
            }
            None if delta > 0 => 0,
            None => return,
        };
        let id = sessions[target].id;
        if self.controller.select_session(id) {
            self.scroll_to_bottom();
        }
    }

    /// Keep the reveal task in step with the controller: start one for the
    /// revealing message of the visible session, cancel when there is none.
    pub fn sync_reveal(&mut self) {
        let current = self.controller.current_session_id();
        let target = self
            .controller
            .revealing_message()
            .filter(|(session_id, _)| Some(*session_id) == current)
            .map(|(_, message)| (message.id, message.content.clone()));

        match target {
            Some((id, _)) if self.revealer.active_message() == Some(id) => {}
            Some((id, content)) => self.revealer.start(id, &content),
            None => self.revealer.cancel(),
        }
    }

    pub fn apply_reveal_event(&mut self, event: RevealEvent, reveal_id: u64) {
        if let RevealUpdate::Completed(message_id) = self.revealer.apply(event, reveal_id) {
            self.controller.finish_reveal(message_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_REVEAL_INTERVAL;

    fn test_app() -> ChatApp {
        let (app, _rx) = ChatApp::new(
            ConversationController::new(),
            DEFAULT_REVEAL_INTERVAL,
            Theme::dark_default(),
        );
        app
    }

    fn open_session(app: &mut ChatApp, text: &str) {
        app.new_session();
        let pending = app.submit(text).expect("send accepted");
        app.complete_send(pending, Ok("ok".to_string()));
        app.controller.finish_reveal(app.controller.current_messages()[1].id);
    }

    #[test]
    fn submit_clears_input_only_when_accepted() {
        let mut app = test_app();
        app.input.insert_str("   ");
        assert!(app.submit(&app.input_text()).is_none());
        assert_eq!(app.input_text(), "   ");

        app.clear_input();
        app.input.insert_str("hello");
        let text = app.input_text();
        assert!(app.submit(&text).is_some());
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn failed_send_surfaces_error() {
        let mut app = test_app();
        let pending = app.submit("hello").unwrap();
        app.complete_send(pending, Err("relay unreachable".to_string()));
        assert!(app.controller.error().is_some());
        assert!(!app.controller.is_in_flight());
    }

    #[test]
    fn cycle_session_walks_newest_first_list() {
        let mut app = test_app();
        open_session(&mut app, "oldest");
        open_session(&mut app, "middle");
        open_session(&mut app, "newest");
        let ids: Vec<_> = app.controller.sessions().iter().map(|s| s.id).collect();
        assert_eq!(app.controller.current_session_id(), Some(ids[0]));

        app.cycle_session(1);
        assert_eq!(app.controller.current_session_id(), Some(ids[1]));
        app.cycle_session(5);
        assert_eq!(app.controller.current_session_id(), Some(ids[2]));
        app.cycle_session(-1);
        assert_eq!(app.controller.current_session_id(), Some(ids[1]));

        app.new_session();
        app.cycle_session(-1);
        assert_eq!(app.controller.current_session_id(), None);
        app.cycle_session(1);
        assert_eq!(app.controller.current_session_id(), Some(ids[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_runs_to_completion_and_clears_flag() {
        let (mut app, mut rx) = ChatApp::new(
            ConversationController::new(),
            DEFAULT_REVEAL_INTERVAL,
            Theme::dark_default(),
        );
        let pending = app.submit("Hello").unwrap();
        app.complete_send(pending, Ok("Hi there".to_string()));
        let reply_id = app.controller.current_messages()[1].id;

        app.sync_reveal();
        assert_eq!(app.revealer.active_message(), Some(reply_id));

        while app.controller.current_messages()[1].revealing {
            let (event, reveal_id) = rx.recv().await.expect("reveal event");
            app.apply_reveal_event(event, reveal_id);
        }
        assert_eq!(app.revealer.active_message(), None);

        app.sync_reveal();
        assert_eq!(app.revealer.active_message(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn new_session_cancels_active_reveal() {
        let (mut app, _rx) = ChatApp::new(
            ConversationController::new(),
            DEFAULT_REVEAL_INTERVAL,
            Theme::dark_default(),
        );
        let pending = app.submit("Hello").unwrap();
        app.complete_send(pending, Ok("Hi there".to_string()));
        app.sync_reveal();
        assert!(app.revealer.active_message().is_some());

        app.new_session();
        app.sync_reveal();
        assert_eq!(app.revealer.active_message(), None);
        assert!(app.controller.revealing_message().is_none());
    }
}
