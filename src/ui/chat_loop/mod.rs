//! Main chat event loop
//!
//! Terminal events, relay results and reveal ticks all arrive on channels and
//! are applied to the [`ChatApp`] by this loop alone.

mod keybindings;
mod lifecycle;

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;
use tracing::debug;

use self::keybindings::{action_for_key, ChatAction};
use self::lifecycle::{restore_terminal, setup_terminal};
use crate::core::controller::{ChatRelay, ConversationController, PendingSend};
use crate::ui::app::ChatApp;
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

type RelayResult = (PendingSend, Result<String, String>);

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

/// Run the relay call for `pending` off the loop and report back on `result_tx`.
fn dispatch_send(
    relay: Arc<dyn ChatRelay>,
    pending: PendingSend,
    result_tx: mpsc::UnboundedSender<RelayResult>,
) {
    tokio::spawn(async move {
        let result = relay
            .send(&pending.message, &pending.history)
            .await
            .map_err(|err| err.to_string());
        let _ = result_tx.send((pending, result));
    });
}

/// Apply a key press. Returns a send to dispatch, if the key started one.
fn handle_key(app: &mut ChatApp, key: KeyEvent) -> Option<PendingSend> {
    let conversation_empty = app.controller.current_messages().is_empty();
    match action_for_key(&key, conversation_empty) {
        ChatAction::Quit => {
            app.exit_requested = true;
            None
        }
        ChatAction::Submit => {
            let text = app.input_text();
            app.submit(&text)
        }
        ChatAction::Suggestion(prompt) => app.submit(prompt),
        ChatAction::NewSession => {
            app.new_session();
            None
        }
        ChatAction::PreviousSession => {
            app.cycle_session(-1);
            None
        }
        ChatAction::NextSession => {
            app.cycle_session(1);
            None
        }
        ChatAction::ToggleSidebar => {
            app.sidebar_collapsed = !app.sidebar_collapsed;
            None
        }
        ChatAction::ScrollUp(lines) => {
            app.scroll_up(lines);
            None
        }
        ChatAction::ScrollDown(lines) => {
            app.scroll_down(lines);
            None
        }
        ChatAction::ScrollToBottom => {
            app.scroll_to_bottom();
            None
        }
        ChatAction::Edit => {
            if !app.controller.is_in_flight() {
                app.input.input(key);
            }
            None
        }
        ChatAction::None => None,
    }
}

fn handle_ui_event(app: &mut ChatApp, event: UiEvent) -> Option<PendingSend> {
    match event {
        UiEvent::Crossterm(Event::Key(key)) => handle_key(app, key),
        UiEvent::Crossterm(Event::Paste(text)) => {
            if !app.controller.is_in_flight() {
                app.input.insert_str(text);
            }
            None
        }
        UiEvent::Crossterm(_) => None,
    }
}

pub async fn run_chat(
    relay: Arc<dyn ChatRelay>,
    reveal_interval: Duration,
) -> Result<(), Box<dyn Error>> {
    let (mut app, mut reveal_rx) = ChatApp::new(
        ConversationController::new(),
        reveal_interval,
        Theme::default(),
    );

    let mut terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<RelayResult>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let result = loop {
        if let Err(err) = terminal.draw(|f| ui(f, &app)) {
            break Err(err.into());
        }
        if app.exit_requested {
            break Ok(());
        }

        tokio::select! {
            Some(event) = event_rx.recv() => {
                if let Some(pending) = handle_ui_event(&mut app, event) {
                    debug!(session = %pending.session_id, "dispatching chat send");
                    dispatch_send(relay.clone(), pending, result_tx.clone());
                }
            }
            Some((pending, outcome)) = result_rx.recv() => {
                app.complete_send(pending, outcome);
            }
            Some((event, reveal_id)) = reveal_rx.recv() => {
                app.apply_reveal_event(event, reveal_id);
            }
            else => break Ok(()),
        }

        app.sync_reveal();
    };

    event_reader_handle.abort();
    app.revealer.cancel();
    restore_terminal(&mut terminal)?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{DEFAULT_REVEAL_INTERVAL, SUGGESTED_PROMPTS};
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn test_app() -> ChatApp {
        let (app, _rx) = ChatApp::new(
            ConversationController::new(),
            DEFAULT_REVEAL_INTERVAL,
            Theme::default(),
        );
        app
    }

    fn press(app: &mut ChatApp, code: KeyCode) -> Option<PendingSend> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut ChatApp, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_then_enter_starts_a_send() {
        let mut app = test_app();
        type_text(&mut app, "Hello");
        let pending = press(&mut app, KeyCode::Enter).expect("send started");
        assert_eq!(pending.message, "Hello");
        assert!(pending.history.is_empty());
        assert_eq!(app.input_text(), "");
        assert!(app.controller.is_in_flight());
    }

    #[test]
    fn typing_is_ignored_while_in_flight() {
        let mut app = test_app();
        type_text(&mut app, "Hello");
        press(&mut app, KeyCode::Enter).unwrap();

        type_text(&mut app, "again");
        assert_eq!(app.input_text(), "");
        assert!(press(&mut app, KeyCode::Enter).is_none());

        handle_ui_event(&mut app, UiEvent::Crossterm(Event::Paste("pasted".into())));
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn function_key_sends_suggested_prompt_in_empty_conversation() {
        let mut app = test_app();
        let pending = press(&mut app, KeyCode::F(2)).expect("suggestion sent");
        assert_eq!(pending.message, SUGGESTED_PROMPTS[1]);
        app.complete_send(pending, Ok("sure".to_string()));

        assert!(press(&mut app, KeyCode::F(2)).is_none());
    }

    #[test]
    fn escape_requests_exit() {
        let mut app = test_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.exit_requested);
    }

    #[test]
    fn paste_goes_into_input() {
        let mut app = test_app();
        handle_ui_event(
            &mut app,
            UiEvent::Crossterm(Event::Paste("line one".to_string())),
        );
        assert_eq!(app.input_text(), "line one");
    }
}
