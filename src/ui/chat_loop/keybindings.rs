use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::constants::SUGGESTED_PROMPTS;

/// What a key press asks the chat screen to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Quit,
    Submit,
    NewSession,
    PreviousSession,
    NextSession,
    /// Send one of the suggested prompts shown in an empty conversation.
    Suggestion(&'static str),
    ToggleSidebar,
    ScrollUp(u16),
    ScrollDown(u16),
    ScrollToBottom,
    /// Hand the key to the input line.
    Edit,
    None,
}

const PAGE_SCROLL: u16 = 10;

/// Map a key press to an action. `conversation_empty` enables the
/// suggestion shortcuts.
pub fn action_for_key(key: &KeyEvent, conversation_empty: bool) -> ChatAction {
    if key.kind == KeyEventKind::Release {
        return ChatAction::None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => ChatAction::Quit,
        KeyCode::Char('c') if ctrl => ChatAction::Quit,
        KeyCode::Char('n') if ctrl => ChatAction::NewSession,
        KeyCode::Char('b') if ctrl => ChatAction::ToggleSidebar,
        KeyCode::Up if ctrl => ChatAction::PreviousSession,
        KeyCode::Down if ctrl => ChatAction::NextSession,
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => ChatAction::Edit,
        KeyCode::Enter => ChatAction::Submit,
        KeyCode::F(n @ 1..=4) if conversation_empty => {
            ChatAction::Suggestion(SUGGESTED_PROMPTS[usize::from(n - 1)])
        }
        KeyCode::PageUp => ChatAction::ScrollUp(PAGE_SCROLL),
        KeyCode::PageDown => ChatAction::ScrollDown(PAGE_SCROLL),
        KeyCode::End if ctrl => ChatAction::ScrollToBottom,
        KeyCode::F(_) => ChatAction::None,
        _ => ChatAction::Edit,
    }
}
