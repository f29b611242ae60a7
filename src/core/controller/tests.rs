use super::*;
use std::sync::Mutex;

use crate::core::message::Role;

struct ScriptedRelay {
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, Vec<Message>)>>,
}

impl ScriptedRelay {
    fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, Vec<Message>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatRelay for ScriptedRelay {
    async fn send(
        &self,
        message: &str,
        history: &[Message],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.calls
            .lock()
            .unwrap()
            .push((message.to_string(), history.to_vec()));
        self.reply.clone().map_err(Into::into)
    }
}

#[tokio::test]
async fn first_send_opens_named_session_and_appends_reply() {
    let mut controller = ConversationController::new();
    let relay = ScriptedRelay::replying("Hi there");

    let reply_id = controller
        .send_message(&relay, "Hello")
        .await
        .expect("reply appended");

    assert_eq!(controller.sessions().len(), 1);
    let session = &controller.sessions()[0];
    assert_eq!(session.name, "Hello");
    assert_eq!(controller.current_session_id(), Some(session.id));

    let messages = controller.current_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "Hello");
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, "Hi there");
    assert_eq!(messages[1].id, reply_id);
    assert!(messages[1].revealing);

    assert!(controller.finish_reveal(reply_id));
    assert!(!controller.current_messages()[1].revealing);
    assert!(!controller.is_in_flight());
    assert!(controller.error().is_none());
}

#[test]
fn user_message_is_appended_before_relay_call() {
    let mut controller = ConversationController::new();
    let pending = controller.begin_send("  Hello  ").expect("send starts");

    assert_eq!(pending.message, "Hello");
    assert!(pending.history.is_empty());
    assert!(controller.is_in_flight());
    let messages = controller.current_messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Hello");
    assert_eq!(messages[0].id, pending.user_message_id);
}

#[test]
fn blank_input_is_ignored() {
    let mut controller = ConversationController::new();
    assert!(controller.begin_send("").is_none());
    assert!(controller.begin_send("   \n\t").is_none());
    assert!(controller.sessions().is_empty());
    assert!(!controller.is_in_flight());
    assert!(controller.error().is_none());
}

#[test]
fn send_while_in_flight_is_a_no_op() {
    let mut controller = ConversationController::new();
    let pending = controller.begin_send("first").expect("send starts");

    assert!(controller.begin_send("second").is_none());
    assert_eq!(controller.current_messages().len(), 1);

    controller.complete_send(pending, Ok::<_, String>("done".to_string()));
    assert_eq!(controller.current_messages().len(), 2);
    assert!(controller.begin_send("second").is_some());
}

#[tokio::test]
async fn failed_relay_sets_error_and_appends_nothing() {
    let mut controller = ConversationController::new();
    let relay = ScriptedRelay::failing("connection refused");

    assert!(controller.send_message(&relay, "Hello").await.is_none());

    assert_eq!(controller.error(), Some(SEND_FAILED_MESSAGE));
    assert!(!controller.is_in_flight());
    let messages = controller.current_messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::User);
}

#[tokio::test]
async fn next_send_clears_previous_error() {
    let mut controller = ConversationController::new();
    controller
        .send_message(&ScriptedRelay::failing("down"), "Hello")
        .await;
    assert!(controller.error().is_some());

    let pending = controller.begin_send("retry").expect("send starts");
    assert!(controller.error().is_none());
    controller.complete_send(pending, Ok::<_, String>("ok".to_string()));
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn history_carries_prior_messages_only() {
    let mut controller = ConversationController::new();
    let relay = ScriptedRelay::replying("reply");

    controller.send_message(&relay, "one").await;
    controller.send_message(&relay, "two").await;

    let calls = relay.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "one");
    assert!(calls[0].1.is_empty());
    assert_eq!(calls[1].0, "two");
    let history: Vec<&str> = calls[1].1.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(history, vec!["one", "reply"]);
}

#[tokio::test]
async fn long_first_message_names_session_with_ellipsis() {
    let mut controller = ConversationController::new();
    let text = "Please summarise the quarterly report now";
    assert_eq!(text.chars().count(), 41);
    controller
        .send_message(&ScriptedRelay::replying("ok"), text)
        .await;

    assert_eq!(controller.sessions()[0].name, "Please summarise the quar...");
}

#[tokio::test]
async fn session_name_is_fixed_after_first_message() {
    let mut controller = ConversationController::new();
    let relay = ScriptedRelay::replying("ok");
    controller.send_message(&relay, "Opening line").await;
    controller.send_message(&relay, "Something else entirely").await;

    assert_eq!(controller.sessions().len(), 1);
    assert_eq!(controller.sessions()[0].name, "Opening line");
}

#[tokio::test]
async fn new_session_starts_after_create_new_session() {
    let mut controller = ConversationController::new();
    let relay = ScriptedRelay::replying("ok");
    controller.send_message(&relay, "first chat").await;
    let first = controller.current_session_id().unwrap();

    controller.create_new_session();
    assert_eq!(controller.current_session_id(), None);
    assert!(controller.current_messages().is_empty());
    assert_eq!(controller.sessions().len(), 1);

    controller.send_message(&relay, "second chat").await;
    let second = controller.current_session_id().unwrap();
    assert_ne!(first, second);
    assert_eq!(controller.sessions()[0].id, second);
    assert_eq!(controller.sessions()[0].name, "second chat");
}

#[tokio::test]
async fn selecting_unknown_session_keeps_current() {
    let mut controller = ConversationController::new();
    controller
        .send_message(&ScriptedRelay::replying("ok"), "hello")
        .await;
    let current = controller.current_session_id();

    assert!(!controller.select_session(SessionId(4242)));
    assert_eq!(controller.current_session_id(), current);
}

#[tokio::test]
async fn switching_sessions_settles_pending_reveal() {
    let mut controller = ConversationController::new();
    let relay = ScriptedRelay::replying("ok");
    controller.send_message(&relay, "first").await;
    let first = controller.current_session_id().unwrap();
    controller.create_new_session();
    let reply = controller.send_message(&relay, "second").await.unwrap();
    assert!(controller.revealing_message().is_some());

    assert!(controller.select_session(first));
    assert!(controller.revealing_message().is_none());
    assert!(!controller.finish_reveal(reply));
}

#[test]
fn empty_reply_is_replaced_with_placeholder() {
    let mut controller = ConversationController::new();
    let pending = controller.begin_send("hello").unwrap();
    controller.complete_send(pending, Ok::<_, String>(String::new()));
    assert_eq!(
        controller.current_messages()[1].content,
        EMPTY_REPLY_PLACEHOLDER
    );
}
