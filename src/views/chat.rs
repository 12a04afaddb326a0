//! Chat panel
//!
//! Append-only session log. Each send appends the user turn right away, holds
//! the panel busy until the backend answers, then appends exactly one assistant
//! turn: the reply, or a fixed fallback when the call failed.

use crate::client::{ApiClient, ClientResult};
use crate::models::{ChatMessage, ChatReply, Role};

use super::notify::Notifications;

/// Opening assistant turn
pub const GREETING: &str = "Hello! I'm your AI academic planning assistant. I can help you \
manage your time, prioritize assignments, plan study schedules, and provide academic advice. \
How can I assist you today?";

/// Assistant turn appended when the backend call fails
pub const FALLBACK: &str = "I apologize, but I'm having trouble processing your request. \
Please make sure the assistant is configured correctly in the backend.";

/// Offered while the conversation has not started
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "How should I prioritize my assignments?",
    "Can you help me create a study schedule?",
    "What's the best way to manage my time?",
    "How can I balance my course load?",
];

#[derive(Debug)]
pub struct ChatPanel {
    messages: Vec<ChatMessage>,
    input: String,
    busy: bool,
    notifications: Notifications,
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            input: String::new(),
            busy: false,
            notifications: Notifications::new(),
        }
    }
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether input is disabled
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Suggested questions, only until the first user turn
    pub fn suggestions(&self) -> &'static [&'static str] {
        let started = self.messages.iter().any(|m| m.role == Role::User);
        if started {
            &[]
        } else {
            &SUGGESTED_QUESTIONS
        }
    }

    /// Put a suggested question into the input box
    pub fn use_suggestion(&mut self, index: usize) -> bool {
        match self.suggestions().get(index) {
            Some(question) => {
                self.input = question.to_string();
                true
            }
            None => false,
        }
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Append the user turn and go busy. Returns the text to send, or `None`
    /// when the input is blank or a send is already in flight.
    pub fn begin_send(&mut self, text: &str) -> Option<String> {
        if self.busy || text.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        self.input.clear();
        self.busy = true;
        Some(text.to_string())
    }

    /// Append the assistant turn for a finished send and re-enable input
    pub fn finish_send(&mut self, result: ClientResult<ChatReply>) {
        match result {
            Ok(reply) => {
                self.messages.push(ChatMessage {
                    role: Role::Assistant,
                    content: reply.response,
                    timestamp: reply.timestamp,
                });
            }
            Err(e) => {
                self.notifications.error(
                    e.detail()
                        .map(str::to_string)
                        .unwrap_or_else(|| "Failed to get response from AI".to_string()),
                );
                self.messages.push(ChatMessage::assistant(FALLBACK));
            }
        }
        self.busy = false;
    }

    /// Send one message and wait for the reply. Returns whether a request was made.
    pub async fn send(&mut self, client: &ApiClient, text: &str) -> bool {
        let Some(message) = self.begin_send(text) else {
            return false;
        };

        let result = client.chat().send_message(&message).await;
        self.finish_send(result);
        true
    }

    /// Send whatever is in the input box
    pub async fn submit_input(&mut self, client: &ApiClient) -> bool {
        let text = self.input.clone();
        self.send(client, &text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, Session};
    use chrono::NaiveDate;

    #[test]
    fn test_starts_with_greeting_and_suggestions() {
        let panel = ChatPanel::new();
        assert_eq!(panel.messages().len(), 1);
        assert_eq!(panel.messages()[0].role, Role::Assistant);
        assert_eq!(panel.messages()[0].content, GREETING);
        assert_eq!(panel.suggestions().len(), 4);
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut panel = ChatPanel::new();
        assert_eq!(panel.begin_send("   "), None);
        assert_eq!(panel.messages().len(), 1);
        assert!(!panel.is_busy());
    }

    #[test]
    fn test_busy_blocks_second_send() {
        let mut panel = ChatPanel::new();
        assert!(panel.begin_send("first").is_some());
        assert!(panel.is_busy());
        assert_eq!(panel.begin_send("second"), None);
        assert!(panel.suggestions().is_empty());
    }

    #[test]
    fn test_reply_appended_with_backend_timestamp() {
        let mut panel = ChatPanel::new();
        panel.begin_send("Plan my week");

        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        panel.finish_send(Ok(ChatReply {
            response: "Start with the essay.".to_string(),
            timestamp: at,
        }));

        let last = panel.messages().last().unwrap();
        assert_eq!(last.content, "Start with the essay.");
        assert_eq!(last.timestamp, at);
        assert!(!panel.is_busy());
    }

    #[test]
    fn test_failure_uses_backend_detail() {
        let mut panel = ChatPanel::new();
        panel.begin_send("Hi");
        panel.finish_send(Err(ClientError::Api {
            status: 500,
            detail: Some("Assistant unavailable".to_string()),
        }));

        assert_eq!(panel.messages().last().unwrap().content, FALLBACK);
        assert_eq!(
            panel.notifications().last().unwrap().message,
            "Assistant unavailable"
        );
    }

    #[test]
    fn test_use_suggestion_fills_input() {
        let mut panel = ChatPanel::new();
        assert!(panel.use_suggestion(1));
        assert_eq!(panel.input(), "Can you help me create a study schedule?");
        assert!(!panel.use_suggestion(9));
    }

    #[tokio::test]
    async fn test_unreachable_backend_appends_one_fallback() {
        let client = ApiClient::new("http://127.0.0.1:9", Session::anonymous()).unwrap();
        let mut panel = ChatPanel::new();

        assert!(panel.send(&client, "Hello").await);

        let messages = panel.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Hello");
        assert_eq!(messages[2].content, FALLBACK);
        assert!(!panel.is_busy());
        assert_eq!(
            panel.notifications().last().unwrap().message,
            "Failed to get response from AI"
        );
    }
}
