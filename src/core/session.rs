use crate::domain::model::{Message, Sender};
use crate::domain::ports::Responder;
use crate::utils::error::Result;
use chrono::Utc;

pub const DEFAULT_WELCOME: &str = "Hello! I'm your AI recycling assistant. I can help you find the best recyclers based on your waste types. What would you like to recycle today?";

/// Append-only conversation log in front of a [`Responder`].
///
/// Message ids come from a per-session counter, so two messages created in
/// the same instant still get distinct ids. History is display-only and never
/// fed back into the responder.
pub struct ChatSession<R: Responder> {
    responder: R,
    messages: Vec<Message>,
    next_id: u64,
}

impl<R: Responder> ChatSession<R> {
    pub fn new(responder: R, welcome: &str) -> Self {
        let mut session = Self {
            responder,
            messages: Vec::new(),
            next_id: 1,
        };
        session.push(Sender::Assistant, welcome.to_string());
        session
    }

    /// Records `input` and the reply to it. Blank input is ignored.
    pub fn send(&mut self, input: &str) -> Option<&Message> {
        if input.trim().is_empty() {
            tracing::debug!("Ignoring blank input");
            return None;
        }

        // The reply is computed before anything is appended.
        let reply = self.responder.respond(input);
        self.push(Sender::User, input.to_string());
        Some(self.push(Sender::Assistant, reply))
    }

    fn push(&mut self, sender: Sender, content: String) -> &Message {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            content,
            sender,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn responder(&self) -> &R {
        &self.responder
    }

    pub fn transcript_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.messages)?)
    }
}
