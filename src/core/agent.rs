use std::collections::VecDeque;
use std::time::Duration;

use uuid::Uuid;

use crate::ai::Responder;
use crate::config::Config;
use crate::core::message::{ChatMessage, Sender};

/// One visitor conversation: bounded history, ids, typing pace.
pub struct ChatSession {
    responder: Responder,
    suggestions: Vec<String>,
    messages: VecDeque<ChatMessage>,
    next_id: u64,
    history_limit: usize,
    typing_delay: Duration,
    session_id: String,
}

impl ChatSession {
    pub fn new(responder: Responder, suggestions: Vec<String>, config: &Config) -> Self {
        let session_id = Uuid::new_v4().to_string();
        log::info!("session {} started", session_id);

        let mut session = Self {
            responder,
            suggestions,
            messages: VecDeque::new(),
            next_id: 1,
            history_limit: config.history_limit,
            typing_delay: config.typing_delay,
            session_id,
        };
        session.push_welcome();
        session
    }

    fn push_welcome(&mut self) {
        let text = self.responder.replies().greeting.clone();
        self.push(text, Sender::Bot);
    }

    fn push(&mut self, text: String, sender: Sender) -> ChatMessage {
        let message = ChatMessage::new(self.next_id, text, sender);
        self.next_id += 1;
        self.messages.push_back(message.clone());

        // Evict the oldest messages past the limit
        while self.messages.len() > self.history_limit {
            self.messages.pop_front();
        }

        message
    }

    /// Records the question and returns the bot's reply. Blank input is
    /// ignored and yields `None`.
    pub async fn send(&mut self, input: &str) -> Option<ChatMessage> {
        // Blank submissions never reach the selector
        if input.trim().is_empty() {
            return None;
        }

        self.push(input.to_string(), Sender::User);

        // Simulated typing pause
        if !self.typing_delay.is_zero() {
            tokio::time::sleep(self.typing_delay).await;
        }

        let reply = self.responder.respond(input);
        log::debug!(
            "session {}: answered {} chars with {} chars",
            self.session_id,
            input.len(),
            reply.len()
        );
        Some(self.push(reply, Sender::Bot))
    }

    /// Sends the suggestion at `index`, as if its text had been typed.
    pub async fn send_suggestion(&mut self, index: usize) -> Option<ChatMessage> {
        let text = self.suggestions.get(index)?.clone();
        self.send(&text).await
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// Drops the conversation and starts over with a fresh welcome. Ids keep counting.
    pub fn clear_history(&mut self) {
        self.messages.clear();
        self.push_welcome();
        log::info!("session {}: history cleared", self.session_id);
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
