//! Terminal rendering and input handling for the chat
use crate::core::{ChatMessage, Sender};

pub const PROMPT: &str = "> ";
const USER_LABEL: &str = "You";

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    /// Zero-based suggestion index.
    Suggestion(usize),
    Clear,
    History,
    Help,
    Quit,
    Ignore,
}

/// `/N` picks suggestion N (1-based). Unknown slash words are sent as text.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Ignore;
    }

    match trimmed.to_lowercase().as_str() {
        "/quit" | "/exit" => return Command::Quit,
        "/clear" => return Command::Clear,
        "/history" => return Command::History,
        "/help" | "/?" => return Command::Help,
        _ => {}
    }

    if let Some(n) = trimmed.strip_prefix('/').and_then(|rest| rest.parse::<usize>().ok()) {
        return match n {
            0 => Command::Ignore,
            n => Command::Suggestion(n - 1),
        };
    }

    Command::Send(trimmed.to_string())
}

/// `[HH:MM] Name: first line`, further lines indented under the text.
pub fn render_message(message: &ChatMessage, assistant_name: &str) -> String {
    let label = match message.sender {
        Sender::User => USER_LABEL,
        Sender::Bot => assistant_name,
    };
    let header = format!("[{}] {}: ", message.timestamp.format("%H:%M"), label);
    let indent = " ".repeat(header.chars().count());

    let mut out = String::new();
    for (i, line) in message.text.lines().enumerate() {
        if i == 0 {
            out.push_str(&header);
        } else {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
            }
        }
        out.push_str(line);
    }
    if out.is_empty() {
        out.push_str(header.trim_end());
    }
    out
}

pub fn render_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let mut out = String::from("Suggested questions:");
    for (i, suggestion) in suggestions.iter().enumerate() {
        out.push_str(&format!("\n  /{}  {}", i + 1, suggestion));
    }
    out
}

pub fn render_help(suggestions: &[String]) -> String {
    let mut out = String::from(
        "Commands:\n  /help     show this help\n  /history  show the conversation\n  /clear    start over\n  /quit     leave",
    );
    let listed = render_suggestions(suggestions);
    if !listed.is_empty() {
        out.push_str("\n\n");
        out.push_str(&listed);
    }
    out
}
