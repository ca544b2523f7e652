pub mod chat;

pub use chat::{parse_command, render_help, render_message, render_suggestions, Command, PROMPT};
