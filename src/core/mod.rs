pub mod agent;
pub mod message;

pub use agent::ChatSession;
pub use message::{ChatMessage, Sender};
