pub mod knowledge;
pub mod selector;

pub use knowledge::{KnowledgeBase, Topic, TopicTable};
pub use selector::{best_match, select_response, Replies, Responder};
