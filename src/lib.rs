//! Keyword-matching site assistant: a static knowledge base of topics,
//! a response selector over it, and a terminal chat session.

pub mod ai;
pub mod config;
pub mod core;
pub mod logger;
pub mod ui;
