//! ticket-classifier-rs/lib.rs
//! Routes support tickets into one of two remediation buckets by counting
//! keyword hits in the ticket summary.

pub mod classifier;
pub mod ticket;

pub use classifier::{
    classify, Decision, KeywordScore, TicketClassifier, AI_PATCH_KEYWORDS, VIBE_SCRIPT_KEYWORDS,
};
pub use ticket::{Classification, Ticket, TicketMetadata};
