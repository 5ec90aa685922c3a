//! Rule-based wellness coach.
//!
//! No model behind this: replies come from an ordered set of keyword
//! rules and fixed templates interpolated with the user's profile and
//! journal summary. Every reply depends only on the triggering message
//! and stored records, never on prior turns.

pub mod chat;
pub mod rules;
pub mod templates;

pub use chat::{ChatMessage, ChatRole, ChatService};
pub use rules::{RulesEngine, Topic};
