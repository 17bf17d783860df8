//! Общие типы для всех агрегатов админки

pub mod moderation;
pub mod refs;

// Re-exports
pub use moderation::{ModerationAction, ModerationError, ModerationForm, ModerationRequest};
pub use refs::{ListResponse, MatchRef, PersonRef, TeamRef};
