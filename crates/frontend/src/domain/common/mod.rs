//! Общие части страниц модерации

pub mod moderation;

pub use moderation::{ModerationDialog, ModerationState, ModerationTarget};
