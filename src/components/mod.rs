//! UI components.

pub mod emoji_hunt;
