//! The chat turn pipeline and its fallback replies.

pub mod fallback;
pub mod service;

pub use service::ChatService;
