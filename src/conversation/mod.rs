//! Per-user conversation state fed to the language model.

pub mod prompts;
pub mod store;

pub use store::ConversationStore;
