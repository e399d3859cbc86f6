//! # cofog-assistant
//!
//! A chat assistant that finds budget functional-category codes (Latvian Cabinet
//! Regulation No. 934, aligned with COFOG) by keyword retrieval over a folder of
//! pre-chunked text files and a chat-completion model.
//!
//! ## Turn pipeline
//!
//! ```text
//!   message ──► is_generic? ──yes──► canned answer
//!                  │ no
//!                  ▼
//!        store.add_message(user)
//!                  │
//!                  ▼
//!      search primary folders ──(broad scope or no hits)──► + secondary folders
//!                  │
//!                  ▼
//!        top 3 fragments → system context entry
//!                  │
//!                  ▼
//!        LLM(full history) ──ok──► store.add_message(assistant) ──► reply
//!                  │ error
//!                  ▼
//!            fallback reply (nothing stored)
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, corpus, conversations and LLM
//! - [`models`] - Shared data types: `Fragment`, `Role`, `ChatMessage`, request/response types
//! - [`search::classify`] - Generic / broad-scope query heuristics
//! - [`search::scorer`] - Tokenizer and keyword relevance score
//! - [`search::engine`] - Folder scan, ranking and top-K selection
//! - [`conversation`] - Bounded per-user histories and the fixed prompts
//! - [`llm`] - Chat client trait, error taxonomy and the HTTP implementation
//! - [`chat`] - The turn orchestrator and its fallback replies
//! - [`api`] - Axum handlers for chat, reset, health and WebSocket
//! - [`state`] - Shared application state

pub mod api;
pub mod chat;
pub mod config;
pub mod conversation;
pub mod llm;
pub mod models;
pub mod search;
pub mod state;
