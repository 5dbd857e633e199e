//! Shared domain types for CodeMentor.
//!
//! This crate contains the domain types used across the CodeMentor backend:
//! users, chat sessions, messages, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
pub mod user;
