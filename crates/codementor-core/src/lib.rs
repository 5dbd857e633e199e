//! Business logic and port definitions for CodeMentor.
//!
//! This crate defines the `Storage` port (trait) that the infrastructure
//! layer implements, plus the services built on top of it: signup, turn
//! submission, and per-user chat listing. It depends only on
//! `codementor-types` -- never on `codementor-infra` or any database/IO
//! crate.

pub mod llm;
pub mod query;
pub mod session;
pub mod signup;
pub mod storage;

#[cfg(test)]
mod fake_storage;
