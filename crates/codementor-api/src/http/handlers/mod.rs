//! HTTP request handlers for the JSON API.

pub mod chats;
pub mod review;
pub mod signup;
