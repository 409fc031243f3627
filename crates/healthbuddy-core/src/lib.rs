//! Core logic for Health Buddy: translation resolution, the reply
//! resolution pipeline, and chat orchestration.
//!
//! This crate defines the trait seams (`ReplyDelegate`, `ReplyMatcher`,
//! `ChatRepository`) whose concrete implementations live in
//! healthbuddy-infra; core never depends on infra.

pub mod chat;
pub mod i18n;
pub mod reply;
