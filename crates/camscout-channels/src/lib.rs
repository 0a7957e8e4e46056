//! # camscout-channels
//!
//! Messaging platform integrations for camscout.

pub mod telegram;
pub mod utils;
