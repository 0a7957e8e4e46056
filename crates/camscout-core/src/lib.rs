//! # camscout-core
//!
//! Core types, traits, configuration, coordinate parsing, and error handling
//! for the camscout bot.

pub mod config;
pub mod error;
pub mod geo;
pub mod message;
pub mod traits;
