//! # camscout-backend
//!
//! HTTP client for the camera backend API and the JSON models it returns.

pub mod client;
pub mod models;

pub use client::{ApiClient, SEARCH_RADIUS_METERS};
