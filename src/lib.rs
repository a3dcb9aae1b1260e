//! Games Catalog - client for a browser-style games catalog backend
//!
//! This crate provides:
//! - A typed HTTP client for the catalog API (health, list, multipart create)
//! - The catalog view state: game list, new-game draft, image preview, connection banner
//! - A plain-text renderer for the view

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod preview;
pub mod utils;
pub mod view;
