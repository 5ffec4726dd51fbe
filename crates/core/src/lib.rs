//! Encore Core - Shared types library.
//!
//! This crate provides common types used across all Encore components:
//! - `site` - Server-rendered booking site
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the genre-tag list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
