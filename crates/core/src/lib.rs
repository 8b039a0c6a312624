//! Pantry Core - Shared domain types.
//!
//! This crate provides the types shared by every Pantry component:
//! - `server` - Household inventory web application
//! - `cli` - Command-line tools for migrations and maintenance
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. Database encoding for ids is available behind the `sqlite`
//! feature.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, normalized names and addresses, prices, and stock
//!   levels with the stock-ratio ranking

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
