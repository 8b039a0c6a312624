//! Core types for Pantry.
//!
//! This module provides type-safe wrappers for the household inventory domain.

pub mod address;
pub mod id;
pub mod name;
pub mod price;
pub mod stock;

pub use address::{Address, AddressError, AddressField};
pub use id::*;
pub use name::{Name, NameError, normalize};
pub use price::{Price, PriceError};
pub use stock::{StockError, StockField, StockLevels, StockRatio, rank_by_scarcity};
