//! Business logic services for the Pantry server.
//!
//! # Services
//!
//! - `auth` - Household and member authentication (Argon2id hashing)

pub mod auth;
