//! Domain models for the Pantry server.
//!
//! Models hold validated core types (`Name`, `Address`, `StockLevels`) and are
//! built by the repositories in [`crate::db`] from stored rows.

pub mod household;
pub mod item;
pub mod member;
pub mod session;
pub mod store;

pub use household::Household;
pub use item::{Item, NewItem};
pub use member::Member;
pub use session::SessionContext;
pub use store::{NewStore, Store};
