//! User data consulted by the listing endpoint.
//!
//! This module handles:
//! - User record and response types
//! - The `UserStore` seam handlers read through
//! - An in-memory store, optionally seeded from a JSON file

pub mod store;
pub mod types;

pub use store::{InMemoryUserStore, UserStore};
pub use types::{User, UsersResponse};
