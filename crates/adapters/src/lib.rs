//! Host-runtime adapters.
//!
//! The only adapter shipped here is an in-memory stand-in for the hosted
//! tabletop platform, faithful enough for end-to-end tests: object tables,
//! a chat log, handout notes, and per-character attribute sheets.

mod in_memory;

pub use in_memory::{InMemoryHost, PlacedObject};
