//! Application services for the two tabletop add-ons.
//!
//! The status marker manager and the encumbrance custodian are independent
//! reactive handler sets over the host's object store; the [`router`] wires
//! both to the host's chat and object-lifecycle events.

pub mod chat;
pub mod error;
pub mod router;
pub mod services;

pub use error::ScriptError;
pub use router::ScriptRouter;
