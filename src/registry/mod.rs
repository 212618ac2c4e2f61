//! # User Registry
//!
//! The authoritative in-memory store of [`User`] records keyed by id.
//!
//! Every read and write goes through a single `RwLock`, so a lookup either
//! observes a complete prior insert or none of it. The registry is constructed
//! explicitly and shared by `Arc`; there is no process-wide instance.

mod errors;
mod registry;
mod user;

pub use errors::{RegistryError, RegistryResult};
pub use registry::{PutOutcome, UserRegistry, UserSnapshot};
pub use user::{User, UserId};
