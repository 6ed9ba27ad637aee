//! Shared types for the Shikimori toolkit crates
//!
//! Holds the configuration error type used by binaries and the `Secret`
//! wrapper that keeps OAuth tokens, client secrets and proxy passwords out
//! of logs.

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
