//! Hiera lookup invocation for the hiera fact module.
//!
//! This crate wraps the external `hiera` binary: it builds an argument
//! vector from a [`LookupRequest`], runs the binary as a child process,
//! and hands back a [`LookupOutcome`] with the trimmed stdout text.
//!
//! The hierarchical merge logic lives entirely inside the external
//! binary; nothing here interprets Hiera data or its configuration
//! format. The seam between "what to run" and "how to run it" is the
//! [`CommandRunner`] trait, so tests can substitute a recording fake
//! for the real process spawn.

pub mod error;
pub mod invoker;
pub mod logging;
pub mod request;

pub use error::{Error, Result};
pub use invoker::{CommandRunner, LookupInvoker, LookupOutcome, ProcessRunner};
pub use request::{LookupRequest, DEFAULT_EXECUTABLE};
