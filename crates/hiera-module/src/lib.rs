//! Ansible binary module exposing Hiera lookups as facts.
//!
//! The `hiera` binary follows the framework's binary-module protocol:
//! it receives the path to a JSON args file as its single argument and
//! prints one JSON document to stdout. Parameter binding lives in
//! [`params`], the protocol shapes in [`host`], and the subprocess work
//! in the `hiera-core` crate.

pub mod error;
pub mod host;
pub mod params;

pub use error::{Error, Result};
pub use host::{AnsibleHost, HostIo};
pub use params::{MODULE_ARGS_KEY, bind};
