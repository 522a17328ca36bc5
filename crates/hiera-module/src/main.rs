//! Entry point for the `hiera` binary module.
//!
//! Invoked by the host framework as `hiera <args-file>`. The args file
//! holds the module parameters under `ANSIBLE_MODULE_ARGS`; the reply
//! is a single JSON document on stdout. Logs go to stderr only.

use std::fs;

use serde_json::Value;
use tracing::debug;

use hiera_core::LookupInvoker;
use hiera_module::error::{Error, Result};
use hiera_module::host::{AnsibleHost, HostIo};

fn main() {
    let _ = hiera_core::logging::init();

    let host = AnsibleHost;
    match run(&host) {
        Ok(payload) => println!("{payload}"),
        Err(e) => {
            println!("{}", host.failure(&e.to_string()));
            std::process::exit(1);
        }
    }
}

fn run(host: &impl HostIo) -> Result<Value> {
    let args_path = std::env::args().nth(1).ok_or(Error::MissingArgsFile)?;
    debug!(%args_path, "reading module args");

    let raw = fs::read_to_string(&args_path).map_err(|source| Error::ArgsFile {
        path: args_path.clone(),
        source,
    })?;
    let document: Value = serde_json::from_str(&raw)?;

    let request = host.parse(&document)?;
    let outcome = LookupInvoker::new().invoke(&request)?;

    Ok(host.success(&request, &outcome))
}
