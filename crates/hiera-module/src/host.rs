//! Host-framework boundary
//!
//! The module talks to its host through the [`HostIo`] trait: one
//! capability to bind raw parameters into a request, one to shape the
//! success payload, one to shape the failure payload. The Ansible
//! implementation speaks the binary-module protocol (JSON args file in,
//! one JSON document on stdout). Tests supply their own impl instead of
//! relying on anything ambient.

use serde_json::{Map, Value, json};

use hiera_core::{LookupOutcome, LookupRequest};

use crate::error::Result;
use crate::params;

/// Parameter binding and result reporting, injected into the module
/// entry point.
pub trait HostIo {
    /// Bind the raw args document to a request.
    fn parse(&self, raw: &Value) -> Result<LookupRequest>;

    /// Shape the success payload for the host.
    fn success(&self, request: &LookupRequest, outcome: &LookupOutcome) -> Value;

    /// Shape the failure payload for the host.
    fn failure(&self, message: &str) -> Value;
}

/// The Ansible binary-module protocol.
///
/// Success mirrors `exit_json`: `changed` is always false (a lookup
/// mutates nothing), the fact lands under `ansible_facts`, and the
/// invocation parameters are echoed back alongside the child's `rc`.
/// Failure mirrors `fail_json`: `failed` plus a message.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsibleHost;

impl HostIo for AnsibleHost {
    fn parse(&self, raw: &Value) -> Result<LookupRequest> {
        Ok(params::bind(raw)?)
    }

    fn success(&self, request: &LookupRequest, outcome: &LookupOutcome) -> Value {
        let mut facts = Map::new();
        facts.insert(outcome.fact.clone(), Value::String(outcome.value.clone()));

        let mut payload = Map::new();
        payload.insert("changed".to_string(), Value::Bool(false));
        payload.insert("ansible_facts".to_string(), Value::Object(facts));
        payload.insert("rc".to_string(), json!(outcome.exit_code));
        payload.insert("path".to_string(), Value::String(request.path.clone()));
        payload.insert("key".to_string(), Value::String(request.key.clone()));
        payload.insert(
            "fact".to_string(),
            Value::String(request.fact_name().to_string()),
        );
        if let Some(source) = &request.source {
            payload.insert("source".to_string(), Value::String(source.clone()));
        }
        if !request.context.is_empty() {
            payload.insert("context".to_string(), json!(request.context));
        }
        Value::Object(payload)
    }

    fn failure(&self, message: &str) -> Value {
        json!({ "failed": true, "msg": message })
    }
}
