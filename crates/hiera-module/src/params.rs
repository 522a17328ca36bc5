//! Parameter binding for the hiera module
//!
//! Turns the host framework's args document into a [`LookupRequest`].
//! The argument spec matches the module surface: `key` (alias `name`,
//! required), `fact`, `path` (default `hiera`), `context` (mapping of
//! scope to value), `source`. Unknown parameters are rejected; the
//! framework's own `_ansible_*` bookkeeping keys are ignored.

use std::collections::BTreeMap;

use serde_json::Value;

use hiera_core::{Error, LookupRequest, Result};

/// Top-level wrapper key the framework puts around module parameters.
pub const MODULE_ARGS_KEY: &str = "ANSIBLE_MODULE_ARGS";

const KNOWN_PARAMS: &[&str] = &["key", "name", "fact", "path", "context", "source"];

/// Bind a parsed args document to a request.
///
/// `raw` is the full document, i.e. `{"ANSIBLE_MODULE_ARGS": {...}}`.
pub fn bind(raw: &Value) -> Result<LookupRequest> {
    let params = raw
        .get(MODULE_ARGS_KEY)
        .ok_or_else(|| Error::validation(MODULE_ARGS_KEY, "missing args wrapper"))?;
    bind_params(params)
}

/// Bind the inner parameter object.
pub fn bind_params(params: &Value) -> Result<LookupRequest> {
    let params = params
        .as_object()
        .ok_or_else(|| Error::validation(MODULE_ARGS_KEY, "parameters must be an object"))?;

    for name in params.keys() {
        if !KNOWN_PARAMS.contains(&name.as_str()) && !name.starts_with("_ansible_") {
            return Err(Error::validation(
                name.clone(),
                "unsupported parameter for this module",
            ));
        }
    }

    let key = resolve_key(
        optional_string(params.get("key"), "key")?,
        optional_string(params.get("name"), "name")?,
    )?;

    let mut request = LookupRequest::new(key);

    if let Some(fact) = optional_string(params.get("fact"), "fact")? {
        request = request.with_fact(fact);
    }
    if let Some(path) = optional_string(params.get("path"), "path")? {
        request = request.with_path(path);
    }
    if let Some(source) = optional_string(params.get("source"), "source")? {
        request = request.with_source(source);
    }
    request = request.with_context(bind_context(params.get("context"))?);

    request.validate()?;
    Ok(request)
}

/// `name` is an alias of `key`; both set to different values is a
/// binding conflict, matching the framework's alias handling.
fn resolve_key(key: Option<String>, name: Option<String>) -> Result<String> {
    match (key, name) {
        (Some(key), Some(name)) if key != name => Err(Error::validation(
            "key",
            format!("alias `name` conflicts with `key` ({name} != {key})"),
        )),
        (Some(key), _) => Ok(key),
        (None, Some(name)) => Ok(name),
        (None, None) => Err(Error::validation("key", "missing required parameter")),
    }
}

fn bind_context(value: Option<&Value>) -> Result<BTreeMap<String, String>> {
    // Absent or null context means no scope arguments; the default is
    // built fresh per call.
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(BTreeMap::new());
    };

    let object = value
        .as_object()
        .ok_or_else(|| Error::validation("context", "must be a mapping of scope to value"))?;

    let mut context = BTreeMap::new();
    for (scope, value) in object {
        let value = value.as_str().ok_or_else(|| {
            Error::validation("context", format!("value for scope `{scope}` must be a string"))
        })?;
        context.insert(scope.clone(), value.to_string());
    }
    Ok(context)
}

fn optional_string(value: Option<&Value>, field: &str) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::validation(field, "must be a string")),
    }
}
