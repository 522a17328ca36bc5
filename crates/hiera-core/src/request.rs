//! Lookup request model and command-line construction
//!
//! A [`LookupRequest`] captures one fact-resolution call: the Hiera key,
//! the destination fact name, the executable to run, the scope context,
//! and an optional alternate Hiera config file. Requests are built once
//! and never mutated afterwards.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Executable name used when no explicit path is given; resolved via
/// the caller's search path.
pub const DEFAULT_EXECUTABLE: &str = "hiera";

/// One fact-resolution call against the external Hiera binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// The Hiera variable name to resolve.
    pub key: String,
    /// Destination fact name; falls back to `key` when unset or empty.
    pub fact: Option<String>,
    /// Executable to invoke.
    pub path: String,
    /// Scope variables, rendered as `scope=value` argument tokens.
    ///
    /// A `BTreeMap` keeps token order deterministic; Hiera performs its
    /// own hierarchy walk, so order is not semantically significant.
    pub context: BTreeMap<String, String>,
    /// Alternate Hiera config file, rendered as `-c <source>`.
    pub source: Option<String>,
}

impl LookupRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fact: None,
            path: DEFAULT_EXECUTABLE.to_string(),
            context: BTreeMap::new(),
            source: None,
        }
    }

    pub fn with_fact(mut self, fact: impl Into<String>) -> Self {
        self.fact = Some(fact.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(scope.into(), value.into());
        self
    }

    pub fn with_context(mut self, context: BTreeMap<String, String>) -> Self {
        self.context = context;
        self
    }

    /// The effective fact name: `fact` when set and non-empty, else `key`.
    pub fn fact_name(&self) -> &str {
        match self.fact.as_deref() {
            Some(fact) if !fact.is_empty() => fact,
            _ => &self.key,
        }
    }

    /// Check the request before anything is spawned.
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(Error::validation("key", "a non-empty key is required"));
        }
        if self.path.is_empty() {
            return Err(Error::validation("path", "executable path must not be empty"));
        }
        Ok(())
    }

    /// Argument vector passed to the executable, excluding the program
    /// itself: `[-c <source>] <key> [<scope>=<value> ...]`.
    ///
    /// Arguments stay a discrete vector all the way to spawn; no shell
    /// ever interprets scope values.
    pub fn argv(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(3 + self.context.len());
        if let Some(source) = &self.source {
            args.push("-c".to_string());
            args.push(source.clone());
        }
        args.push(self.key.clone());
        for (scope, value) in &self.context {
            args.push(format!("{scope}={value}"));
        }
        args
    }
}
