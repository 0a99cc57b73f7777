//! Query pass-through options.
//!
//! The client never interprets query configuration; it carries these values
//! verbatim to whichever query subsystem the driver fronts.

use std::collections::BTreeMap;

use serde_json::Value;

/// Scope context for a query executed at bucket/scope level rather than at
/// cluster level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    /// Bucket the query runs against.
    pub bucket: String,
    /// Scope within the bucket.
    pub scope: String,
}

impl QueryContext {
    /// Creates a new scope context.
    pub fn new(bucket: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            scope: scope.into(),
        }
    }
}

/// Options forwarded, uninterpreted, to the query subsystem.
///
/// Mirrors the option surface of the underlying store's query service:
/// positional and named parameters, a consistency token, and
/// profiling/ad-hoc flags.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Positional statement parameters ($1, $2, ...).
    pub positional_params: Vec<Value>,
    /// Named statement parameters ($name).
    pub named_params: BTreeMap<String, Value>,
    /// Opaque consistency token the store should wait for.
    pub consistency_token: Option<String>,
    /// Caller-supplied context id for tracing the query server-side.
    pub client_context_id: Option<String>,
    /// Whether the store should return execution metrics.
    pub metrics: bool,
    /// Whether the store should profile execution phases.
    pub profile: bool,
    /// Whether the statement is ad-hoc (not eligible for plan reuse).
    pub adhoc: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            positional_params: Vec::new(),
            named_params: BTreeMap::new(),
            consistency_token: None,
            client_context_id: None,
            metrics: false,
            profile: false,
            adhoc: true,
        }
    }
}

impl QueryOptions {
    /// Creates options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional parameter.
    pub fn positional_param(mut self, value: impl Into<Value>) -> Self {
        self.positional_params.push(value.into());
        self
    }

    /// Sets a named parameter.
    pub fn named_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named_params.insert(name.into(), value.into());
        self
    }

    /// Sets the consistency token.
    pub fn consistency_token(mut self, token: impl Into<String>) -> Self {
        self.consistency_token = Some(token.into());
        self
    }

    /// Sets the client context id.
    pub fn client_context_id(mut self, id: impl Into<String>) -> Self {
        self.client_context_id = Some(id.into());
        self
    }

    /// Enables or disables execution metrics.
    pub fn metrics(mut self, metrics: bool) -> Self {
        self.metrics = metrics;
        self
    }

    /// Enables or disables execution profiling.
    pub fn profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    /// Marks the statement as ad-hoc or prepared.
    pub fn adhoc(mut self, adhoc: bool) -> Self {
        self.adhoc = adhoc;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_defaults() {
        let opts = QueryOptions::new();
        assert!(opts.positional_params.is_empty());
        assert!(opts.named_params.is_empty());
        assert!(opts.consistency_token.is_none());
        assert!(!opts.metrics);
        assert!(!opts.profile);
        assert!(opts.adhoc);
    }

    #[test]
    fn test_options_builder() {
        let opts = QueryOptions::new()
            .positional_param("john")
            .positional_param(10)
            .named_param("active", true)
            .consistency_token("tok-42")
            .client_context_id("my-query-ctx")
            .metrics(true)
            .profile(true)
            .adhoc(false);

        assert_eq!(opts.positional_params, vec![json!("john"), json!(10)]);
        assert_eq!(opts.named_params.get("active"), Some(&json!(true)));
        assert_eq!(opts.consistency_token.as_deref(), Some("tok-42"));
        assert_eq!(opts.client_context_id.as_deref(), Some("my-query-ctx"));
        assert!(opts.metrics);
        assert!(opts.profile);
        assert!(!opts.adhoc);
    }

    #[test]
    fn test_query_context() {
        let ctx = QueryContext::new("inventory", "_default");
        assert_eq!(ctx.bucket, "inventory");
        assert_eq!(ctx.scope, "_default");
    }
}
