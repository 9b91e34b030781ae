//! Extension methods for result sets.
//!
//! Calls to [`ResultSet::call`](crate::results::ResultSet::call) are offered
//! to the handlers registered under the method name, in registration order.
//! The first handler returning `Some` answers the call.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::results::ResultSet;

/// A registered method handler.
///
/// Returning `None` lets the next handler try.
pub type MethodHandler = Box<dyn Fn(&ResultSet, &[Value]) -> Option<Value>>;

/// Method name to handlers.
#[derive(Default)]
pub struct MethodRegistry {
    handlers: HashMap<String, Vec<MethodHandler>>,
}

impl MethodRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `method`.
    pub fn register<S, F>(&mut self, method: S, handler: F)
    where
        S: Into<String>,
        F: Fn(&ResultSet, &[Value]) -> Option<Value> + 'static,
    {
        self.handlers
            .entry(method.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Whether any handler is registered for `method`.
    pub fn contains(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Names of all methods with handlers.
    pub fn methods(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Offer a call to the handlers of `method`.
    pub fn dispatch(&self, target: &ResultSet, method: &str, arguments: &[Value]) -> Option<Value> {
        let handlers = self.handlers.get(method)?;
        log::debug!(
            "Dispatching ResultSet::{method} to {} handler(s)",
            handlers.len()
        );
        handlers
            .iter()
            .find_map(|handler| handler(target, arguments))
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::config::SearchConfig;
    use crate::error::SolrineError;
    use crate::search::SearchSession;

    fn results_with(registry: impl FnOnce(&mut MethodRegistry)) -> ResultSet {
        let mut session = SearchSession::new(SearchConfig::default()).unwrap();
        registry(session.methods_mut());
        Rc::new(session)
            .results(r#"{"response": {"numFound": 3, "docs": [{"guid": "a"}]}}"#)
            .unwrap()
    }

    #[test]
    fn test_registered_handler_answers() {
        let results = results_with(|registry| {
            registry.register("pageCount", |results, args| {
                let per_page = args.first()?.as_u64()?;
                Some(json!(results.count().div_ceil(per_page)))
            });
        });

        assert_eq!(results.call("pageCount", &[json!(2)]).unwrap(), json!(2));
    }

    #[test]
    fn test_first_answering_handler_wins() {
        let results = results_with(|registry| {
            registry.register("describe", |_, _| None);
            registry.register("describe", |_, _| Some(json!("second")));
            registry.register("describe", |_, _| Some(json!("third")));
        });

        assert_eq!(results.call("describe", &[]).unwrap(), json!("second"));
    }

    #[test]
    fn test_unhandled_call_is_unknown_operation() {
        let results = results_with(|registry| {
            registry.register("pageCount", |_, args| args.first().cloned());
        });

        match results.call("pageCount", &[]) {
            Err(SolrineError::UnknownOperation { method, arguments }) => {
                assert_eq!(method, "pageCount");
                assert!(arguments.is_empty());
            }
            other => panic!("Expected UnknownOperation, got {other:?}"),
        }

        assert!(matches!(
            results.call("missing", &[json!(1)]),
            Err(SolrineError::UnknownOperation { .. })
        ));
    }

    #[test]
    fn test_registry_lists_methods() {
        let mut registry = MethodRegistry::new();
        registry.register("a", |_, _| None);

        assert!(registry.contains("a"));
        assert!(!registry.contains("b"));
        assert_eq!(registry.methods(), vec!["a"]);
    }
}
