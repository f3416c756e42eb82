//! Per-function local-variable binding table.

use std::collections::HashMap;

/// Maps local-variable names to canonical type strings within one function.
///
/// Scope is flat per function: no block-level shadowing, and the table is
/// dropped with its function frame, so bindings never leak across functions
/// or into the owning data structure.
#[derive(Debug, Default, Clone)]
pub struct ScopeTracker {
    bindings: HashMap<String, String>,
}

impl ScopeTracker {
    /// Create a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable to a type. A later bind for the same name overwrites
    /// the earlier one (last write wins).
    pub fn bind(&mut self, name: impl Into<String>, type_name: impl Into<String>) {
        self.bindings.insert(name.into(), type_name.into());
    }

    /// Look up the bound type for a variable, if any.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bound_name() {
        let mut scope = ScopeTracker::new();
        scope.bind("p", "Person");
        assert_eq!(scope.resolve("p"), Some("Person"));
    }

    #[test]
    fn unbound_name_is_none() {
        let scope = ScopeTracker::new();
        assert_eq!(scope.resolve("x"), None);
    }

    #[test]
    fn rebinding_overwrites() {
        let mut scope = ScopeTracker::new();
        scope.bind("x", "Foo");
        scope.bind("x", "Bar");
        assert_eq!(scope.resolve("x"), Some("Bar"));
    }
}
