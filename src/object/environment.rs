//! Lexically scoped variable bindings.
//!
//! A chain of frames linked by `outer`, each a `Rc<RefCell<_>>` so that a
//! `FunctionObject` can cheaply capture its defining scope by cloning the
//! handle rather than the bindings themselves. A function stored under its
//! own name in the environment it was defined in (recursive `variable`
//! bindings) creates a reference cycle; this crate accepts the resulting
//! leak rather than introduce weak back-pointers or a tracing collector.

use super::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct EnvironmentInner {
    store: HashMap<String, Object>,
    outer: Option<Environment>,
}

#[derive(Debug, Clone, Default)]
pub struct Environment(Rc<RefCell<EnvironmentInner>>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a child scope, used for a function call's local frame.
    pub fn new_enclosed(outer: Environment) -> Self {
        Environment(Rc::new(RefCell::new(EnvironmentInner {
            store: HashMap::new(),
            outer: Some(outer),
        })))
    }

    /// Walks the scope chain outward until the name is found.
    pub fn get(&self, name: &str) -> Option<Object> {
        let inner = self.0.borrow();
        if let Some(value) = inner.store.get(name) {
            return Some(value.clone());
        }
        inner.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Binds `name` in the current frame only.
    pub fn set(&self, name: String, value: Object) -> Object {
        self.0.borrow_mut().store.insert(name, value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_bound_value() {
        let env = Environment::new();
        env.set("x".to_string(), Object::Integer(5));
        assert!(matches!(env.get("x"), Some(Object::Integer(5))));
    }

    #[test]
    fn enclosed_scope_sees_outer_bindings() {
        let outer = Environment::new();
        outer.set("x".to_string(), Object::Integer(1));
        let inner = Environment::new_enclosed(outer.clone());
        assert!(matches!(inner.get("x"), Some(Object::Integer(1))));
    }

    #[test]
    fn enclosed_scope_shadows_without_mutating_outer() {
        let outer = Environment::new();
        outer.set("x".to_string(), Object::Integer(1));
        let inner = Environment::new_enclosed(outer.clone());
        inner.set("x".to_string(), Object::Integer(2));

        assert!(matches!(inner.get("x"), Some(Object::Integer(2))));
        assert!(matches!(outer.get("x"), Some(Object::Integer(1))));
    }

    #[test]
    fn unbound_identifier_is_none() {
        let env = Environment::new();
        assert!(env.get("desconocida").is_none());
    }
}
