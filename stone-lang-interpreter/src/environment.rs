use crate::object::Object;
use gc::{Finalize, Gc, GcCell, Trace};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Trace, Finalize)]
pub struct EnvironmentCore {
    store: HashMap<Rc<str>, Gc<Object>>,
    outer: Option<Environment>,
}

/// A scope in the environment chain. Cloning yields another handle to the
/// same scope: closures and call frames share it, and it lives as long as
/// the longest of them.
#[derive(Clone, Trace, Finalize)]
pub struct Environment {
    environment: Gc<GcCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer),
            })),
        }
    }

    /// Looks `key` up in this scope, then outwards through the chain.
    pub fn get(&self, key: &str) -> Option<Gc<Object>> {
        let env = self.environment.borrow();
        match env.store.get(key) {
            Some(value) => Some(value.clone()),
            None => env.outer.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    /// Binds `key` in this scope only. Outer bindings of the same name are
    /// shadowed, never overwritten.
    pub fn set(&mut self, key: Rc<str>, value: Gc<Object>) {
        self.environment.borrow_mut().store.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.environment.borrow().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;
    use crate::object::Object;

    #[test]
    fn test_lookup_walks_outwards() {
        let mut global = Environment::new();
        global.set("a".into(), Object::number(1.0));
        global.set("b".into(), Object::number(2.0));

        let mut inner = Environment::new_enclosed(global.clone());
        inner.set("b".into(), Object::number(3.0));

        assert_eq!(inner.get("a"), Some(Object::number(1.0)));
        assert_eq!(inner.get("b"), Some(Object::number(3.0)));
        assert_eq!(global.get("b"), Some(Object::number(2.0)));
        assert_eq!(inner.get("c"), None);
    }

    #[test]
    fn test_clones_share_the_scope() {
        let mut env = Environment::new();
        let other = env.clone();
        env.set("x".into(), Object::text("shared"));

        assert_eq!(other.get("x"), Some(Object::text("shared")));
        assert_eq!(other.len(), 1);
        assert!(!other.is_empty());
    }
}
