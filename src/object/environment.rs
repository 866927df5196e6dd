//! The environment chain backing lexical scope.
//!
//! An environment is a name→value map plus an optional reference to the
//! enclosing scope. Environments are shared by reference (`Rc<RefCell>`)
//! because closures keep their definition scope alive after the defining
//! frame is gone.

use super::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a new top-level environment with no enclosing scope.
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
            outer: None,
        }
    }

    /// Creates a fresh environment enclosed by `outer`. Used for function
    /// calls: parameters bind here, everything else resolves through the
    /// chain.
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    /// Looks up a name, walking the chain of enclosing scopes on a local
    /// miss.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .outer
                .as_ref()
                .and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds a name in this (innermost) scope and hands the value back so
    /// bindings can chain. An inner binding shadows an outer one without
    /// touching it.
    pub fn set(&mut self, name: &str, value: Object) -> Object {
        self.store.insert(name.to_string(), value.clone());
        value
    }
}
