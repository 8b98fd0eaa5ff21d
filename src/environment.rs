use crate::object::ObjectRef;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Chained name → value store used by the tree-walking evaluator. A
/// [`Function`](crate::object::Object::Function) keeps the environment it was
/// defined in and calls run in an enclosed one.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    store: HashMap<String, ObjectRef>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
            outer: None,
        }
    }

    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    /// Shared handle, the form functions capture.
    pub fn shared(self) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(self))
    }

    pub fn get(&self, name: &str) -> Option<ObjectRef> {
        if let Some(value) = self.store.get(name) {
            Some(Rc::clone(value))
        } else if let Some(outer) = &self.outer {
            outer.borrow().get(name)
        } else {
            debug!("'{}' is not bound in any environment", name);
            None
        }
    }

    /// Binds in this frame only, shadowing any outer binding.
    pub fn set(&mut self, name: &str, value: ObjectRef) -> ObjectRef {
        self.store.insert(name.to_string(), Rc::clone(&value));
        value
    }
}
