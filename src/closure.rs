//! Compiled function bodies and the closures the VM builds around them.

use std::rc::Rc;

use log::debug;

use crate::code::Instructions;
use crate::object::{Object, ObjectRef};
use crate::symbol_table::Symbol;

/// One function literal's bytecode. Built once by the compiler, never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFunction {
    instructions: Instructions,
    num_locals: usize,
    num_parameters: usize,
}

impl CompiledFunction {
    pub fn new(instructions: Instructions, num_locals: usize, num_parameters: usize) -> Self {
        debug!(
            "Compiled function: {} byte(s), {} local(s), {} parameter(s)",
            instructions.len(),
            num_locals,
            num_parameters
        );

        Self {
            instructions,
            num_locals,
            num_parameters,
        }
    }

    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }

    /// Slots to reserve on the stack for a call, parameters included.
    pub fn num_locals(&self) -> usize {
        self.num_locals
    }

    pub fn num_parameters(&self) -> usize {
        self.num_parameters
    }

    pub fn into_object(self) -> ObjectRef {
        Rc::new(Object::CompiledFunction(Rc::new(self)))
    }
}

/// A compiled function plus the values of its free variables, taken when the
/// closure expression ran. `free[i]` backs the `Free` symbol with index `i`.
#[derive(Debug, Clone)]
pub struct Closure {
    pub func: Rc<CompiledFunction>,
    pub free: Vec<ObjectRef>,
}

impl Closure {
    pub fn new(func: Rc<CompiledFunction>, free: Vec<ObjectRef>) -> Self {
        Self { func, free }
    }

    /// Snapshots one value per captured symbol, in capture order. `load`
    /// reads a symbol as seen from the frame creating the closure.
    pub fn capture<F>(func: Rc<CompiledFunction>, free_symbols: &[Symbol], mut load: F) -> Self
    where
        F: FnMut(&Symbol) -> ObjectRef,
    {
        let free: Vec<ObjectRef> = free_symbols.iter().map(&mut load).collect();

        debug!("Captured {} free variable(s)", free.len());

        Self { func, free }
    }

    pub fn free_variable(&self, index: usize) -> Option<&ObjectRef> {
        self.free.get(index)
    }

    pub fn into_object(self) -> ObjectRef {
        Rc::new(Object::Closure(self))
    }
}
