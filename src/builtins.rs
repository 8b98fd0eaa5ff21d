//! Ordered table of native functions.
//!
//! The VM dispatches builtins by index and the compiler emits that index from
//! the symbol table, so both must be filled from the same ordered list.
//! [`BuiltinRegistry::define_all`] is the only place builtin symbols should
//! come from.

use log::{debug, info};

use crate::object::{Builtin, BuiltinFn};
use crate::symbol_table::{Symbol, SymbolTable};

#[derive(Debug, Clone, Default)]
pub struct BuiltinRegistry {
    entries: Vec<Builtin>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a builtin and returns its dispatch index.
    pub fn register(&mut self, name: &'static str, func: BuiltinFn) -> usize {
        self.entries.push(Builtin { name, func });

        debug!("Registered builtin '{}' at {}", name, self.entries.len() - 1);

        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Builtin> {
        self.entries.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<(usize, &Builtin)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, builtin)| builtin.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Defines every builtin in `table`'s global frame, index `i` for the
    /// `i`th registration. Safe to call with function frames open.
    pub fn define_all(&self, table: &mut SymbolTable) -> Vec<Symbol> {
        info!("Defining {} builtin(s)", self.entries.len());

        self.entries
            .iter()
            .enumerate()
            .map(|(index, builtin)| table.define_global_builtin(index, builtin.name))
            .collect()
    }
}
