//! Compile-time **symbol table** for the bytecode compiler.
//!
//! The table turns every identifier the compiler meets into a storage
//! location the VM can address without any lexical context: a
//! [`SymbolScope`] (which slot family) and an index (which slot).
//!
//! # Frames
//!
//! A [`SymbolTable`] is a chain of [`Scope`] frames kept as a stack. The
//! bottom frame is the global frame; every other frame belongs to the function
//! body currently being compiled and is popped (and handed back) once that
//! function's code has been emitted.
//!
//! # Free variables
//!
//! When a name resolves to a local of an *enclosing function*, every frame
//! between the definition and the reference captures it: the symbol found so
//! far is appended to the frame's free list and replaced by a `Free` symbol
//! whose index is its position in that list. The VM later fills a closure's
//! free-variable vector in exactly that order.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::{debug, info};
use serde::Serialize;

use crate::error::{CoreError, Result};

/// Which slot family a [`Symbol`] is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolScope {
    /// Program-wide slot in the VM's globals store.
    Global,

    /// Slot in the current call frame.
    Local,

    /// Index into the builtin dispatch table.
    Builtin,

    /// Index into the executing closure's captured values.
    Free,

    /// The function currently executing (its own name, inside its body).
    Function,
}

impl SymbolScope {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolScope::Global => "GLOBAL",
            SymbolScope::Local => "LOCAL",
            SymbolScope::Builtin => "BUILTIN",
            SymbolScope::Free => "FREE",
            SymbolScope::Function => "FUNCTION",
        }
    }
}

impl fmt::Display for SymbolScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved identifier. Immutable once created; cloning shares the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Symbol {
    pub name: Rc<str>,
    pub scope: SymbolScope,
    pub index: usize,
}

impl Symbol {
    pub fn new(name: &str, scope: SymbolScope, index: usize) -> Self {
        Self {
            name: Rc::from(name),
            scope,
            index,
        }
    }

    fn rescoped(&self, scope: SymbolScope, index: usize) -> Self {
        Self {
            name: Rc::clone(&self.name),
            scope,
            index,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.scope, self.index)
    }
}

/// One frame of the chain: the bindings made directly in a single function
/// body (or at top level for the global frame).
#[derive(Debug, Clone, Default)]
pub struct Scope {
    store: HashMap<Rc<str>, Symbol>,
    num_definitions: usize,
    free_symbols: Vec<Symbol>,
}

impl Scope {
    /// Number of `define` calls made in this frame. Sizes the VM's local
    /// (or global) slot area; redefinitions are counted, builtins are not.
    pub fn num_definitions(&self) -> usize {
        self.num_definitions
    }

    /// The symbols this frame captured from enclosing functions, as they were
    /// seen *from the enclosing frame*, in capture order.
    pub fn free_symbols(&self) -> &[Symbol] {
        &self.free_symbols
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.store.get(name)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Bindings of this frame ordered by scope then index.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.store.values().collect();
        symbols.sort_by(|a, b| {
            a.scope
                .as_str()
                .cmp(b.scope.as_str())
                .then(a.index.cmp(&b.index))
        });
        symbols
    }

    fn bind(&mut self, symbol: Symbol) -> Symbol {
        self.store.insert(Rc::clone(&symbol.name), symbol.clone());
        symbol
    }

    fn define_free(&mut self, original: Symbol) -> Symbol {
        let symbol = original.rescoped(SymbolScope::Free, self.free_symbols.len());

        debug!(
            "Capturing '{}' ({} {}) as free {}",
            original.name, original.scope, original.index, symbol.index
        );

        self.free_symbols.push(original);
        self.bind(symbol)
    }
}

/// The frame chain used during one compilation unit.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    // frames[0] is the global frame; frames[i]'s outer is frames[i - 1].
    frames: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table holding only the global frame.
    pub fn new() -> Self {
        info!("Creating symbol table");

        Self {
            frames: vec![Scope::default()],
        }
    }

    /// `true` while no function frame is open.
    pub fn is_global(&self) -> bool {
        self.frames.len() == 1
    }

    /// Function-nesting depth of the innermost frame (0 for the global frame).
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn innermost(&self) -> &Scope {
        &self.frames[self.depth()]
    }

    pub fn global(&self) -> &Scope {
        &self.frames[0]
    }

    pub fn num_definitions(&self) -> usize {
        self.innermost().num_definitions
    }

    pub fn free_symbols(&self) -> &[Symbol] {
        self.innermost().free_symbols()
    }

    fn innermost_mut(&mut self) -> &mut Scope {
        let depth = self.depth();
        &mut self.frames[depth]
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame management
    // ─────────────────────────────────────────────────────────────────────────

    /// Opens a frame for a function body about to be compiled.
    pub fn enter_scope(&mut self) {
        self.frames.push(Scope::default());

        info!("Entered scope at depth {}", self.depth());
    }

    /// Closes the innermost function frame and returns it, so the compiler
    /// can size the call frame and emit the free-variable loads.
    pub fn leave_scope(&mut self) -> Result<Scope> {
        if self.is_global() {
            return Err(CoreError::ScopeUnderflow);
        }

        let frame = self.frames.pop().ok_or(CoreError::ScopeUnderflow)?;

        info!(
            "Left scope: {} definition(s), {} free",
            frame.num_definitions,
            frame.free_symbols.len()
        );

        Ok(frame)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Definitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Binds `name` in the innermost frame. Global at top level, Local
    /// otherwise; the index is the frame's definition count, which always
    /// grows, so redefining a name gets a fresh slot.
    pub fn define(&mut self, name: &str) -> Symbol {
        let scope = if self.is_global() {
            SymbolScope::Global
        } else {
            SymbolScope::Local
        };

        let frame = self.innermost_mut();
        let index = frame.num_definitions;
        let symbol = frame.bind(Symbol::new(name, scope, index));
        frame.num_definitions += 1;

        debug!("Defined {}", symbol);

        symbol
    }

    /// Binds a native function at a fixed dispatch-table index. Builtins do
    /// not occupy a local or global slot.
    pub fn define_builtin(&mut self, index: usize, name: &str) -> Symbol {
        let symbol = self
            .innermost_mut()
            .bind(Symbol::new(name, SymbolScope::Builtin, index));

        debug!("Defined {}", symbol);

        symbol
    }

    /// Binds a native function in the global frame, whatever frame is open.
    /// Builtin bindings must outlive every function frame.
    pub fn define_global_builtin(&mut self, index: usize, name: &str) -> Symbol {
        let symbol = self.frames[0].bind(Symbol::new(name, SymbolScope::Builtin, index));

        debug!("Defined {} in the global frame", symbol);

        symbol
    }

    /// Binds the name of the function being compiled inside its own body.
    /// Top-level code is not a function, so the global frame refuses it.
    pub fn define_function_name(&mut self, name: &str) -> Result<Symbol> {
        if self.is_global() {
            return Err(CoreError::function_name_at_top_level(name));
        }

        let symbol = self
            .innermost_mut()
            .bind(Symbol::new(name, SymbolScope::Function, 0));

        debug!("Defined {}", symbol);

        Ok(symbol)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────────────────────────────

    /// Looks `name` up innermost-first. Locals of enclosing functions are
    /// captured as free variables by every frame in between, and the
    /// innermost frame's `Free` symbol is returned.
    pub fn resolve(&mut self, name: &str) -> Option<Symbol> {
        let innermost = self.depth();

        let Some((depth, found)) = self
            .frames
            .iter()
            .enumerate()
            .rev()
            .find_map(|(depth, frame)| frame.get(name).map(|s| (depth, s.clone())))
        else {
            debug!("'{}' is not defined in any of {} frame(s)", name, innermost + 1);
            return None;
        };

        if depth == innermost || matches!(found.scope, SymbolScope::Global | SymbolScope::Builtin)
        {
            debug!("Resolved {} at depth {}", found, depth);
            return Some(found);
        }

        let mut symbol = found;
        for frame in &mut self.frames[depth + 1..] {
            symbol = frame.define_free(symbol);
        }

        debug!(
            "Resolved {} through {} enclosing frame(s)",
            symbol,
            innermost - depth
        );

        Some(symbol)
    }

    /// [`resolve`](Self::resolve) for callers that abort on unknown names.
    pub fn resolve_or_err(&mut self, name: &str) -> Result<Symbol> {
        self.resolve(name).ok_or_else(|| CoreError::undefined(name))
    }
}
