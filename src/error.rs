//! Centralised error hierarchy for the **compile-time** side of the runtime
//! core.
//!
//! Only failures that abort a compilation unit (or the `scopes` tool) live
//! here. Runtime value-level failures are *not* Rust errors: they travel as
//! [`Object::Error`](crate::object::Object::Error) values through the normal
//! value channel and are checked with [`is_error`](crate::object::is_error).
//!
//! The module **does not** print diagnostics itself; callers decide how to
//! report them.

use thiserror::Error;

use log::info;

/// Canonical error type used throughout the crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A name was referenced that no frame in the chain defines.
    #[error("undefined variable {name}")]
    UndefinedVariable {
        /// The identifier as written at the reference site.
        name: String,
    },

    /// A function-name binding was requested while no function frame is open.
    #[error("function name {name} defined outside a function")]
    FunctionNameAtTopLevel { name: String },

    /// `leave_scope` was called while only the global frame remained.
    #[error("cannot leave the global scope")]
    ScopeUnderflow,

    /// Malformed line in a scope script fed to the `scopes` tool.
    #[error("[line {line}] Error: {message}")]
    Script { message: String, line: usize },
}

impl CoreError {
    /// Helper constructor for unresolved names.
    pub fn undefined<S: Into<String>>(name: S) -> Self {
        let name: String = name.into();

        info!("Creating UndefinedVariable error: name={}", name);

        CoreError::UndefinedVariable { name }
    }

    /// Helper constructor for function names bound at top level.
    pub fn function_name_at_top_level<S: Into<String>>(name: S) -> Self {
        let name: String = name.into();

        info!("Creating FunctionNameAtTopLevel error: name={}", name);

        CoreError::FunctionNameAtTopLevel { name }
    }

    /// Helper constructor for the script reader.
    pub fn script<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Script error: line={}, msg={}", line, message);

        CoreError::Script { message, line }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, CoreError>;
