pub mod ast;
pub mod builtins;
pub mod closure;
pub mod code;
pub mod environment;
pub mod error;
pub mod hash_key;
pub mod index;
pub mod object;
pub mod script;
pub mod symbol_table;
