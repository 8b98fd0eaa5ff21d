//! Runtime values shared by the bytecode VM and the tree-walking evaluator.
//!
//! Every value is an [`Object`] behind an [`ObjectRef`] (`Rc<Object>`).
//! Composite values hold further `ObjectRef`s, so nested values are shared
//! rather than copied. `Array` and `Hash` sit in a `RefCell`: whoever currently
//! holds the reference is the only one allowed to mutate it.
//!
//! `Null`, `true` and `false` exist once per thread. The two booleans are the
//! *only* `Boolean` objects that can be built (the payload has a private
//! constructor), so pointer identity against them is a valid truthiness test.
//!
//! `Display` is the language's `Inspect`. It recurses into arrays and hashes
//! without cycle detection: an array that contains itself will not finish
//! printing.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::ast::{BlockStatement, Identifier};
use crate::closure::{Closure, CompiledFunction};
use crate::environment::Environment;
use crate::hash_key::{listing_order, HashKey, HashPairs};

/// Shared handle to a runtime value.
pub type ObjectRef = Rc<Object>;

/// Native function signature. Failures are reported as `Error` objects.
pub type BuiltinFn = fn(&[ObjectRef]) -> ObjectRef;

/// Discriminant of an [`Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectType {
    Null,
    Error,
    Integer,
    Boolean,
    String,
    ReturnValue,
    Function,
    Array,
    Hash,
    Builtin,
    CompiledFunction,
    Closure,
}

impl ObjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Null => "NULL",
            ObjectType::Error => "ERROR",
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::String => "STRING",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Function => "FUNCTION",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::CompiledFunction => "COMPILED_FUNCTION",
            ObjectType::Closure => "CLOSURE",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of the two boolean singletons. Not constructible outside this
/// module.
#[derive(Debug, PartialEq, Eq)]
pub struct Boolean(bool);

impl Boolean {
    pub fn value(&self) -> bool {
        self.0
    }
}

/// A tree-walking function value: closes over its defining environment.
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

// The environment usually contains the function itself.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// A native callable. Only its identity matters to this crate.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

#[derive(Debug)]
pub enum Object {
    Null,

    Integer(i64),

    Boolean(Boolean),

    String(String),

    Array(RefCell<Vec<ObjectRef>>),

    Hash(RefCell<HashPairs>),

    /// Propagates in place of a value; never a Rust-level failure.
    Error(String),

    /// Unwinds a tree-walking function body to its caller.
    ReturnValue(ObjectRef),

    Function(Function),

    CompiledFunction(Rc<CompiledFunction>),

    Closure(Closure),

    Builtin(Builtin),
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Null => ObjectType::Null,
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Error(_) => ObjectType::Error,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Function(_) => ObjectType::Function,
            Object::CompiledFunction(_) => ObjectType::CompiledFunction,
            Object::Closure(_) => ObjectType::Closure,
            Object::Builtin(_) => ObjectType::Builtin,
        }
    }

    /// Integers, booleans and strings may key a hash.
    pub fn hashable(&self) -> bool {
        matches!(
            self,
            Object::Integer(_) | Object::Boolean(_) | Object::String(_)
        )
    }

    /// `None` for every variant that is not [`hashable`](Self::hashable).
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::integer(*value)),
            Object::Boolean(b) => Some(HashKey::boolean(b.value())),
            Object::String(value) => Some(HashKey::string(value)),
            _ => None,
        }
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inspect
// ─────────────────────────────────────────────────────────────────────────────

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Null => f.write_str("null"),

            Object::Integer(n) => {
                let mut buf = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            Object::Boolean(b) => write!(f, "{}", b.value()),

            Object::String(s) => write!(f, "\"{}\"", s),

            Object::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }

            Object::Hash(pairs) => {
                let pairs = pairs.borrow();
                let mut entries: Vec<_> = pairs.iter().collect();
                entries.sort_by(|(a, _), (b, _)| listing_order(a, b));

                f.write_str("{")?;
                for (i, (_, pair)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                f.write_str("}")
            }

            Object::Error(message) => write!(f, "ERROR: {}", message),

            Object::ReturnValue(value) => write!(f, "{}", value),

            Object::Function(func) => {
                f.write_str("fn(")?;
                for (i, param) in func.parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") {{\n{}\n}}", func.body)
            }

            Object::CompiledFunction(func) => {
                write!(f, "CompiledFunction[{:p}]", Rc::as_ptr(func))
            }

            Object::Closure(closure) => write!(f, "Closure[{:p}]", closure),

            Object::Builtin(_) => f.write_str("builtin function"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Singletons and constructors
// ─────────────────────────────────────────────────────────────────────────────

thread_local! {
    static NULL: ObjectRef = Rc::new(Object::Null);
    static TRUE: ObjectRef = Rc::new(Object::Boolean(Boolean(true)));
    static FALSE: ObjectRef = Rc::new(Object::Boolean(Boolean(false)));
}

pub fn null() -> ObjectRef {
    NULL.with(Rc::clone)
}

pub fn true_obj() -> ObjectRef {
    TRUE.with(Rc::clone)
}

pub fn false_obj() -> ObjectRef {
    FALSE.with(Rc::clone)
}

pub fn native_bool_to_boolean_object(input: bool) -> ObjectRef {
    if input {
        true_obj()
    } else {
        false_obj()
    }
}

pub fn integer(value: i64) -> ObjectRef {
    Rc::new(Object::Integer(value))
}

pub fn string<S: Into<String>>(value: S) -> ObjectRef {
    Rc::new(Object::String(value.into()))
}

pub fn array(elements: Vec<ObjectRef>) -> ObjectRef {
    Rc::new(Object::Array(RefCell::new(elements)))
}

pub fn new_error<S: Into<String>>(message: S) -> ObjectRef {
    let message: String = message.into();

    debug!("Creating error object: {}", message);

    Rc::new(Object::Error(message))
}

pub fn return_value(value: ObjectRef) -> ObjectRef {
    Rc::new(Object::ReturnValue(value))
}

// ─────────────────────────────────────────────────────────────────────────────
// Predicates
// ─────────────────────────────────────────────────────────────────────────────

/// `null` and `false` are falsy; everything else, `0` and `""` included, is
/// truthy.
pub fn is_truthy(obj: &ObjectRef) -> bool {
    if NULL.with(|null| Rc::ptr_eq(obj, null)) || FALSE.with(|f| Rc::ptr_eq(obj, f)) {
        return false;
    }
    if TRUE.with(|t| Rc::ptr_eq(obj, t)) {
        return true;
    }

    // A Null allocated outside the singleton.
    !matches!(obj.as_ref(), Object::Null)
}

pub fn is_error(obj: &ObjectRef) -> bool {
    obj.object_type() == ObjectType::Error
}
