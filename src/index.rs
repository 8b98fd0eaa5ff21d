//! Index expressions and hash-literal construction.
//!
//! A miss (array index out of range, absent hash key) is *not* an error: it
//! yields `null`. Only misuse, such as an unhashable key or indexing something
//! that is not a container, produces an `Error` object.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::hash_key::{HashPair, HashPairs};
use crate::object::{new_error, null, Object, ObjectRef};

/// `left[index]` for any operands.
pub fn eval_index_expression(left: &ObjectRef, index: &ObjectRef) -> ObjectRef {
    match (left.as_ref(), index.as_ref()) {
        (Object::Array(_), Object::Integer(_)) => eval_array_index_expression(left, index),
        (Object::Hash(_), _) => eval_hash_index_expression(left, index),
        _ => unsupported(left),
    }
}

/// Element at `index`, or `null` when `index < 0` or `index > len - 1`.
pub fn eval_array_index_expression(array: &ObjectRef, index: &ObjectRef) -> ObjectRef {
    let (Object::Array(elements), Object::Integer(idx)) = (array.as_ref(), index.as_ref()) else {
        return unsupported(array);
    };

    let elements = elements.borrow();
    match usize::try_from(*idx).ok().and_then(|i| elements.get(i)) {
        Some(element) => Rc::clone(element),
        None => {
            debug!("Array index {} out of range 0..{}", idx, elements.len());
            null()
        }
    }
}

/// Value paired with `index`, `null` when absent, or an error when `index`
/// cannot be a hash key.
pub fn eval_hash_index_expression(hash: &ObjectRef, index: &ObjectRef) -> ObjectRef {
    let Object::Hash(pairs) = hash.as_ref() else {
        return unsupported(hash);
    };

    let Some(key) = index.hash_key() else {
        return new_error(format!("unusable as hash key: {}", index.object_type()));
    };

    let pairs = pairs.borrow();
    match pairs.get(&key) {
        Some(pair) => Rc::clone(&pair.value),
        None => null(),
    }
}

/// Builds a `Hash` object from evaluated pairs. A later pair with the same key
/// replaces an earlier one.
pub fn build_hash<I>(pairs: I) -> ObjectRef
where
    I: IntoIterator<Item = (ObjectRef, ObjectRef)>,
{
    let mut map = HashPairs::new();

    for (key, value) in pairs {
        let Some(hashed) = key.hash_key() else {
            return new_error(format!("unusable as hash key: {}", key.object_type()));
        };
        map.insert(hashed, HashPair { key, value });
    }

    Rc::new(Object::Hash(RefCell::new(map)))
}

fn unsupported(left: &ObjectRef) -> ObjectRef {
    new_error(format!(
        "index operator not supported: {}",
        left.object_type()
    ))
}
