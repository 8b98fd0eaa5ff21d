//! Fingerprints used as the key type of `Hash` objects.
//!
//! A [`HashKey`] is lossy: it remembers the kind of the original key and a
//! 64-bit value derived from it, which is why every entry also keeps the
//! original key object in its [`HashPair`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hasher;

use rustc_hash::FxHasher;

use crate::object::{ObjectRef, ObjectType};

/// Backing map of a `Hash` object.
pub type HashPairs = HashMap<HashKey, HashPair>;

/// Equality covers both fields; ordering looks at `value` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub object_type: ObjectType,
    pub value: u64,
}

impl HashKey {
    /// Two's-complement reinterpretation, so `-1` maps to `u64::MAX`.
    pub fn integer(value: i64) -> Self {
        Self {
            object_type: ObjectType::Integer,
            value: value as u64,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            object_type: ObjectType::Boolean,
            value: u64::from(value),
        }
    }

    /// FxHash of the UTF-8 bytes; stable across runs and processes.
    pub fn string(value: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write(value.as_bytes());

        Self {
            object_type: ObjectType::String,
            value: hasher.finish(),
        }
    }
}

/// Type-blind: keys of different kinds with the same value are unordered
/// rather than equal, which keeps the order consistent with `Eq`.
impl PartialOrd for HashKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.value.cmp(&other.value) {
            Ordering::Equal if self.object_type != other.object_type => None,
            ordering => Some(ordering),
        }
    }
}

/// Total order for listing keys: [`PartialOrd`] first, kind as tie-break for
/// the unordered same-value pairs.
pub fn listing_order(a: &HashKey, b: &HashKey) -> Ordering {
    a.partial_cmp(b)
        .unwrap_or_else(|| a.object_type.cmp(&b.object_type))
}

/// One entry of a `Hash` object: the original key and its value.
#[derive(Debug, Clone)]
pub struct HashPair {
    pub key: ObjectRef,
    pub value: ObjectRef,
}
