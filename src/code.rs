//! Finished instruction streams as handed over by the compiler.
//!
//! Opcode encoding is owned by the compiler/VM pair; this crate only needs an
//! immutable, cheaply shareable byte sequence to embed in a
//! [`CompiledFunction`](crate::closure::CompiledFunction).

use std::fmt;
use std::ops::Deref;

use bytes::Bytes;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instructions(Bytes);

impl Instructions {
    pub fn new() -> Self {
        Self(Bytes::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Instructions {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Instructions {
    fn from(buf: Vec<u8>) -> Self {
        Self(Bytes::from(buf))
    }
}

impl From<&'static [u8]> for Instructions {
    fn from(buf: &'static [u8]) -> Self {
        Self(Bytes::from_static(buf))
    }
}

/// Hex dump, one `offset byte` line per byte.
impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (offset, byte) in self.0.iter().enumerate() {
            writeln!(f, "{:04} {:02x}", offset, byte)?;
        }
        Ok(())
    }
}
