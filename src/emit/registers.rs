//! Virtual register numbering for one emitted function

use std::fmt;

/// An SSA operand in emitted IR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// The function's only parameter, `%value`
    Param,
    /// A numbered virtual register
    Reg(u32),
    Undef,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Param => f.write_str("%value"),
            Value::Reg(n) => write!(f, "%{}", n),
            Value::Undef => f.write_str("undef"),
        }
    }
}

/// Register allocator scoped to a single function body.
///
/// Numbering starts at `%1` and every allocation takes the next number, so
/// registers within one body are contiguous.
#[derive(Debug)]
pub struct Registers {
    next: u32,
}

impl Registers {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn fresh(&mut self) -> Value {
        let reg = Value::Reg(self.next);
        self.next += 1;
        reg
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
