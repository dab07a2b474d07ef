//! Operator and group-function tables
//!
//! The universe the generator covers is closed and spelled out here: one
//! table per bit width, each entry naming the GLSL operator, the operand
//! kind and the arithmetic id handed to the subgroup primitives.

use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;

use crate::diagnostics::EmuError;
use crate::types::TypeKind;

use ArithOp as A;
use Operator as O;
use TypeKind as T;

/// GLSL-facing operator token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Mul,
    Min,
    Max,
    And,
    Or,
    Xor,
}

impl Operator {
    pub const fn token(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Mul => "mul",
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Xor => "xor",
        }
    }

    /// Token with its first letter upper-cased, as in `subgroupAdd`
    pub fn capitalized(self) -> String {
        let token = self.token();
        let mut chars = token.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Arithmetic operation understood by the subgroup primitives.
///
/// The discriminant is the `i32` operand passed to every primitive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ArithOp {
    IAdd = 0,
    IMul = 1,
    SMin = 2,
    SMax = 3,
    UMin = 4,
    UMax = 5,
    And = 6,
    Or = 7,
    Xor = 8,
    FMul = 9,
    FMin = 10,
    FMax = 11,
    FAdd = 12,
}

impl ArithOp {
    pub const fn id(self) -> u32 {
        self as u32
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            ArithOp::IAdd => "iadd",
            ArithOp::IMul => "imul",
            ArithOp::SMin => "smin",
            ArithOp::SMax => "smax",
            ArithOp::UMin => "umin",
            ArithOp::UMax => "umax",
            ArithOp::And => "and",
            ArithOp::Or => "or",
            ArithOp::Xor => "xor",
            ArithOp::FMul => "fmul",
            ArithOp::FMin => "fmin",
            ArithOp::FMax => "fmax",
            ArithOp::FAdd => "fadd",
        }
    }
}

/// How an entry maps onto GLSL overloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lowering {
    /// One GLSL type per emitted function
    Scalar,
    /// Signed kind and its unsigned partner share the emitted function
    Hybrid,
}

/// One row of a bit-width table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpEntry {
    pub op: Operator,
    pub kind: TypeKind,
    pub arith: ArithOp,
    pub lowering: Lowering,
}

const fn scalar(op: Operator, kind: TypeKind, arith: ArithOp) -> OpEntry {
    OpEntry {
        op,
        kind,
        arith,
        lowering: Lowering::Scalar,
    }
}

const fn hybrid(op: Operator, kind: TypeKind, arith: ArithOp) -> OpEntry {
    OpEntry {
        op,
        kind,
        arith,
        lowering: Lowering::Hybrid,
    }
}

static OPS_16: [OpEntry; 8] = [
    hybrid(O::Add, T::Int16, A::IAdd),
    scalar(O::Add, T::Float16, A::FAdd),
    scalar(O::Min, T::Int16, A::SMin),
    scalar(O::Min, T::Uint16, A::UMin),
    scalar(O::Min, T::Float16, A::FMin),
    scalar(O::Max, T::Int16, A::SMax),
    scalar(O::Max, T::Uint16, A::UMax),
    scalar(O::Max, T::Float16, A::FMax),
];

static OPS_32: [OpEntry; 20] = [
    hybrid(O::Add, T::Int, A::IAdd),
    scalar(O::Add, T::Float, A::FAdd),
    scalar(O::Add, T::Double, A::FAdd),
    hybrid(O::Mul, T::Int, A::IMul),
    scalar(O::Mul, T::Float, A::FMul),
    scalar(O::Mul, T::Double, A::FMul),
    scalar(O::Min, T::Int, A::SMin),
    scalar(O::Min, T::Uint, A::UMin),
    scalar(O::Min, T::Float, A::FMin),
    scalar(O::Min, T::Double, A::FMin),
    scalar(O::Max, T::Int, A::SMax),
    scalar(O::Max, T::Uint, A::UMax),
    scalar(O::Max, T::Float, A::FMax),
    scalar(O::Max, T::Double, A::FMax),
    hybrid(O::And, T::Int, A::And),
    scalar(O::And, T::Bool, A::And),
    hybrid(O::Or, T::Int, A::Or),
    scalar(O::Or, T::Bool, A::Or),
    hybrid(O::Xor, T::Int, A::Xor),
    scalar(O::Xor, T::Bool, A::Xor),
];

static OPS_64: [OpEntry; 5] = [
    hybrid(O::Add, T::Int64, A::IAdd),
    scalar(O::Min, T::Int64, A::SMin),
    scalar(O::Min, T::Uint64, A::UMin),
    scalar(O::Max, T::Int64, A::SMax),
    scalar(O::Max, T::Uint64, A::UMax),
];

/// Operand bit width selecting a configuration table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitWidth {
    W16,
    W32,
    W64,
}

impl BitWidth {
    pub const ALL: [BitWidth; 3] = [BitWidth::W16, BitWidth::W32, BitWidth::W64];

    pub const fn bits(self) -> u32 {
        match self {
            BitWidth::W16 => 16,
            BitWidth::W32 => 32,
            BitWidth::W64 => 64,
        }
    }

    pub fn table(self) -> &'static [OpEntry] {
        match self {
            BitWidth::W16 => &OPS_16,
            BitWidth::W32 => &OPS_32,
            BitWidth::W64 => &OPS_64,
        }
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bit", self.bits())
    }
}

/// Group function kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupFunc {
    Reduce,
    InclusiveScan,
    ExclusiveScan,
}

impl GroupFunc {
    pub const ALL: [GroupFunc; 3] = [
        GroupFunc::Reduce,
        GroupFunc::InclusiveScan,
        GroupFunc::ExclusiveScan,
    ];

    /// Stem of the emitted symbol name
    pub const fn symbol_stem(self) -> &'static str {
        match self {
            GroupFunc::Reduce => "sub_group_reduce",
            GroupFunc::InclusiveScan => "sub_group_scan_inclusive",
            GroupFunc::ExclusiveScan => "sub_group_scan_exclusive",
        }
    }

    /// `GL_KHR_shader_subgroup_arithmetic` prefix (`subgroupInclusiveAdd`)
    pub const fn khr_prefix(self) -> &'static str {
        match self {
            GroupFunc::Reduce => "subgroup",
            GroupFunc::InclusiveScan => "subgroupInclusive",
            GroupFunc::ExclusiveScan => "subgroupExclusive",
        }
    }

    /// `GL_AMD_shader_ballot` suffix (`addInvocationsNonUniform`)
    pub const fn amd_suffix(self) -> &'static str {
        match self {
            GroupFunc::Reduce => "InvocationsNonUniform",
            GroupFunc::InclusiveScan => "InvocationsInclusiveScanNonUniform",
            GroupFunc::ExclusiveScan => "InvocationsExclusiveScanNonUniform",
        }
    }

    /// Primitive symbol prefix, completed with an optional wave infix and the storage suffix
    pub const fn primitive(self) -> &'static str {
        match self {
            GroupFunc::Reduce => "@llpc.subgroup.reduce.",
            GroupFunc::InclusiveScan => "@llpc.subgroup.inclusiveScan.",
            GroupFunc::ExclusiveScan => "@llpc.subgroup.exclusiveScan.",
        }
    }
}

/// Hardware wave size embedded into symbol and file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaveSize(NonZeroU32);

impl WaveSize {
    /// Wave size the unsuffixed primitives are written for
    pub const NATIVE: u32 = 64;

    pub fn new(size: u32) -> Result<Self, EmuError> {
        NonZeroU32::new(size)
            .map(WaveSize)
            .ok_or(EmuError::InvalidWaveSize { value: size })
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Infix selecting a wave-specific primitive (`wave32.`), empty for native waves
    pub fn primitive_infix(self) -> String {
        if self.get() == Self::NATIVE {
            String::new()
        } else {
            format!("wave{}.", self.get())
        }
    }
}

impl fmt::Display for WaveSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
