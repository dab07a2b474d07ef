//! Operand type descriptors
//!
//! Every primitive kind a group operation can be emulated for, with the
//! names it carries in GLSL, in Itanium-style mangling and in LLVM IR.

use serde::Serialize;
use std::fmt;

/// Primitive operand kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Int,
    Uint,
    Float,
    Int64,
    Uint64,
    Double,
    Int16,
    Uint16,
    Float16,
    Bool,
}

/// Static description of a [`TypeKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDesc {
    /// GLSL scalar type name (`int`, `float16_t`, ...)
    pub glsl_scalar: &'static str,
    /// GLSL vector type prefix, completed with the component count
    pub glsl_vector: &'static str,
    /// Mangling token for the scalar type
    pub mangle: &'static str,
    /// LLVM IR scalar type
    pub llvm: &'static str,
    /// Unsigned kind covered together with this one by hybrid entries
    pub hybrid_partner: Option<TypeKind>,
    /// 32-bit kind a 16-bit value is widened to before reaching storage
    pub widened: Option<TypeKind>,
}

impl TypeKind {
    pub const ALL: [TypeKind; 10] = [
        TypeKind::Int,
        TypeKind::Uint,
        TypeKind::Float,
        TypeKind::Int64,
        TypeKind::Uint64,
        TypeKind::Double,
        TypeKind::Int16,
        TypeKind::Uint16,
        TypeKind::Float16,
        TypeKind::Bool,
    ];

    pub const fn desc(self) -> TypeDesc {
        match self {
            TypeKind::Int => TypeDesc {
                glsl_scalar: "int",
                glsl_vector: "ivec",
                mangle: "i",
                llvm: "i32",
                hybrid_partner: Some(TypeKind::Uint),
                widened: None,
            },
            TypeKind::Uint => TypeDesc {
                glsl_scalar: "uint",
                glsl_vector: "uvec",
                mangle: "j",
                llvm: "i32",
                hybrid_partner: None,
                widened: None,
            },
            TypeKind::Float => TypeDesc {
                glsl_scalar: "float",
                glsl_vector: "vec",
                mangle: "f",
                llvm: "float",
                hybrid_partner: None,
                widened: None,
            },
            TypeKind::Int64 => TypeDesc {
                glsl_scalar: "int64_t",
                glsl_vector: "i64vec",
                mangle: "l",
                llvm: "i64",
                hybrid_partner: Some(TypeKind::Uint64),
                widened: None,
            },
            TypeKind::Uint64 => TypeDesc {
                glsl_scalar: "uint64_t",
                glsl_vector: "u64vec",
                mangle: "m",
                llvm: "i64",
                hybrid_partner: None,
                widened: None,
            },
            TypeKind::Double => TypeDesc {
                glsl_scalar: "double",
                glsl_vector: "dvec",
                mangle: "d",
                llvm: "double",
                hybrid_partner: None,
                widened: None,
            },
            TypeKind::Int16 => TypeDesc {
                glsl_scalar: "int16_t",
                glsl_vector: "i16vec",
                mangle: "s",
                llvm: "i16",
                hybrid_partner: Some(TypeKind::Uint16),
                widened: Some(TypeKind::Int),
            },
            TypeKind::Uint16 => TypeDesc {
                glsl_scalar: "uint16_t",
                glsl_vector: "u16vec",
                mangle: "t",
                llvm: "i16",
                hybrid_partner: None,
                widened: Some(TypeKind::Uint),
            },
            TypeKind::Float16 => TypeDesc {
                glsl_scalar: "float16_t",
                glsl_vector: "f16vec",
                mangle: "Dh",
                llvm: "half",
                hybrid_partner: None,
                widened: Some(TypeKind::Float),
            },
            TypeKind::Bool => TypeDesc {
                glsl_scalar: "bool",
                glsl_vector: "bvec",
                mangle: "b",
                llvm: "i1",
                hybrid_partner: None,
                widened: None,
            },
        }
    }

    /// Storage class used to carry this kind through the group primitives
    pub const fn storage(self) -> StorageClass {
        match self {
            TypeKind::Int | TypeKind::Uint | TypeKind::Float | TypeKind::Bool => StorageClass::I32,
            TypeKind::Int64 | TypeKind::Uint64 | TypeKind::Double => StorageClass::I64,
            TypeKind::Int16 | TypeKind::Uint16 | TypeKind::Float16 => StorageClass::I16,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, TypeKind::Float | TypeKind::Double | TypeKind::Float16)
    }

    /// GLSL name of the scalar or vector type
    pub fn glsl_name(self, width: VectorWidth) -> String {
        let desc = self.desc();
        if width.is_scalar() {
            desc.glsl_scalar.to_string()
        } else {
            format!("{}{}", desc.glsl_vector, width.components())
        }
    }

    /// LLVM IR name of the scalar or vector type
    pub fn llvm_name(self, width: VectorWidth) -> String {
        width.wrap(self.desc().llvm)
    }

    /// Mangled parameter type (`i`, `Dv3_f`, ...)
    pub fn mangled(self, width: VectorWidth) -> String {
        let desc = self.desc();
        if width.is_scalar() {
            desc.mangle.to_string()
        } else {
            format!("Dv{}_{}", width.components(), desc.mangle)
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.desc().glsl_scalar)
    }
}

/// Vector width: 0 is a scalar, `n > 0` a vector of `n + 1` components
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorWidth(u8);

impl VectorWidth {
    pub const SCALAR: VectorWidth = VectorWidth(0);
    pub const MAX: u8 = 3;

    /// Every width the generator covers, scalar first
    pub const ALL: [VectorWidth; 4] = [VectorWidth(0), VectorWidth(1), VectorWidth(2), VectorWidth(3)];

    pub const fn new(width: u8) -> Option<Self> {
        if width <= Self::MAX {
            Some(VectorWidth(width))
        } else {
            None
        }
    }

    pub const fn is_scalar(self) -> bool {
        self.0 == 0
    }

    pub const fn components(self) -> u32 {
        self.0 as u32 + 1
    }

    /// Wrap an LLVM scalar type into the vector type of this width
    pub fn wrap(self, scalar: &str) -> String {
        if self.is_scalar() {
            scalar.to_string()
        } else {
            format!("<{} x {}>", self.components(), scalar)
        }
    }
}

/// Integer class carrying an operand bit-for-bit through the primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    I32,
    I64,
    /// 16-bit operands, widened to 32-bit storage
    I16,
}

impl StorageClass {
    pub const ALL: [StorageClass; 3] = [StorageClass::I32, StorageClass::I64, StorageClass::I16];

    /// LLVM scalar type actually passed to the primitives
    pub const fn scalar(self) -> &'static str {
        match self {
            StorageClass::I32 | StorageClass::I16 => "i32",
            StorageClass::I64 => "i64",
        }
    }

    /// Suffix selecting the primitive overload
    pub const fn suffix(self) -> &'static str {
        match self {
            StorageClass::I32 => "i32",
            StorageClass::I64 => "i64",
            StorageClass::I16 => "i16",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glsl_names() {
        let vec3 = VectorWidth::new(2).unwrap();
        assert_eq!(TypeKind::Int.glsl_name(VectorWidth::SCALAR), "int");
        assert_eq!(TypeKind::Float.glsl_name(vec3), "vec3");
        assert_eq!(TypeKind::Float16.glsl_name(vec3), "f16vec3");
        assert_eq!(TypeKind::Uint64.glsl_name(vec3), "u64vec3");
    }

    #[test]
    fn test_llvm_names() {
        let vec4 = VectorWidth::new(3).unwrap();
        assert_eq!(TypeKind::Bool.llvm_name(VectorWidth::SCALAR), "i1");
        assert_eq!(TypeKind::Float16.llvm_name(vec4), "<4 x half>");
        assert_eq!(TypeKind::Double.llvm_name(vec4), "<4 x double>");
    }

    #[test]
    fn test_mangling() {
        assert_eq!(TypeKind::Float16.mangled(VectorWidth::SCALAR), "Dh");
        assert_eq!(TypeKind::Uint.mangled(VectorWidth::new(1).unwrap()), "Dv2_j");
    }

    #[test]
    fn test_vector_width_bounds() {
        assert!(VectorWidth::new(3).is_some());
        assert!(VectorWidth::new(4).is_none());
        assert_eq!(VectorWidth::ALL.len(), 4);
    }

    #[test]
    fn test_paired_kinds() {
        for kind in TypeKind::ALL {
            let desc = kind.desc();
            if let Some(partner) = desc.hybrid_partner {
                assert_eq!(partner.desc().llvm, desc.llvm);
                assert_eq!(partner.storage(), kind.storage());
            }
            if let Some(wide) = desc.widened {
                assert_eq!(kind.storage(), StorageClass::I16);
                assert_eq!(wide.storage(), StorageClass::I32);
                assert_eq!(wide.is_float(), kind.is_float());
            }
        }
    }

    #[test]
    fn test_storage_classes() {
        assert_eq!(TypeKind::Bool.storage(), StorageClass::I32);
        assert_eq!(TypeKind::Double.storage(), StorageClass::I64);
        assert_eq!(StorageClass::I16.scalar(), "i32");
        assert_eq!(StorageClass::I16.suffix(), "i16");
    }
}
