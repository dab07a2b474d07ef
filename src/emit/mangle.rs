//! Symbol names for emitted functions
//!
//! Names follow the length-prefixed `_Z<len><name><params>` convention.
//! The compiler looks functions up by these exact strings.

use crate::ops::{GroupFunc, Operator, WaveSize};
use crate::types::{TypeKind, VectorWidth};

/// Unmangled name, e.g. `sub_group_reduce_add_nonuniform_wave64`
pub fn base_name(group: GroupFunc, op: Operator, wave: WaveSize) -> String {
    format!("{}_{}_nonuniform_wave{}", group.symbol_stem(), op.token(), wave)
}

/// Full symbol including the leading `@`
pub fn symbol(
    group: GroupFunc,
    op: Operator,
    kind: TypeKind,
    width: VectorWidth,
    wave: WaveSize,
) -> String {
    let base = base_name(group, op, wave);
    format!("@_Z{}{}{}", base.len(), base, kind.mangled(width))
}
