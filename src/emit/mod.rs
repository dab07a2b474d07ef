//! Per-combination emission
//!
//! Architecture:
//! ```text
//! OpEntry x GroupFunc x VectorWidth -> comment + define line + body
//! ```

pub mod body;
pub mod mangle;
pub mod registers;

use serde::{Deserialize, Serialize};

use crate::ops::{BitWidth, GroupFunc, Lowering, OpEntry, Operator, WaveSize};
use crate::types::{TypeKind, VectorWidth};

pub use body::emit_body;
pub use registers::{Registers, Value};

/// Which GLSL extension spelling the documentation comments use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    /// `subgroupInclusiveAdd` (GL_KHR_shader_subgroup_arithmetic)
    #[default]
    Khr,
    /// `addInvocationsInclusiveScanNonUniform` (GL_AMD_shader_ballot)
    Amd,
}

/// One emitted function and what it implements
#[derive(Debug, Clone, Serialize)]
pub struct EmuFunction {
    pub symbol: String,
    /// GLSL signature named in the documentation comment
    pub glsl: String,
    pub group: GroupFunc,
    pub operator: Operator,
    #[serde(rename = "type")]
    pub kind: TypeKind,
    pub components: u32,
    #[serde(skip)]
    pub text: String,
}

/// GLSL type name shown in comments; hybrid entries name both kinds
fn comment_type(entry: &OpEntry, width: VectorWidth) -> String {
    let name = entry.kind.glsl_name(width);
    match (entry.lowering, entry.kind.desc().hybrid_partner) {
        (Lowering::Hybrid, Some(partner)) => format!("{}/{}", name, partner.glsl_name(width)),
        _ => name,
    }
}

fn glsl_signature(entry: &OpEntry, group: GroupFunc, width: VectorWidth, style: CommentStyle) -> String {
    let ty = comment_type(entry, width);
    match style {
        CommentStyle::Khr => format!(
            "{} {}{}({})",
            ty,
            group.khr_prefix(),
            entry.op.capitalized(),
            ty
        ),
        CommentStyle::Amd => format!("{} {}{}({})", ty, entry.op.token(), group.amd_suffix(), ty),
    }
}

/// Emit the comment, definition line and body for one combination
pub fn emit_function(
    entry: &OpEntry,
    group: GroupFunc,
    width: VectorWidth,
    wave: WaveSize,
    style: CommentStyle,
) -> EmuFunction {
    let glsl = glsl_signature(entry, group, width, style);
    let symbol = mangle::symbol(group, entry.op, entry.kind, width, wave);
    let ty = entry.kind.llvm_name(width);

    let mut text = String::new();
    text.push_str(&format!("; GLSL: {}\n", glsl));
    text.push_str(&format!("define spir_func {} {}({} %value)\n", ty, symbol, ty));
    text.push_str(&emit_body(entry, group, width, wave));
    text.push('\n');

    EmuFunction {
        symbol,
        glsl,
        group,
        operator: entry.op,
        kind: entry.kind,
        components: width.components(),
        text,
    }
}

/// Emit every function of a bit-width table, in table order
pub fn emit_table(bits: BitWidth, wave: WaveSize, style: CommentStyle) -> Vec<EmuFunction> {
    let mut functions = Vec::new();
    for entry in bits.table() {
        tracing::debug!("Emitting {} {} ({:?})", entry.op, entry.kind, entry.lowering);
        for group in GroupFunc::ALL {
            for width in VectorWidth::ALL {
                functions.push(emit_function(entry, group, width, wave, style));
            }
        }
    }
    tracing::debug!("Emitted {} functions for {}", functions.len(), bits);
    functions
}
