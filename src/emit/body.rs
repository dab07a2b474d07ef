//! Function body emission
//!
//! A body moves `%value` into its integer storage class, runs every
//! component through `set.inactive` and the group primitive, then converts
//! the result back to the operand type.

use crate::ops::{ArithOp, GroupFunc, OpEntry, WaveSize};
use crate::types::{StorageClass, TypeKind, VectorWidth};

use super::registers::{Registers, Value};

const INDENT: &str = "    ";

struct BodyEmitter {
    out: String,
    regs: Registers,
    kind: TypeKind,
    width: VectorWidth,
    arith: ArithOp,
    storage: StorageClass,
    inactive_callee: String,
    group_callee: String,
}

/// Emit the body of one group-operation function, braces included
pub fn emit_body(entry: &OpEntry, group: GroupFunc, width: VectorWidth, wave: WaveSize) -> String {
    let storage = entry.kind.storage();
    let emitter = BodyEmitter {
        out: String::new(),
        regs: Registers::new(),
        kind: entry.kind,
        width,
        arith: entry.arith,
        storage,
        inactive_callee: format!("@llpc.subgroup.set.inactive.{}", storage.suffix()),
        group_callee: format!(
            "{}{}{}",
            group.primitive(),
            wave.primitive_infix(),
            storage.suffix()
        ),
    };
    emitter.emit()
}

impl BodyEmitter {
    fn emit(mut self) -> String {
        self.out.push_str("{\n");
        self.comment(&format!(
            "{} = arithmetic {}",
            self.arith.id(),
            self.arith.mnemonic()
        ));

        let stored = self.convert_in(Value::Param);
        let combined = if self.width.is_scalar() {
            self.combine_scalar(stored)
        } else {
            self.combine_vector(stored)
        };
        let result = self.convert_out(combined);

        self.out.push('\n');
        let ret = format!("ret {} {}", self.natural_type(), result);
        self.raw(&ret);
        self.out.push_str("}\n");
        self.out
    }

    fn natural_type(&self) -> String {
        self.kind.llvm_name(self.width)
    }

    fn storage_type(&self) -> String {
        self.width.wrap(self.storage.scalar())
    }

    /// 32-bit type a 16-bit operand is widened through
    fn widened_type(&self) -> String {
        self.kind
            .desc()
            .widened
            .unwrap_or(self.kind)
            .llvm_name(self.width)
    }

    fn raw(&mut self, text: &str) {
        self.out.push_str(INDENT);
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn comment(&mut self, text: &str) {
        self.raw(&format!("; {}", text));
    }

    /// Emit `%n = <rhs>` into the next register
    fn inst(&mut self, rhs: String) -> Value {
        let reg = self.regs.fresh();
        self.raw(&format!("{} = {}", reg, rhs));
        reg
    }

    fn convert_in(&mut self, value: Value) -> Value {
        let natural = self.natural_type();
        let storage = self.storage_type();
        match self.kind {
            TypeKind::Int | TypeKind::Uint | TypeKind::Int64 | TypeKind::Uint64 => value,
            TypeKind::Float | TypeKind::Double => {
                self.inst(format!("bitcast {} {} to {}", natural, value, storage))
            }
            TypeKind::Bool => self.inst(format!("zext {} {} to {}", natural, value, storage)),
            TypeKind::Int16 => {
                let wide = self.widened_type();
                self.inst(format!("sext {} {} to {}", natural, value, wide))
            }
            TypeKind::Uint16 => {
                let wide = self.widened_type();
                self.inst(format!("zext {} {} to {}", natural, value, wide))
            }
            TypeKind::Float16 => {
                let wide = self.widened_type();
                let ext = self.inst(format!("fpext {} {} to {}", natural, value, wide));
                self.inst(format!("bitcast {} {} to {}", wide, ext, storage))
            }
        }
    }

    fn convert_out(&mut self, value: Value) -> Value {
        let natural = self.natural_type();
        let storage = self.storage_type();
        match self.kind {
            TypeKind::Int | TypeKind::Uint | TypeKind::Int64 | TypeKind::Uint64 => value,
            TypeKind::Float | TypeKind::Double => {
                self.inst(format!("bitcast {} {} to {}", storage, value, natural))
            }
            TypeKind::Bool => self.inst(format!("trunc {} {} to {}", storage, value, natural)),
            TypeKind::Int16 | TypeKind::Uint16 => {
                let wide = self.widened_type();
                self.inst(format!("trunc {} {} to {}", wide, value, natural))
            }
            TypeKind::Float16 => {
                let wide = self.widened_type();
                let cast = self.inst(format!("bitcast {} {} to {}", storage, value, wide));
                self.inst(format!("fptrunc {} {} to {}", wide, cast, natural))
            }
        }
    }

    fn set_inactive(&mut self, value: Value) -> Value {
        let scalar = self.storage.scalar();
        let rhs = format!(
            "call {} {}(i32 {}, {} {})",
            scalar,
            self.inactive_callee,
            self.arith.id(),
            scalar,
            value
        );
        self.inst(rhs)
    }

    fn group_op(&mut self, value: Value) -> Value {
        let scalar = self.storage.scalar();
        let rhs = format!(
            "call {} {}(i32 {}, {} {})",
            scalar,
            self.group_callee,
            self.arith.id(),
            scalar,
            value
        );
        self.inst(rhs)
    }

    fn combine_scalar(&mut self, value: Value) -> Value {
        let active = self.set_inactive(value);
        self.group_op(active)
    }

    /// The primitives only take scalars, so vectors are split per component
    fn combine_vector(&mut self, value: Value) -> Value {
        let vector = self.storage_type();
        let scalar = self.storage.scalar();
        let components = self.width.components();

        self.out.push('\n');
        let elements: Vec<Value> = (0..components)
            .map(|i| self.inst(format!("extractelement {} {}, i32 {}", vector, value, i)))
            .collect();

        self.out.push('\n');
        let actives: Vec<Value> = elements.into_iter().map(|e| self.set_inactive(e)).collect();

        self.out.push('\n');
        let results: Vec<Value> = actives.into_iter().map(|a| self.group_op(a)).collect();

        self.out.push('\n');
        let mut acc = Value::Undef;
        for (i, component) in results.into_iter().enumerate() {
            acc = self.inst(format!(
                "insertelement {} {}, {} {}, {} {}",
                vector, acc, scalar, component, scalar, i
            ));
        }
        acc
    }
}
