//! Emulation IR generator for GLSL subgroup arithmetic
//!
//! Produces LLVM IR modules implementing subgroup reduce, inclusive-scan
//! and exclusive-scan for every operator/type/vector-width combination of a
//! bit-width table. Each function funnels its operand through integer
//! storage and the `@llpc.subgroup.*` primitives.
//!
//! # Architecture
//!
//! ```text
//! ops tables → emit (comment + define + body) → module (header + functions + declarations) → .ll
//! ```
//!
//! # Example
//!
//! ```no_run
//! use emugen::{BitWidth, GenConfig, WaveSize};
//!
//! let wave = WaveSize::new(64)?;
//! let ir = emugen::generate(BitWidth::W32, wave, &GenConfig::default())?;
//! assert!(ir.contains("target triple"));
//! # Ok::<(), emugen::EmuError>(())
//! ```

pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod module;
pub mod ops;
pub mod types;

pub use config::GenConfig;
pub use diagnostics::EmuError;
pub use emit::{CommentStyle, EmuFunction};
pub use module::EmuModule;
pub use ops::{BitWidth, GroupFunc, Operator, WaveSize};
pub use types::{TypeKind, VectorWidth};

/// Generator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the complete module text for a bit width and wave size
pub fn generate(bits: BitWidth, wave: WaveSize, config: &GenConfig) -> diagnostics::Result<String> {
    let module = EmuModule::build(bits, wave, config.comment_style)?;
    Ok(module.render(config))
}
