//! Module assembly and output
//!
//! Wraps the emitted functions in the fixed header (banners, target layout)
//! and the declarations of the subgroup primitives, then writes the result
//! as `g_glslGroupOpEmuD<bits>W<wave>.ll`.

use indexmap::IndexMap;
use indexmap::map::Entry;
use std::path::{Path, PathBuf};

use crate::config::GenConfig;
use crate::diagnostics::{EmuError, Result};
use crate::emit::{self, CommentStyle, EmuFunction};
use crate::ops::{BitWidth, GroupFunc, WaveSize};
use crate::types::StorageClass;

const BANNER_WIDTH: usize = 118;

/// Order in which each storage class declares its group primitives
const DECLARED_GROUPS: [GroupFunc; 3] = [
    GroupFunc::Reduce,
    GroupFunc::ExclusiveScan,
    GroupFunc::InclusiveScan,
];

/// File name of the module for a bit width and wave size
pub fn file_name(bits: BitWidth, wave: WaveSize) -> String {
    format!("g_glslGroupOpEmuD{}W{}.ll", bits.bits(), wave)
}

/// Emulation functions for one (bit width, wave size) pair, keyed by symbol
#[derive(Debug)]
pub struct EmuModule {
    bits: BitWidth,
    wave: WaveSize,
    functions: IndexMap<String, EmuFunction>,
}

impl EmuModule {
    pub fn build(bits: BitWidth, wave: WaveSize, style: CommentStyle) -> Result<Self> {
        let mut functions = IndexMap::new();
        for func in emit::emit_table(bits, wave, style) {
            match functions.entry(func.symbol.clone()) {
                Entry::Occupied(slot) => {
                    return Err(EmuError::DuplicateSymbol {
                        symbol: slot.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(func);
                }
            }
        }
        Ok(Self {
            bits,
            wave,
            functions,
        })
    }

    pub fn bits(&self) -> BitWidth {
        self.bits
    }

    pub fn wave(&self) -> WaveSize {
        self.wave
    }

    pub fn file_name(&self) -> String {
        file_name(self.bits, self.wave)
    }

    pub fn manifest_name(&self) -> String {
        format!("g_glslGroupOpEmuD{}W{}.json", self.bits.bits(), self.wave)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Functions in generation order
    pub fn functions(&self) -> impl Iterator<Item = &EmuFunction> {
        self.functions.values()
    }

    pub fn get(&self, symbol: &str) -> Option<&EmuFunction> {
        self.functions.get(symbol)
    }

    /// Complete module text
    pub fn render(&self, config: &GenConfig) -> String {
        let mut out = self.header(config);
        for func in self.functions.values() {
            out.push_str(&func.text);
        }
        out.push_str(&self.declarations());
        out
    }

    fn header(&self, config: &GenConfig) -> String {
        let rule = format!(";{}\n", "*".repeat(BANNER_WIDTH));
        let mut out = String::new();

        out.push_str(&rule);
        out.push_str(";*\n");
        for line in &config.copyright {
            if line.is_empty() {
                out.push_str(";*\n");
            } else {
                out.push_str(&format!(";*  {}\n", line));
            }
        }
        out.push_str(";*\n");
        out.push_str(&rule);
        out.push('\n');

        out.push_str(&rule);
        out.push_str(&format!(";* @file  {}\n", self.file_name()));
        out.push_str(&format!(
            ";* @brief LLVM-IR file: contains emulation codes for GLSL group operations ({}).\n",
            self.bits
        ));
        out.push_str(";*\n");
        out.push_str(&format!(
            ";* @note  This file has been generated automatically by {}. Do not hand-modify this file.\n",
            config.tool_name
        ));
        out.push_str(&rule);
        out.push('\n');

        out.push_str(&format!(
            "target datalayout = \"{}\"\n",
            config.target_datalayout
        ));
        out.push_str(&format!("target triple = \"{}\"\n", config.target_triple));
        out.push('\n');
        out
    }

    /// Declarations of every primitive the bodies may call.
    ///
    /// At non-native waves these name the `wave<W>.` primitives rather than
    /// repeating the unsuffixed tail written for wave 64.
    fn declarations(&self) -> String {
        let infix = self.wave.primitive_infix();
        let mut out = String::new();
        for class in StorageClass::ALL {
            let ty = class.scalar();
            let suffix = class.suffix();
            out.push_str(&format!(
                "declare spir_func {ty} @llpc.subgroup.set.inactive.{suffix}(i32, {ty}) #0\n"
            ));
            for group in DECLARED_GROUPS {
                out.push_str(&format!(
                    "declare spir_func {ty} {}{infix}{suffix}(i32, {ty}) #0\n",
                    group.primitive()
                ));
            }
            out.push('\n');
        }
        out.push_str("attributes #0 = { nounwind }\n");
        out
    }

    /// Write the module into `dir`, creating it if needed and replacing any existing file
    pub fn write_to(&self, dir: &Path, config: &GenConfig) -> Result<PathBuf> {
        create_dir(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render(config)).map_err(|source| EmuError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Wrote {} functions to {}", self.len(), path.display());
        Ok(path)
    }

    /// Verify the module in `dir` matches what would be generated
    pub fn check_in(&self, dir: &Path, config: &GenConfig) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        let existing = std::fs::read_to_string(&path).map_err(|source| EmuError::Read {
            path: path.clone(),
            source,
        })?;
        if existing != self.render(config) {
            return Err(EmuError::Stale { path });
        }
        tracing::info!("{} is up to date", path.display());
        Ok(path)
    }

    /// Symbol manifest as pretty-printed JSON
    pub fn manifest(&self) -> Result<String> {
        let functions: Vec<&EmuFunction> = self.functions.values().collect();
        Ok(serde_json::to_string_pretty(&functions)?)
    }

    pub fn write_manifest(&self, dir: &Path) -> Result<PathBuf> {
        create_dir(dir)?;
        let path = dir.join(self.manifest_name());
        std::fs::write(&path, self.manifest()?).map_err(|source| EmuError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Wrote symbol manifest to {}", path.display());
        Ok(path)
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| EmuError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(bits: BitWidth, wave: u32) -> EmuModule {
        EmuModule::build(bits, WaveSize::new(wave).unwrap(), CommentStyle::Khr).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            file_name(BitWidth::W16, WaveSize::new(32).unwrap()),
            "g_glslGroupOpEmuD16W32.ll"
        );
        assert_eq!(module(BitWidth::W64, 64).manifest_name(), "g_glslGroupOpEmuD64W64.json");
    }

    #[test]
    fn test_native_wave_declarations() {
        let decls = module(BitWidth::W64, 64).declarations();
        let expected = "\
declare spir_func i32 @llpc.subgroup.set.inactive.i32(i32, i32) #0
declare spir_func i32 @llpc.subgroup.reduce.i32(i32, i32) #0
declare spir_func i32 @llpc.subgroup.exclusiveScan.i32(i32, i32) #0
declare spir_func i32 @llpc.subgroup.inclusiveScan.i32(i32, i32) #0

declare spir_func i64 @llpc.subgroup.set.inactive.i64(i32, i64) #0
declare spir_func i64 @llpc.subgroup.reduce.i64(i32, i64) #0
declare spir_func i64 @llpc.subgroup.exclusiveScan.i64(i32, i64) #0
declare spir_func i64 @llpc.subgroup.inclusiveScan.i64(i32, i64) #0

declare spir_func i32 @llpc.subgroup.set.inactive.i16(i32, i32) #0
declare spir_func i32 @llpc.subgroup.reduce.i16(i32, i32) #0
declare spir_func i32 @llpc.subgroup.exclusiveScan.i16(i32, i32) #0
declare spir_func i32 @llpc.subgroup.inclusiveScan.i16(i32, i32) #0

attributes #0 = { nounwind }
";
        assert_eq!(decls, expected);
    }

    #[test]
    fn test_wave32_declarations_match_calls() {
        let decls = module(BitWidth::W32, 32).declarations();
        assert!(decls.contains("@llpc.subgroup.reduce.wave32.i32(i32, i32)"));
        assert!(decls.contains("@llpc.subgroup.set.inactive.i32(i32, i32)"));
        assert!(!decls.contains("@llpc.subgroup.reduce.i32("));
    }

    #[test]
    fn test_header_layout() {
        let text = module(BitWidth::W32, 64).render(&GenConfig::default());
        let mut lines = text.lines();
        assert_eq!(lines.next().map(str::len), Some(BANNER_WIDTH + 1));
        assert!(text.contains(";* @file  g_glslGroupOpEmuD32W64.ll\n"));
        assert!(text.contains("GLSL group operations (32bit).\n"));
        assert!(text.contains("target triple = \"spir64-unknown-unknown\"\n\n; GLSL: int/uint subgroupAdd(int/uint)\n"));
        assert!(text.ends_with("attributes #0 = { nounwind }\n"));
    }

    #[test]
    fn test_custom_copyright() {
        let config = GenConfig {
            copyright: vec!["Example".to_string(), String::new()],
            ..GenConfig::default()
        };
        let text = module(BitWidth::W16, 64).render(&config);
        assert!(text.contains(";*\n;*  Example\n;*\n;*\n"));
    }

    #[test]
    fn test_lookup_by_symbol() {
        let m = module(BitWidth::W64, 64);
        let func = m.get("@_Z38sub_group_reduce_add_nonuniform_wave64l").unwrap();
        assert_eq!(func.glsl, "int64_t/uint64_t subgroupAdd(int64_t/uint64_t)");
    }
}
