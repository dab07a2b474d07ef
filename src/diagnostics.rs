//! Generator diagnostics
//!
//! Errors are reported through miette. The tables themselves are compile-time
//! constants, so apart from a zero wave size every failure here comes from the
//! environment: the file system, a config file, or a stale checked-in module.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum EmuError {
    // === I/O ===
    #[error("Failed to create output directory `{}`", .path.display())]
    #[diagnostic(code(io::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write `{}`", .path.display())]
    #[diagnostic(code(io::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read `{}`", .path.display())]
    #[diagnostic(code(io::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Check mode ===
    #[error("`{}` is out of date", .path.display())]
    #[diagnostic(
        code(check::stale),
        help("re-run the generator without `--check` to regenerate it")
    )]
    Stale { path: PathBuf },

    // === Configuration ===
    #[error("Invalid generator configuration in `{}`", .path.display())]
    #[diagnostic(code(config::parse))]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Wave size must be positive, got {value}")]
    #[diagnostic(code(config::wave_size))]
    InvalidWaveSize { value: u32 },

    // === Output ===
    #[error("Failed to serialize symbol manifest")]
    #[diagnostic(code(output::manifest))]
    Manifest(#[from] serde_json::Error),

    #[error("Symbol `{symbol}` generated twice")]
    #[diagnostic(
        code(internal::duplicate_symbol),
        help("two table entries produce the same mangled name; check the operator tables")
    )]
    DuplicateSymbol { symbol: String },
}

pub type Result<T> = std::result::Result<T, EmuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EmuError::Stale {
            path: PathBuf::from("out/g_glslGroupOpEmuD32W64.ll"),
        };
        assert_eq!(err.to_string(), "`out/g_glslGroupOpEmuD32W64.ll` is out of date");

        let err = EmuError::InvalidWaveSize { value: 0 };
        assert_eq!(err.to_string(), "Wave size must be positive, got 0");
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = EmuError::DuplicateSymbol {
            symbol: "@_Z1x".to_string(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("internal::duplicate_symbol"));
    }
}
