//! Generator configuration
//!
//! Everything here only shapes the module text around the generated
//! functions. The operator tables themselves are not configurable.

use serde::Deserialize;
use std::path::Path;

use crate::diagnostics::{EmuError, Result};
use crate::emit::CommentStyle;

pub const DEFAULT_DATALAYOUT: &str = "e-p:64:64:64-i1:8:8-i8:8:8-i16:16:16-i32:32:32-i64:64:64-f32:32:32-f64:64:64-v16:16:16-v24:32:32-v32:32:32-v48:64:64-v64:64:64-v96:128:128-v128:128:128-v192:256:256-v256:256:256-v512:512:512-v1024:1024:1024";

pub const DEFAULT_TRIPLE: &str = "spir64-unknown-unknown";

/// Module-level settings, loadable from TOML
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    pub comment_style: CommentStyle,
    pub target_datalayout: String,
    pub target_triple: String,
    /// Lines of the copyright banner at the top of every module
    pub copyright: Vec<String>,
    /// Tool named in the "generated automatically" note
    pub tool_name: String,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            comment_style: CommentStyle::Khr,
            target_datalayout: DEFAULT_DATALAYOUT.to_string(),
            target_triple: DEFAULT_TRIPLE.to_string(),
            copyright: vec![
                "Copyright (c) 2018 Advanced Micro Devices, Inc. All Rights Reserved.".to_string(),
                String::new(),
                "SPDX-License-Identifier: MIT".to_string(),
            ],
            tool_name: "emugen".to_string(),
        }
    }
}

impl GenConfig {
    /// Load a config file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EmuError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        tracing::debug!("Loaded generator config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| EmuError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_comment_style(mut self, style: CommentStyle) -> Self {
        self.comment_style = style;
        self
    }

    /// Effective config for one run: an explicit style wins over the file,
    /// the file over the defaults
    pub fn resolve(path: Option<&Path>, style: Option<CommentStyle>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(match style {
            Some(style) => config.with_comment_style(style),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = GenConfig::parse("", Path::new("emugen.toml")).unwrap();
        assert_eq!(config, GenConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let text = r#"
comment_style = "amd"
copyright = ["Copyright (c) Example Corp."]
"#;
        let config = GenConfig::parse(text, Path::new("emugen.toml")).unwrap();
        assert_eq!(config.comment_style, CommentStyle::Amd);
        assert_eq!(config.copyright, vec!["Copyright (c) Example Corp.".to_string()]);
        assert_eq!(config.target_triple, DEFAULT_TRIPLE);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = GenConfig::parse("wave = 32", Path::new("emugen.toml")).unwrap_err();
        assert!(matches!(err, EmuError::Config { .. }));
    }

    #[test]
    fn test_override_comment_style() {
        let config = GenConfig::default().with_comment_style(CommentStyle::Amd);
        assert_eq!(config.comment_style, CommentStyle::Amd);
    }

    #[test]
    fn test_resolve_without_file() {
        assert_eq!(GenConfig::resolve(None, None).unwrap(), GenConfig::default());
        let config = GenConfig::resolve(None, Some(CommentStyle::Amd)).unwrap();
        assert_eq!(config.comment_style, CommentStyle::Amd);
    }

    #[test]
    fn test_resolve_flag_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("amd.toml");
        std::fs::write(&path, "comment_style = \"amd\"\ntool_name = \"buildgen\"\n").unwrap();

        let from_file = GenConfig::resolve(Some(&path), None).unwrap();
        assert_eq!(from_file.comment_style, CommentStyle::Amd);

        let overridden = GenConfig::resolve(Some(&path), Some(CommentStyle::Khr)).unwrap();
        assert_eq!(overridden.comment_style, CommentStyle::Khr);
        assert_eq!(overridden.tool_name, "buildgen");
    }

    #[test]
    fn test_resolve_missing_file() {
        let err = GenConfig::resolve(Some(Path::new("does/not/exist.toml")), None).unwrap_err();
        assert!(matches!(err, EmuError::Read { .. }));
    }
}
