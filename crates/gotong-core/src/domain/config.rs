// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::ConfigPathScope;

#[must_use]
pub fn resolve_gotong_config_path(scope: ConfigPathScope) -> PathBuf {
    match scope {
        ConfigPathScope::User => {
            if let Ok(explicit) = std::env::var(crate::ENV_GOTONG_CONFIG) {
                let trimmed = explicit.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                let trimmed = xdg_config_home.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed).join("gotong").join("gotong.env");
                }
            }
            if let Ok(home) = std::env::var("HOME") {
                let trimmed = home.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed)
                        .join(".config")
                        .join("gotong")
                        .join("gotong.env");
                }
            }
            PathBuf::from(".gotong").join("gotong.env")
        }
        ConfigPathScope::Workspace => PathBuf::from(".gotong").join("gotong.env"),
    }
}

/// Parses `KEY=VALUE` lines. Blank lines and `#` comments are skipped, values
/// may be wrapped in single or double quotes.
#[must_use]
pub fn parse_env_file(text: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        out.insert(key.to_string(), value.to_string());
    }
    out
}

/// Configuration source: process environment first, then the workspace file,
/// then the user file.
#[derive(Debug, Clone, Default)]
pub struct ConfigLayers {
    files: Vec<BTreeMap<String, String>>,
}

impl ConfigLayers {
    /// Loads the workspace and user config files that exist. Unreadable files
    /// are skipped.
    #[must_use]
    pub fn discover() -> Self {
        let paths = [
            resolve_gotong_config_path(ConfigPathScope::Workspace),
            resolve_gotong_config_path(ConfigPathScope::User),
        ];
        Self::from_files(&paths)
    }

    #[must_use]
    pub fn from_files(paths: &[PathBuf]) -> Self {
        let files = paths
            .iter()
            .filter_map(|p| read_env_file(p))
            .collect::<Vec<_>>();
        Self { files }
    }

    #[must_use]
    pub fn from_maps(files: Vec<BTreeMap<String, String>>) -> Self {
        Self { files }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        if let Ok(v) = std::env::var(key) {
            return Some(v);
        }
        self.files.iter().find_map(|f| f.get(key).cloned())
    }
}

fn read_env_file(path: &Path) -> Option<BTreeMap<String, String>> {
    std::fs::read_to_string(path).ok().map(|t| parse_env_file(&t))
}
