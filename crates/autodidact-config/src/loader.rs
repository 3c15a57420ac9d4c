// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./autodidact.toml` > `~/.config/autodidact/autodidact.toml`
//! > `/etc/autodidact/autodidact.toml`, with `AUTODIDACT_` environment
//! variable overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AutodidactConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/autodidact/autodidact.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "autodidact.toml";

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("autodidact").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/autodidact/autodidact.toml`
/// 3. `~/.config/autodidact/autodidact.toml`
/// 4. `./autodidact.toml`
/// 5. `AUTODIDACT_*` environment variables
pub fn load_config() -> Result<AutodidactConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AutodidactConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AutodidactConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AutodidactConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AutodidactConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full layered Figment, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AutodidactConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `AUTODIDACT_INDEX_FUZZY_THRESHOLD` must become
/// `index.fuzzy_threshold`, not `index.fuzzy.threshold`. Providers are an
/// array of tables and are configured through files only.
fn env_provider() -> Env {
    Env::prefixed("AUTODIDACT_").map(|key| {
        map_env_key(key.as_str()).into()
    })
}

fn map_env_key(key: &str) -> String {
    for section in ["engine", "storage", "index", "teacher"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
