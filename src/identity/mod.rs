// SPDX-License-Identifier: PMPL-1.0-or-later

//! Host product/version detection
//!
//! Resolution walks an explicit ordered provider chain; the first provider
//! returning a non-empty value wins and the configured default (empty
//! string) covers a full miss. Every provider is best-effort: a missing or
//! unreadable source is an expected case, never an error.
//!
//! Providers, in order:
//! 1. installer buildstamp file (`[Main]` section, `Product=`/`Version=`)
//! 2. `MAYDAY_PRODUCT` / `MAYDAY_VERSION` environment variables
//! 3. system release files (`/etc/system-release`, `/etc/redhat-release`)

use crate::types::Identity;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default installer buildstamp location.
pub const BUILDSTAMP_PATH: &str = "/.buildstamp";

/// Environment override keys.
pub const PRODUCT_ENV: &str = "MAYDAY_PRODUCT";
pub const VERSION_ENV: &str = "MAYDAY_VERSION";

/// Release files probed in order; the first readable one is used.
pub const SYSTEM_RELEASE_PATHS: &[&str] = &["/etc/system-release", "/etc/redhat-release"];

/// Identity resolver over the provider chain.
///
/// Paths and environment keys are configurable so callers (and tests) can
/// point the chain at their own sources. Nothing is cached across calls.
#[derive(Debug, Clone)]
pub struct Resolver {
    buildstamp: PathBuf,
    release_paths: Vec<PathBuf>,
    product_env: String,
    version_env: String,
    default_product: String,
    default_version: String,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            buildstamp: PathBuf::from(BUILDSTAMP_PATH),
            release_paths: SYSTEM_RELEASE_PATHS.iter().map(PathBuf::from).collect(),
            product_env: PRODUCT_ENV.to_string(),
            version_env: VERSION_ENV.to_string(),
            default_product: String::new(),
            default_version: String::new(),
        }
    }

    pub fn with_buildstamp<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.buildstamp = path.into();
        self
    }

    pub fn with_release_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.release_paths = paths;
        self
    }

    pub fn with_env_keys<S: Into<String>>(mut self, product: S, version: S) -> Self {
        self.product_env = product.into();
        self.version_env = version.into();
        self
    }

    pub fn with_defaults<S: Into<String>>(mut self, product: S, version: S) -> Self {
        self.default_product = product.into();
        self.default_version = version.into();
        self
    }

    /// Product name of the running system; empty-default when unknown.
    pub fn product(&self) -> String {
        self.buildstamp_value("Product")
            .or_else(|| env_value(&self.product_env))
            .or_else(|| self.product_from_release_file())
            .unwrap_or_else(|| self.default_product.clone())
    }

    /// Version of the running system, always a string.
    pub fn version(&self) -> String {
        self.buildstamp_value("Version")
            .or_else(|| env_value(&self.version_env))
            .or_else(|| self.version_from_release_file())
            .unwrap_or_else(|| self.default_version.clone())
    }

    pub fn resolve(&self) -> Identity {
        Identity {
            product: self.product(),
            version: self.version(),
        }
    }

    /// Look up a key in the `[Main]` section of the buildstamp file.
    fn buildstamp_value(&self, key: &str) -> Option<String> {
        let content = fs::read_to_string(&self.buildstamp).ok()?;
        let mut in_main = false;
        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('[') {
                in_main = line == "[Main]";
                continue;
            }
            if !in_main {
                continue;
            }
            if let Some((k, v)) = line.split_once('=') {
                if k.trim() == key {
                    return non_empty(v.trim());
                }
            }
        }
        None
    }

    fn product_from_release_file(&self) -> Option<String> {
        for path in &self.release_paths {
            let Some(content) = read_release_file(path) else {
                continue;
            };
            if content.starts_with("Red Hat Enterprise Linux") {
                return Some("Red Hat Enterprise Linux".to_string());
            }
            if content.starts_with("Fedora") {
                return Some("Fedora".to_string());
            }
            if let Some(i) = content.find(" release") {
                if let Some(name) = non_empty(content[..i].trim()) {
                    return Some(name);
                }
            }
        }
        None
    }

    fn version_from_release_file(&self) -> Option<String> {
        for path in &self.release_paths {
            let Some(content) = read_release_file(path) else {
                continue;
            };
            if content.contains("Rawhide") {
                return Some("rawhide".to_string());
            }
            let mut words = content.split_whitespace();
            while let Some(word) = words.next() {
                if word == "release" {
                    if let Some(version) = words.next() {
                        return Some(version.to_string());
                    }
                }
            }
        }
        None
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|v| non_empty(v.trim()))
}

fn read_release_file(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
