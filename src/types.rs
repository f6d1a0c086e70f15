// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for mayday
//!
//! A problem record is an ordered, unique-key string map handed to a
//! reporting backend once per crash event. Identity is the resolved
//! (product, version) pair of the host installer environment.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Well-known problem record keys.
pub mod keys {
    pub const COMPONENT: &str = "component";
    pub const HASHMARKERNAME: &str = "hashmarkername";
    pub const DUPHASH: &str = "duphash";
    pub const REASON: &str = "reason";
    pub const DESCRIPTION: &str = "description";
    pub const EXCEPTION_FILE: &str = "exception_file";
    pub const PRODUCT: &str = "product";
    pub const VERSION: &str = "version";
    pub const OS_RELEASE: &str = "os_release";
    pub const TYPE: &str = "type";
    pub const TIME: &str = "time";
    pub const PID: &str = "pid";
    pub const ARCHITECTURE: &str = "architecture";
    pub const KERNEL: &str = "kernel";
}

/// Ordered string-to-string record describing one crash/report event.
///
/// Keys are unique; `add` on an existing key replaces the value in place,
/// keeping the key's original position. Created per report event, populated
/// synchronously, then handed to dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemRecord {
    entries: Vec<(String, String)>,
}

impl ProblemRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for ProblemRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Resolved (product, version) pair of the host environment.
///
/// Either part may be empty when detection falls through the whole
/// provider chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub product: String,
    pub version: String,
}

impl Identity {
    /// Composed release string, exactly `"<product> release <version>"`.
    ///
    /// Downstream consumers parse this format; see [`parse_release`].
    /// `None` unless both parts are non-empty.
    pub fn os_release(&self) -> Option<String> {
        if self.product.is_empty() || self.version.is_empty() {
            return None;
        }
        Some(format!("{} release {}", self.product, self.version))
    }
}

/// Split an os_release string back into (product, version).
pub fn parse_release(release: &str) -> Option<(String, String)> {
    let (product, rest) = release.split_once(" release ")?;
    let version = rest.split_whitespace().next()?;
    if product.is_empty() {
        return None;
    }
    Some((product.to_string(), version.to_string()))
}

/// Flag set handed to the reporting backend entry points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFlags(u32);

impl ReportFlags {
    pub const NONE: Self = Self(0);
    /// Drive the command-line reporting workflow.
    pub const RUN_CLI: Self = Self(1 << 0);
    /// Wait for the report run to finish before returning.
    pub const WAIT: Self = Self(1 << 1);
    /// Run the full-screen newt frontend first.
    pub const RUN_NEWT: Self = Self(1 << 2);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ReportFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ReportFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ReportFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut names = Vec::new();
        if self.contains(Self::RUN_CLI) {
            names.push("RUN_CLI");
        }
        if self.contains(Self::WAIT) {
            names.push("WAIT");
        }
        if self.contains(Self::RUN_NEWT) {
            names.push("RUN_NEWT");
        }
        write!(f, "{}", names.join("|"))
    }
}
