// SPDX-License-Identifier: PMPL-1.0-or-later

//! Deduplication hash helper

use sha2::{Digest, Sha256};

/// Hex digest used as the `duphash` field.
///
/// Component-scoped so identical traces from different components do not
/// collapse into one bucket.
pub fn duphash(component: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(component.as_bytes());
    hasher.update(b"\n");
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
