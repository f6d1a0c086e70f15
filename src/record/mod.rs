// SPDX-License-Identifier: PMPL-1.0-or-later

//! Problem record assembly
//!
//! Builds the key/value record a reporting backend consumes: caller fields,
//! resolved identity, baseline host facts, and the attached exception file.

pub mod basics;
pub mod hash;
pub mod output;

use crate::error::{MaydayError, Result};
use crate::identity::Resolver;
use crate::types::{keys, ProblemRecord};
use std::fs;
use std::io::Write;
use std::path::Path;

pub use output::RecordFormat;

/// Fields `unhandled_exception_signature` refuses to proceed without.
pub const REQUIRED_FIELDS: [&str; 6] = [
    keys::COMPONENT,
    keys::HASHMARKERNAME,
    keys::DUPHASH,
    keys::REASON,
    keys::DESCRIPTION,
    keys::EXCEPTION_FILE,
];

/// Build a signature record for a detected alert condition.
///
/// No identity resolution happens here; alerts carry their own context.
pub fn alert_signature(
    component: &str,
    hashmarkername: &str,
    duphash: &str,
    summary: &str,
    alert_signature: &str,
) -> ProblemRecord {
    let mut record = ProblemRecord::new();
    record.add(keys::COMPONENT, component);
    record.add(keys::HASHMARKERNAME, hashmarkername);
    record.add(keys::DUPHASH, duphash);
    record.add(keys::REASON, summary);
    record.add(keys::DESCRIPTION, alert_signature);
    basics::fill(&mut record);
    record
}

/// Build the record for an unhandled exception/crash event.
///
/// Caller fields are copied in order, identity is resolved and merged,
/// baseline facts fill any remaining gaps, and the exception file is
/// attached under its base name. Only a missing required field fails;
/// an unreadable exception file just leaves a diagnostic line on
/// `diagnostics` and the record without that attachment.
pub fn unhandled_exception_signature(
    fields: &[(String, String)],
    resolver: &Resolver,
    diagnostics: &mut dyn Write,
) -> Result<ProblemRecord> {
    for name in REQUIRED_FIELDS {
        if !fields.iter().any(|(key, _)| key == name) {
            return Err(MaydayError::missing_argument(name));
        }
    }

    let mut record = ProblemRecord::new();
    for (key, value) in fields {
        record.add(key.clone(), value.clone());
    }

    let identity = resolver.resolve();
    if !identity.product.is_empty() {
        record.add(keys::PRODUCT, identity.product.clone());
    }
    if !identity.version.is_empty() {
        record.add(keys::VERSION, identity.version.clone());
    }
    if let Some(os_release) = identity.os_release() {
        record.add(keys::OS_RELEASE, os_release);
    }

    basics::fill(&mut record);

    if let Some(path) = record.get(keys::EXCEPTION_FILE).map(str::to_string) {
        attach_file(&mut record, Path::new(&path), diagnostics);
    }

    Ok(record)
}

/// Store a file's contents under its base name, best effort.
///
/// Content is treated as opaque bytes; anything that is not valid UTF-8
/// is decoded lossily rather than dropped.
fn attach_file(record: &mut ProblemRecord, path: &Path, diagnostics: &mut dyn Write) {
    match fs::read(path) {
        Ok(bytes) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            record.add(name, String::from_utf8_lossy(&bytes).into_owned());
        }
        Err(err) => {
            let _ = writeln!(
                diagnostics,
                "Can't add {} to report: {}",
                path.display(),
                err
            );
        }
    }
}
