// SPDX-License-Identifier: PMPL-1.0-or-later

//! Baseline host facts every record must carry
//!
//! Fills only absent keys, so caller-supplied values always win.

use crate::types::{keys, ProblemRecord};
use chrono::Utc;
use std::fs;

/// Record type marker stamped on every report.
pub const RECORD_TYPE: &str = "mayday";

/// Fill any still-missing mandatory baseline fields.
pub fn fill(record: &mut ProblemRecord) {
    add_missing(record, keys::TYPE, || Some(RECORD_TYPE.to_string()));
    add_missing(record, keys::TIME, || {
        Some(Utc::now().timestamp().to_string())
    });
    add_missing(record, keys::PID, || Some(std::process::id().to_string()));
    add_missing(record, keys::ARCHITECTURE, || {
        Some(std::env::consts::ARCH.to_string())
    });
    add_missing(record, keys::KERNEL, kernel_version);
}

fn add_missing<F: FnOnce() -> Option<String>>(record: &mut ProblemRecord, key: &str, value: F) {
    if record.contains_key(key) {
        return;
    }
    if let Some(value) = value() {
        record.add(key, value);
    }
}

fn kernel_version() -> Option<String> {
    fs::read_to_string("/proc/version")
        .ok()
        .and_then(|v| v.split_whitespace().nth(2).map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_adds_baseline_keys() {
        let mut record = ProblemRecord::new();
        fill(&mut record);

        assert_eq!(record.get(keys::TYPE), Some(RECORD_TYPE));
        assert!(record.contains_key(keys::TIME));
        assert!(record.contains_key(keys::PID));
        assert!(record.contains_key(keys::ARCHITECTURE));
    }

    #[test]
    fn test_fill_never_overwrites_caller_values() {
        let mut record = ProblemRecord::new();
        record.add(keys::TIME, "42");
        record.add(keys::TYPE, "custom");
        fill(&mut record);

        assert_eq!(record.get(keys::TIME), Some("42"));
        assert_eq!(record.get(keys::TYPE), Some("custom"));
    }

    #[test]
    fn test_time_is_epoch_seconds() {
        let mut record = ProblemRecord::new();
        fill(&mut record);

        let time: i64 = record.get(keys::TIME).unwrap().parse().unwrap();
        assert!(time > 1_500_000_000);
    }
}
