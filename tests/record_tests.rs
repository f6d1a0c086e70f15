// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for problem record assembly

use mayday::identity::Resolver;
use mayday::record::{self, REQUIRED_FIELDS};
use mayday::types::keys;
use mayday::MaydayError;
use std::fs;
use tempfile::TempDir;

/// Resolver that cannot see the real host: missing buildstamp, no release
/// files, env keys nothing sets.
fn isolated_resolver(dir: &TempDir) -> Resolver {
    Resolver::new()
        .with_buildstamp(dir.path().join("no-buildstamp"))
        .with_release_paths(Vec::new())
        .with_env_keys("MAYDAY_TEST_UNSET_PRODUCT", "MAYDAY_TEST_UNSET_VERSION")
}

/// Resolver pinned to a fixed identity via a buildstamp fixture.
fn pinned_resolver(dir: &TempDir, product: &str, version: &str) -> Resolver {
    let stamp = dir.path().join("buildstamp");
    fs::write(
        &stamp,
        format!("[Main]\nProduct={}\nVersion={}\n", product, version),
    )
    .unwrap();
    isolated_resolver(dir).with_buildstamp(stamp)
}

fn base_fields(dir: &TempDir) -> Vec<(String, String)> {
    let trace_path = dir.path().join("traceback");
    fs::write(&trace_path, "trace...").unwrap();

    vec![
        (keys::COMPONENT.to_string(), "anaconda".to_string()),
        (keys::HASHMARKERNAME.to_string(), "anaconda".to_string()),
        (keys::DUPHASH.to_string(), "deadbeef".to_string()),
        (keys::REASON.to_string(), "IndexError: boom".to_string()),
        (keys::DESCRIPTION.to_string(), "full trace".to_string()),
        (
            keys::EXCEPTION_FILE.to_string(),
            trace_path.display().to_string(),
        ),
    ]
}

#[test]
fn test_every_required_field_is_enforced() {
    let dir = TempDir::new().unwrap();
    let resolver = isolated_resolver(&dir);

    for missing in REQUIRED_FIELDS {
        let fields: Vec<_> = base_fields(&dir)
            .into_iter()
            .filter(|(key, _)| key != missing)
            .collect();

        let mut sink = Vec::new();
        let err = record::unhandled_exception_signature(&fields, &resolver, &mut sink)
            .expect_err("missing field should fail assembly");

        assert_eq!(err.to_string(), format!("missing argument {}", missing));
        match err {
            MaydayError::MissingArgument { field } => {
                assert_eq!(field, missing, "error should name the missing field")
            }
            other => panic!("expected MissingArgument, got {:?}", other),
        }
    }
}

#[test]
fn test_os_release_synthesized_exactly() {
    let dir = TempDir::new().unwrap();
    let resolver = pinned_resolver(&dir, "Fedora", "30");

    let mut sink = Vec::new();
    let record =
        record::unhandled_exception_signature(&base_fields(&dir), &resolver, &mut sink).unwrap();

    assert_eq!(record.get(keys::PRODUCT), Some("Fedora"));
    assert_eq!(record.get(keys::VERSION), Some("30"));
    assert_eq!(record.get(keys::OS_RELEASE), Some("Fedora release 30"));
}

#[test]
fn test_no_os_release_without_identity() {
    let dir = TempDir::new().unwrap();
    let resolver = isolated_resolver(&dir);

    let mut sink = Vec::new();
    let record =
        record::unhandled_exception_signature(&base_fields(&dir), &resolver, &mut sink).unwrap();

    assert!(!record.contains_key(keys::PRODUCT));
    assert!(!record.contains_key(keys::VERSION));
    assert!(!record.contains_key(keys::OS_RELEASE));
}

#[test]
fn test_no_os_release_when_only_product_resolves() {
    let dir = TempDir::new().unwrap();
    let stamp = dir.path().join("buildstamp");
    fs::write(&stamp, "[Main]\nProduct=Fedora\n").unwrap();
    let resolver = isolated_resolver(&dir).with_buildstamp(stamp);

    let mut sink = Vec::new();
    let record =
        record::unhandled_exception_signature(&base_fields(&dir), &resolver, &mut sink).unwrap();

    assert_eq!(record.get(keys::PRODUCT), Some("Fedora"));
    assert!(!record.contains_key(keys::VERSION));
    assert!(!record.contains_key(keys::OS_RELEASE));
}

#[test]
fn test_exception_file_attached_under_base_name() {
    let dir = TempDir::new().unwrap();
    let resolver = isolated_resolver(&dir);

    let mut sink = Vec::new();
    let record =
        record::unhandled_exception_signature(&base_fields(&dir), &resolver, &mut sink).unwrap();

    assert_eq!(record.get("traceback"), Some("trace..."));
    assert!(sink.is_empty(), "no diagnostics for a readable file");
}

#[test]
fn test_unreadable_exception_file_is_non_fatal() {
    let dir = TempDir::new().unwrap();
    let resolver = isolated_resolver(&dir);

    let mut fields = base_fields(&dir);
    let ghost = dir.path().join("no-such-traceback");
    for entry in &mut fields {
        if entry.0 == keys::EXCEPTION_FILE {
            entry.1 = ghost.display().to_string();
        }
    }

    let mut sink = Vec::new();
    let record = record::unhandled_exception_signature(&fields, &resolver, &mut sink)
        .expect("assembly should survive a missing attachment");

    assert!(!record.contains_key("no-such-traceback"));
    let diagnostics = String::from_utf8(sink).unwrap();
    assert!(
        diagnostics.contains("Can't add") && diagnostics.contains("no-such-traceback"),
        "diagnostic should name the file: {}",
        diagnostics
    );
}

#[test]
fn test_non_utf8_exception_file_still_attaches() {
    let dir = TempDir::new().unwrap();
    let resolver = isolated_resolver(&dir);

    let raw_path = dir.path().join("binary-trace");
    fs::write(&raw_path, [0x74u8, 0x72, 0x61, 0x63, 0x65, 0xff, 0xfe]).unwrap();

    let mut fields = base_fields(&dir);
    for entry in &mut fields {
        if entry.0 == keys::EXCEPTION_FILE {
            entry.1 = raw_path.display().to_string();
        }
    }

    let mut sink = Vec::new();
    let record = record::unhandled_exception_signature(&fields, &resolver, &mut sink).unwrap();

    let attached = record
        .get("binary-trace")
        .expect("file with invalid UTF-8 should still attach");
    assert!(attached.starts_with("trace"));
    assert!(
        attached.contains('\u{fffd}'),
        "invalid bytes should decode to replacement characters"
    );
    assert!(sink.is_empty(), "lossy decoding is not a diagnostic case");
}

#[test]
fn test_caller_fields_survive_basics() {
    let dir = TempDir::new().unwrap();
    let resolver = isolated_resolver(&dir);

    let mut fields = base_fields(&dir);
    fields.push((keys::TIME.to_string(), "42".to_string()));
    fields.push(("custom_key".to_string(), "custom_value".to_string()));

    let mut sink = Vec::new();
    let record = record::unhandled_exception_signature(&fields, &resolver, &mut sink).unwrap();

    assert_eq!(record.get(keys::TIME), Some("42"));
    assert_eq!(record.get("custom_key"), Some("custom_value"));
    assert!(record.contains_key(keys::ARCHITECTURE));
    assert_eq!(record.get(keys::TYPE), Some("mayday"));
}

#[test]
fn test_field_order_is_preserved() {
    let dir = TempDir::new().unwrap();
    let resolver = isolated_resolver(&dir);

    let mut sink = Vec::new();
    let record =
        record::unhandled_exception_signature(&base_fields(&dir), &resolver, &mut sink).unwrap();

    let prefix: Vec<&str> = record.iter().map(|(k, _)| k).take(6).collect();
    assert_eq!(
        prefix,
        [
            keys::COMPONENT,
            keys::HASHMARKERNAME,
            keys::DUPHASH,
            keys::REASON,
            keys::DESCRIPTION,
            keys::EXCEPTION_FILE,
        ]
    );
}

#[test]
fn test_alert_signature_fixed_keys() {
    let record = record::alert_signature(
        "anaconda",
        "anaconda",
        "deadbeef",
        "storage check failed",
        "alert: storage check failed on /dev/sda",
    );

    assert_eq!(record.get(keys::COMPONENT), Some("anaconda"));
    assert_eq!(record.get(keys::HASHMARKERNAME), Some("anaconda"));
    assert_eq!(record.get(keys::DUPHASH), Some("deadbeef"));
    assert_eq!(record.get(keys::REASON), Some("storage check failed"));
    assert_eq!(
        record.get(keys::DESCRIPTION),
        Some("alert: storage check failed on /dev/sda")
    );
    // Basics filled, identity deliberately not resolved.
    assert!(record.contains_key(keys::TIME));
    assert!(!record.contains_key(keys::OS_RELEASE));
}
