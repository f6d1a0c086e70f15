// SPDX-License-Identifier: PMPL-1.0-or-later

//! Mayday — problem-report assembly and dispatch for installer environments.
//!
//! This crate bridges an installer-style host with a problem-reporting
//! backend. It owns none of the transport; it resolves who is reporting,
//! assembles what is being reported, and routes the result.
//!
//! PILLARS:
//! 1. **Identity**: best-effort product/version detection over an ordered
//!    provider chain (buildstamp, environment, system release files).
//! 2. **Record**: ordered key/value problem records assembled from caller
//!    fields, identity, baseline host facts, and an attached trace file.
//! 3. **Dispatch**: a closed match over the active UI mode selecting the
//!    backend entry point and flags, with screen save/restore around
//!    full-screen runs.

pub mod dispatch;
pub mod error;
pub mod identity;
pub mod record;
pub mod types;

pub use error::{MaydayError, Result};
pub use types::{parse_release, Identity, ProblemRecord, ReportFlags};
