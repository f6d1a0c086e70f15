// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error taxonomy for record assembly and export
//!
//! Only a missing required field is a hard caller error. Identity probing
//! and file attachment are best-effort and never surface here; backend
//! failures pass through the dispatch layer unmodified.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaydayError {
    #[error("missing argument {field}")]
    MissingArgument { field: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, MaydayError>;

impl MaydayError {
    pub fn missing_argument<S: Into<String>>(field: S) -> Self {
        MaydayError::MissingArgument {
            field: field.into(),
        }
    }
}
