// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for exported records

use crate::error::{MaydayError, Result};
use crate::types::ProblemRecord;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(RecordFormat::Json),
            "yaml" | "yml" => Some(RecordFormat::Yaml),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            RecordFormat::Json => "json",
            RecordFormat::Yaml => "yaml",
        }
    }

    pub fn serialize(&self, record: &ProblemRecord) -> Result<String> {
        match self {
            RecordFormat::Json => serde_json::to_string_pretty(record)
                .map_err(|e| MaydayError::Serialization(e.to_string())),
            RecordFormat::Yaml => {
                serde_yaml::to_string(record).map_err(|e| MaydayError::Serialization(e.to_string()))
            }
        }
    }
}
