//! Schema definitions and validation for unified metadata tables
//!
//! Every dataset adapter emits [`RawRow`] values; the ingestion pipeline
//! attaches audio metrics to rebuild them into [`MetadataRow`] values, which
//! are the only shape allowed to reach persistence. Column order of the
//! persisted table is the field declaration order of [`MetadataRow`] and is
//! mirrored by [`METADATA_COLUMNS`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Canonical column names of the unified metadata table, in order.
pub const METADATA_COLUMNS: [&str; 9] = [
    "utt_id",
    "path",
    "dataset",
    "split",
    "label",
    "speaker_id",
    "attack_id",
    "sr",
    "duration_sec",
];

/// Sentinel used when a source dataset carries no speaker or attack identity.
pub const UNKNOWN: &str = "unknown";

/// Dataset partition a row belongs to.
///
/// `Validation` is a distinct accepted spelling of the validation split;
/// adapters only ever emit `Val`, but externally produced tables may carry
/// either and both round-trip verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Validation,
    Test,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Validation => "validation",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary ground truth of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Bonafide,
    Spoof,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Bonafide => "bonafide",
            Label::Spoof => "spoof",
        }
    }

    /// Parse a source label token. Returns `None` for anything outside the
    /// closed `{bonafide, spoof}` set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bonafide" => Some(Label::Bonafide),
            "spoof" => Some(Label::Spoof),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unified metadata row as produced by a dataset adapter, before audio
/// probing. Not valid for persistence until rebuilt into a [`MetadataRow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub utt_id: String,
    pub path: String,
    pub dataset: String,
    pub split: Split,
    pub label: Label,
    pub speaker_id: String,
    pub attack_id: String,
}

impl RawRow {
    /// Rebuild into a full [`MetadataRow`] with audio metrics attached.
    pub fn with_audio(self, sr: u32, duration_sec: f64) -> MetadataRow {
        MetadataRow {
            utt_id: self.utt_id,
            path: self.path,
            dataset: self.dataset,
            split: self.split,
            label: self.label,
            speaker_id: self.speaker_id,
            attack_id: self.attack_id,
            sr,
            duration_sec,
        }
    }
}

/// A complete unified metadata row. Field declaration order is the canonical
/// column order; serializers emit fields structurally, so a reordered or
/// incomplete row cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRow {
    pub utt_id: String,
    pub path: String,
    pub dataset: String,
    pub split: Split,
    pub label: Label,
    pub speaker_id: String,
    pub attack_id: String,
    pub sr: u32,
    pub duration_sec: f64,
}

/// Raised when metadata rows violate the unified schema contract.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    /// String-typed field is empty
    #[error("row {row}: {field} must be a non-empty string")]
    EmptyField { row: usize, field: &'static str },

    /// Sample rate is not a positive integer
    #[error("row {row}: sr must be a positive integer, got {sr}")]
    InvalidSampleRate { row: usize, sr: u32 },

    /// Duration is not a positive finite number
    #[error("row {row}: duration_sec must be a positive number, got {duration_sec}")]
    InvalidDuration { row: usize, duration_sec: f64 },
}

/// Validate rows against the unified schema contract.
///
/// Fails fast on the first violation, identifying the row index, field, and
/// offending value. `split` and `label` membership needs no runtime check:
/// both are closed enumerations by construction.
pub fn validate_rows(rows: &[MetadataRow]) -> Result<(), SchemaError> {
    for (row_idx, row) in rows.iter().enumerate() {
        validate_row(row, row_idx)?;
    }
    Ok(())
}

fn validate_row(row: &MetadataRow, row_idx: usize) -> Result<(), SchemaError> {
    let string_fields: [(&'static str, &str); 5] = [
        ("utt_id", &row.utt_id),
        ("path", &row.path),
        ("dataset", &row.dataset),
        ("speaker_id", &row.speaker_id),
        ("attack_id", &row.attack_id),
    ];
    for (field, value) in string_fields {
        if value.is_empty() {
            return Err(SchemaError::EmptyField {
                row: row_idx,
                field,
            });
        }
    }

    if row.sr == 0 {
        return Err(SchemaError::InvalidSampleRate {
            row: row_idx,
            sr: row.sr,
        });
    }

    if !row.duration_sec.is_finite() || row.duration_sec <= 0.0 {
        return Err(SchemaError::InvalidDuration {
            row: row_idx,
            duration_sec: row.duration_sec,
        });
    }

    Ok(())
}
