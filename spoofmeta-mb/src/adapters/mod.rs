//! Dataset adapters
//!
//! Each adapter translates one source-specific dataset convention into the
//! unified raw row shape. Dispatch is a closed variant set selected through
//! a dataset-identifier alias table; a new source layout extends
//! [`DatasetKind`] and the alias table, never an open registration mechanism.

pub mod dirtree;
pub mod protocol;
pub mod speaker_csv;
pub mod speaker_split;

use spoofmeta_common::{Error, RawRow, Result};

/// Closed set of supported dataset layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// Protocol-file layout (ASVspoof 2019 LA)
    ProtocolFile,
    /// Directory-label layout (Fake-or-Real)
    DirectoryLabel,
    /// CSV-with-speaker-metadata layout (In-the-Wild)
    SpeakerCsv,
}

/// Accepted spellings for each dataset layout.
const ALIASES: &[(&str, DatasetKind)] = &[
    ("asvspoof2019_la", DatasetKind::ProtocolFile),
    ("asvspoof2019-la", DatasetKind::ProtocolFile),
    ("asvspoof2019", DatasetKind::ProtocolFile),
    ("for", DatasetKind::DirectoryLabel),
    ("for_original", DatasetKind::DirectoryLabel),
    ("fake_or_real", DatasetKind::DirectoryLabel),
    ("in_the_wild", DatasetKind::SpeakerCsv),
    ("inthewild", DatasetKind::SpeakerCsv),
    ("in-the-wild", DatasetKind::SpeakerCsv),
];

impl DatasetKind {
    /// Resolve a dataset identifier against the alias table,
    /// case-insensitively.
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        let needle = identifier.to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == needle)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| {
                Error::Config(format!(
                    "unknown dataset identifier {:?}; expected one of: \
                     asvspoof2019_la, for_original, in_the_wild",
                    identifier
                ))
            })
    }
}

/// Build raw unified rows for the dataset described by `config`.
///
/// The `dataset` key selects the adapter; the adapter deserializes its own
/// typed configuration from the same document.
pub fn build_rows(config: &serde_yaml::Value) -> Result<Vec<RawRow>> {
    let identifier = config
        .get("dataset")
        .and_then(serde_yaml::Value::as_str)
        .unwrap_or_default();
    match DatasetKind::from_identifier(identifier)? {
        DatasetKind::ProtocolFile => protocol::build_rows(&typed_config(config)?),
        DatasetKind::DirectoryLabel => dirtree::build_rows(&typed_config(config)?),
        DatasetKind::SpeakerCsv => speaker_csv::build_rows(&typed_config(config)?),
    }
}

fn typed_config<T: serde::de::DeserializeOwned>(config: &serde_yaml::Value) -> Result<T> {
    serde_yaml::from_value(config.clone())
        .map_err(|e| Error::Config(format!("invalid dataset config: {}", e)))
}
