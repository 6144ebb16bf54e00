//! CSV-with-speaker-metadata dataset adapter (In-the-Wild layout)
//!
//! Reads a header-driven metadata file with columns `file, speaker, label`,
//! maps source labels through the configured label map, and assigns splits
//! through the deterministic speaker-disjoint splitter. Rows are emitted in
//! metadata-file order.

use crate::adapters::speaker_split::speaker_disjoint_split;
use crate::config::SpeakerCsvConfig;
use serde::Deserialize;
use spoofmeta_common::schema::UNKNOWN;
use spoofmeta_common::{Error, RawRow, Result};
use std::path::Path;
use tracing::debug;

/// One record of the source metadata file.
#[derive(Debug, Deserialize)]
struct MetaRecord {
    file: String,
    speaker: String,
    label: String,
}

/// Build raw rows from the metadata file.
pub fn build_rows(config: &SpeakerCsvConfig) -> Result<Vec<RawRow>> {
    config.split_ratio.validate()?;

    let dataset = config.dataset_name();
    let meta_csv = config.root.join(&config.meta_csv);
    let audio_dir = config.audio_dir();

    let mut reader = csv::ReaderBuilder::new().from_path(&meta_csv)?;

    let mut entries = Vec::new();
    let mut speakers = Vec::new();
    for record in reader.deserialize::<MetaRecord>() {
        let record = record?;
        let label = config
            .label_map
            .get(&record.label)
            .copied()
            .ok_or_else(|| {
                Error::Parse(format!(
                    "unmapped label {:?} in {}",
                    record.label,
                    meta_csv.display()
                ))
            })?;
        speakers.push(record.speaker.clone());
        entries.push((record.file, record.speaker, label));
    }

    let split_by_speaker =
        speaker_disjoint_split(&speakers, &config.split_ratio, config.split_seed);
    debug!(
        dataset = dataset,
        utterances = entries.len(),
        speakers = split_by_speaker.len(),
        "assigned speaker-disjoint splits"
    );

    let mut rows = Vec::with_capacity(entries.len());
    for (file, speaker_id, label) in entries {
        let split = *split_by_speaker.get(&speaker_id).ok_or_else(|| {
            Error::Internal(format!(
                "speaker {:?} missing from split assignment",
                speaker_id
            ))
        })?;
        let utt_id = match Path::new(&file).file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => file.clone(),
        };

        rows.push(RawRow {
            utt_id,
            path: audio_dir.join(&file).to_string_lossy().into_owned(),
            dataset: dataset.to_string(),
            split,
            label,
            speaker_id,
            attack_id: UNKNOWN.to_string(),
        });
    }

    Ok(rows)
}
