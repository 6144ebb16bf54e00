//! Protocol-file dataset adapter (ASVspoof 2019 LA layout)
//!
//! Parses whitespace-delimited protocol files with one utterance per line:
//! `SPEAKER_ID AUDIO_FILE_NAME - SYSTEM_ID KEY`. A line with any other
//! token count aborts ingestion.

use crate::config::ProtocolFileConfig;
use spoofmeta_common::schema::Label;
use spoofmeta_common::{Error, RawRow, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::debug;

/// Number of whitespace-separated fields in a protocol line.
const PROTOCOL_FIELDS: usize = 5;

/// Build raw rows for every declared split, in split-declaration order and
/// line order within each split.
pub fn build_rows(config: &ProtocolFileConfig) -> Result<Vec<RawRow>> {
    let dataset = config.dataset_name();
    let audio_ext = config.audio_ext();

    let mut rows = Vec::new();
    for (split, protocol_rel) in &config.protocol_files {
        let protocol_path = config.root.join(protocol_rel);
        let audio_dir = config
            .audio_dirs
            .iter()
            .find(|(dir_split, _)| dir_split == split)
            .map(|(_, dir)| config.root.join(dir))
            .ok_or_else(|| {
                Error::Config(format!(
                    "no audio_dirs entry for split {:?}",
                    split.as_str()
                ))
            })?;

        let file = File::open(&protocol_path).map_err(|source| Error::FileAccess {
            path: protocol_path.clone(),
            source,
        })?;

        let before = rows.len();
        for line in BufReader::new(file).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != PROTOCOL_FIELDS {
                return Err(Error::Parse(format!(
                    "invalid protocol line in {}: {:?}",
                    protocol_path.display(),
                    line
                )));
            }
            // SPEAKER_ID AUDIO_FILE_NAME - SYSTEM_ID KEY
            let (speaker_id, audio_name, system_id, key) =
                (fields[0], fields[1], fields[3], fields[4]);

            let label = Label::parse(key).ok_or_else(|| {
                Error::Parse(format!(
                    "invalid label key {:?} in {}: {:?}",
                    key,
                    protocol_path.display(),
                    line
                ))
            })?;
            // The system id column holds a placeholder token on bonafide
            // lines; the sentinel wins regardless of its contents.
            let attack_id = match label {
                Label::Spoof => system_id.to_string(),
                Label::Bonafide => Label::Bonafide.as_str().to_string(),
            };

            rows.push(RawRow {
                utt_id: audio_name.to_string(),
                path: audio_dir
                    .join(format!("{}{}", audio_name, audio_ext))
                    .to_string_lossy()
                    .into_owned(),
                dataset: dataset.to_string(),
                split: *split,
                label,
                speaker_id: speaker_id.to_string(),
                attack_id,
            });
        }
        debug!(
            split = %split,
            rows = rows.len() - before,
            protocol = %protocol_path.display(),
            "parsed protocol file"
        );
    }

    Ok(rows)
}
