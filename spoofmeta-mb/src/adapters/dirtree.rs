//! Directory-label dataset adapter (Fake-or-Real layout)
//!
//! Translates the fixed `{training,validation,testing}/{real,fake}` folder
//! convention into unified raw rows. Missing subdirectories are skipped;
//! source datasets do not always ship all six combinations. Traversal order
//! is split-pair order, then label-pair order, then sorted filename order.

use crate::config::DirectoryLabelConfig;
use spoofmeta_common::schema::{Label, Split, UNKNOWN};
use spoofmeta_common::{RawRow, Result};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Source split folder names and their canonical splits, in traversal order.
const SPLIT_DIRS: [(&str, Split); 3] = [
    ("training", Split::Train),
    ("validation", Split::Val),
    ("testing", Split::Test),
];

/// Source label folder names and their canonical labels, in traversal order.
const LABEL_DIRS: [(&str, Label); 2] = [("real", Label::Bonafide), ("fake", Label::Spoof)];

/// Build raw rows by listing each existing label subdirectory.
pub fn build_rows(config: &DirectoryLabelConfig) -> Result<Vec<RawRow>> {
    let dataset = config.dataset_name();
    let audio_exts = config.audio_exts();

    let mut rows = Vec::new();
    for (split_dir, split) in SPLIT_DIRS {
        for (label_dir, label) in LABEL_DIRS {
            let audio_dir = config.root.join(split_dir).join(label_dir);
            if !audio_dir.is_dir() {
                continue;
            }

            for entry in WalkDir::new(&audio_dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = entry.map_err(std::io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if !has_allowed_extension(path, &audio_exts) {
                    continue;
                }
                let utt_id = match path.file_stem() {
                    Some(stem) => stem.to_string_lossy().into_owned(),
                    None => continue,
                };

                rows.push(RawRow {
                    utt_id,
                    path: path.to_string_lossy().into_owned(),
                    dataset: dataset.to_string(),
                    split,
                    label,
                    speaker_id: UNKNOWN.to_string(),
                    attack_id: UNKNOWN.to_string(),
                });
            }
        }
    }

    debug!(dataset = dataset, rows = rows.len(), "scanned directory-label dataset");
    Ok(rows)
}

fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    match path.extension() {
        Some(ext) => {
            let dotted = format!(".{}", ext.to_string_lossy().to_lowercase());
            allowed.iter().any(|a| *a == dotted)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn config_for(root: &Path) -> DirectoryLabelConfig {
        serde_yaml::from_str(&format!("root: {}", root.display())).unwrap()
    }

    #[test]
    fn labels_follow_the_folder_mapping() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("training/real/a.wav"));
        touch(&dir.path().join("training/fake/b.wav"));
        touch(&dir.path().join("validation/real/c.flac"));

        let rows = build_rows(&config_for(dir.path())).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].utt_id, "a");
        assert_eq!(rows[0].label, Label::Bonafide);
        assert_eq!(rows[0].split, Split::Train);

        assert_eq!(rows[1].utt_id, "b");
        assert_eq!(rows[1].label, Label::Spoof);

        assert_eq!(rows[2].utt_id, "c");
        assert_eq!(rows[2].split, Split::Val);

        for row in &rows {
            assert_eq!(row.speaker_id, UNKNOWN);
            assert_eq!(row.attack_id, UNKNOWN);
        }
    }

    #[test]
    fn missing_subdirectories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("testing/fake/z.wav"));

        let rows = build_rows(&config_for(dir.path())).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].split, Split::Test);
        assert_eq!(rows[0].label, Label::Spoof);
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("training/real/a.WAV"));
        touch(&dir.path().join("training/real/notes.txt"));
        touch(&dir.path().join("training/real/noext"));

        let rows = build_rows(&config_for(dir.path())).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].utt_id, "a");
    }

    #[test]
    fn files_are_listed_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("training/real/b.wav"));
        touch(&dir.path().join("training/real/a.wav"));
        touch(&dir.path().join("training/real/c.wav"));

        let rows = build_rows(&config_for(dir.path())).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.utt_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
