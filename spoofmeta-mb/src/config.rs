//! Dataset configuration loading
//!
//! A dataset config is a single YAML document. The `dataset` key selects the
//! adapter (see [`crate::adapters::DatasetKind`]); the matching adapter
//! deserializes its own typed configuration from the same document. Mapping
//! keys whose declaration order is significant (`audio_dirs`,
//! `protocol_files`) deserialize into order-preserving pair lists.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use spoofmeta_common::schema::{Label, Split};
use spoofmeta_common::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Load a dataset configuration YAML file.
pub fn load_config(path: &Path) -> Result<serde_yaml::Value> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
}

/// Configuration for protocol-file datasets (ASVspoof 2019 LA layout).
#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolFileConfig {
    pub root: PathBuf,
    pub dataset: Option<String>,
    pub audio_ext: Option<String>,
    /// Split → audio directory, relative to `root`.
    #[serde(deserialize_with = "ordered_pairs")]
    pub audio_dirs: Vec<(Split, PathBuf)>,
    /// Split → protocol file, relative to `root`. Declaration order is the
    /// concatenation order of the output rows.
    #[serde(deserialize_with = "ordered_pairs")]
    pub protocol_files: Vec<(Split, PathBuf)>,
}

impl ProtocolFileConfig {
    pub fn dataset_name(&self) -> &str {
        self.dataset.as_deref().unwrap_or("asvspoof2019_la")
    }

    pub fn audio_ext(&self) -> &str {
        self.audio_ext.as_deref().unwrap_or(".flac")
    }
}

/// Configuration for directory-label datasets (Fake-or-Real layout).
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryLabelConfig {
    pub root: PathBuf,
    pub dataset: Option<String>,
    pub audio_exts: Option<Vec<String>>,
}

impl DirectoryLabelConfig {
    pub fn dataset_name(&self) -> &str {
        self.dataset.as_deref().unwrap_or("for_original")
    }

    /// Allowed audio extensions, dotted and lowercased.
    pub fn audio_exts(&self) -> Vec<String> {
        match &self.audio_exts {
            Some(exts) => exts.iter().map(|e| e.to_lowercase()).collect(),
            None => vec![".wav".to_string(), ".flac".to_string(), ".mp3".to_string()],
        }
    }
}

/// Configuration for CSV-with-speaker-metadata datasets (In-the-Wild layout).
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerCsvConfig {
    pub root: PathBuf,
    pub dataset: Option<String>,
    pub meta_csv: PathBuf,
    pub audio_dir: Option<PathBuf>,
    /// Source label token → canonical label.
    pub label_map: BTreeMap<String, Label>,
    pub split_ratio: SplitRatio,
    #[serde(default)]
    pub split_seed: u64,
}

impl SpeakerCsvConfig {
    pub fn dataset_name(&self) -> &str {
        self.dataset.as_deref().unwrap_or("in_the_wild")
    }

    /// Directory the metadata file paths are relative to.
    pub fn audio_dir(&self) -> PathBuf {
        match self.audio_dir.as_deref() {
            Some(dir) if dir != Path::new(".") => self.root.join(dir),
            _ => self.root.clone(),
        }
    }
}

/// Train/val/test ratio applied to the count of distinct speakers.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SplitRatio {
    pub train: f64,
    pub val: f64,
    pub test: f64,
}

/// Tolerance for the ratio sum check.
pub const RATIO_SUM_TOLERANCE: f64 = 1e-6;

impl SplitRatio {
    /// The three ratios must sum to 1.0 within [`RATIO_SUM_TOLERANCE`].
    pub fn validate(&self) -> Result<()> {
        let sum = self.train + self.val + self.test;
        if (sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(Error::Config(format!(
                "split_ratio must sum to 1.0, got train={} val={} test={} (sum {})",
                self.train, self.val, self.test, sum
            )));
        }
        Ok(())
    }
}

/// Deserialize a mapping into a vector of pairs, preserving the declaration
/// order of the keys.
fn ordered_pairs<'de, D, K, V>(deserializer: D) -> std::result::Result<Vec<(K, V)>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    struct PairsVisitor<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for PairsVisitor<K, V>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
    {
        type Value = Vec<(K, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(pair) = map.next_entry()? {
                pairs.push(pair);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_config_preserves_split_declaration_order() {
        let yaml = r#"
root: /data/asvspoof
audio_dirs:
  test: eval_wav
  train: train_wav
  val: dev_wav
protocol_files:
  test: protocols/eval.txt
  train: protocols/train.txt
  val: protocols/dev.txt
"#;
        let config: ProtocolFileConfig = serde_yaml::from_str(yaml).unwrap();
        let declared: Vec<Split> = config.protocol_files.iter().map(|(s, _)| *s).collect();
        assert_eq!(declared, vec![Split::Test, Split::Train, Split::Val]);
        assert_eq!(config.dataset_name(), "asvspoof2019_la");
        assert_eq!(config.audio_ext(), ".flac");
    }

    #[test]
    fn protocol_config_rejects_unknown_split_name() {
        let yaml = r#"
root: /data/asvspoof
audio_dirs:
  eval: eval_wav
protocol_files:
  eval: protocols/eval.txt
"#;
        assert!(serde_yaml::from_str::<ProtocolFileConfig>(yaml).is_err());
    }

    #[test]
    fn split_ratio_sum_check_uses_tolerance() {
        let ratio = SplitRatio {
            train: 0.6,
            val: 0.2,
            test: 0.2,
        };
        ratio.validate().unwrap();

        // within tolerance
        let ratio = SplitRatio {
            train: 0.6,
            val: 0.2,
            test: 0.2000001,
        };
        ratio.validate().unwrap();

        let ratio = SplitRatio {
            train: 0.5,
            val: 0.2,
            test: 0.2,
        };
        assert!(matches!(ratio.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn speaker_csv_defaults() {
        let yaml = r#"
root: /data/itw
meta_csv: meta.csv
label_map:
  bona-fide: bonafide
  spoof: spoof
split_ratio:
  train: 0.6
  val: 0.2
  test: 0.2
"#;
        let config: SpeakerCsvConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.dataset_name(), "in_the_wild");
        assert_eq!(config.split_seed, 0);
        assert_eq!(config.audio_dir(), PathBuf::from("/data/itw"));
        assert_eq!(
            config.label_map.get("bona-fide").copied(),
            Some(Label::Bonafide)
        );
    }
}
