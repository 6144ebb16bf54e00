//! Audio probing (sample rate and duration)
//!
//! The primary path probes the container with symphonia without decoding
//! the stream. When symphonia cannot introspect a file, a degraded WAV-only
//! fallback via hound is attempted for `.wav` paths; anything else surfaces
//! the unsupported-format error. Plain I/O failures (missing file,
//! permissions) propagate without fallback.

use spoofmeta_common::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Audio metrics attached to every unified metadata row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioInfo {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration_sec: f64,
}

/// Return sample rate and duration for an audio file.
pub fn probe(path: &Path) -> Result<AudioInfo> {
    match probe_with_symphonia(path) {
        Ok(info) => Ok(info),
        Err(Error::Io(e)) => Err(Error::Io(e)),
        Err(primary) => {
            if is_wav(path) {
                debug!(path = %path.display(), "primary probe failed, trying WAV fallback");
                probe_wav(path)
            } else {
                Err(primary)
            }
        }
    }
}

fn probe_with_symphonia(path: &Path) -> Result<AudioInfo> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Format hint from the file extension
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::Probe(format!("failed to probe {}: {}", path.display(), e)))?;

    let format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::Probe(format!("no audio track in {}", path.display())))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::Probe(format!("sample rate unknown for {}", path.display())))?;
    let n_frames = track
        .codec_params
        .n_frames
        .ok_or_else(|| Error::Probe(format!("frame count unknown for {}", path.display())))?;

    Ok(AudioInfo {
        sample_rate,
        duration_sec: n_frames as f64 / f64::from(sample_rate),
    })
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

fn probe_wav(path: &Path) -> Result<AudioInfo> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| Error::Probe(format!("WAV fallback failed for {}: {}", path.display(), e)))?;
    let spec = reader.spec();
    let n_frames = reader.duration();
    Ok(AudioInfo {
        sample_rate: spec.sample_rate,
        duration_sec: f64::from(n_frames) / f64::from(spec.sample_rate),
    })
}
