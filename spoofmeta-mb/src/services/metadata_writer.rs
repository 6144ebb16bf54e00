//! Metadata CSV output
//!
//! Writes the unified metadata table in the canonical column order with
//! standard CSV quoting. The whole table is written once; there is no
//! append mode.

use spoofmeta_common::{MetadataRow, Result, METADATA_COLUMNS};
use std::fs;
use std::path::Path;
use tracing::info;

/// Write rows to `out_path`, creating parent directories as needed.
pub fn write_metadata_csv(rows: &[MetadataRow], out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(out_path)?;
    writer.write_record(METADATA_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(rows = rows.len(), path = %out_path.display(), "metadata table written");
    Ok(())
}
