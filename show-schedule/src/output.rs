//! Schedule persistence.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::schedule::ScheduleRow;

/// Primary output file.
pub const DEFAULT_OUTPUT_PATH: &str = "schedule.json";

/// Copy served by the published site.
pub const DEFAULT_PUBLISHED_PATH: &str = "docs/schedule.json";

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to serialize schedule: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serialize the schedule as a pretty-printed JSON array.
pub fn render_schedule(rows: &[ScheduleRow]) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Write the same rendered schedule to every path.
///
/// Creates parent directories if they don't exist.
pub fn write_schedule<P: AsRef<Path>>(json: &str, paths: &[P]) -> Result<(), OutputError> {
    for path in paths {
        let path = path.as_ref();
        let write_err = |source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        std::fs::write(path, json).map_err(write_err)?;
        info!(path = %path.display(), "schedule saved");
    }

    Ok(())
}
