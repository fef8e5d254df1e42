//! Snapshot artifact writing
//!
//! Thin wrapper serializing a finished catalog to the locale-named JSON
//! file the playback layer consumes.

use crate::catalog::Catalog;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing the snapshot artifact
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot file could not be created
    #[error("Failed to create snapshot file {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog could not be serialized into the snapshot file
    #[error("Failed to write snapshot file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Writes `catalog` as `addon-data-{locale}.json` under `directory` and
/// returns the path written.
pub fn write_snapshot(
    catalog: &Catalog,
    locale: &str,
    directory: &Path,
) -> Result<PathBuf, SnapshotError> {
    let path = directory.join(format!("addon-data-{locale}.json"));

    let file = File::create(&path).map_err(|source| SnapshotError::CreateFailed {
        path: path.clone(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), catalog).map_err(|source| {
        SnapshotError::WriteFailed {
            path: path.clone(),
            source,
        }
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Episode;
    use serde_json::Value;
    use std::fs;

    #[test]
    fn test_snapshot_round_trips_through_disk() {
        let catalog = Catalog {
            created: "2026-08-26 12:00:00.000000".to_string(),
            seasons: vec![vec![Episode {
                image: String::new(),
                uuid: "ep-1".to_string(),
                details: String::new(),
                date: "1997-08-13".to_string(),
                title: "Pilot".to_string(),
                url: "/episodes/ep-1".to_string(),
                season: 1,
                episode: 1,
                mediagen: Vec::new(),
            }]],
        };

        let dir = std::env::temp_dir().join("southpark-catalog-test");
        fs::create_dir_all(&dir).unwrap();
        let path = write_snapshot(&catalog, "en", &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "addon-data-en.json");

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["created"], "2026-08-26 12:00:00.000000");
        assert_eq!(value["seasons"][0][0]["uuid"], "ep-1");
        assert_eq!(value["seasons"][0][0]["season"], "1");
        assert_eq!(value["seasons"][0][0]["mediagen"], Value::Array(Vec::new()));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let catalog = Catalog {
            created: String::new(),
            seasons: Vec::new(),
        };
        let result = write_snapshot(&catalog, "en", Path::new("/nonexistent/dir"));
        assert!(matches!(result, Err(SnapshotError::CreateFailed { .. })));
    }
}
