use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStatus {
    Success,
    PartialSuccess,
}

/// Per-file outcome of a delete batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReport {
    pub status: DeleteStatus,
    pub deleted_files: Vec<String>,
    pub errors: Vec<String>,
}

/// Delete each path independently. A missing file or a failed removal is
/// recorded in `errors` and the batch carries on.
pub fn delete_files<S: AsRef<str>>(files: &[S]) -> DeleteReport {
    info!("Attempting to delete {} files", files.len());

    let mut deleted_files = Vec::new();
    let mut errors = Vec::new();

    for file in files {
        let file = file.as_ref();
        let path = Path::new(file);

        if !path.exists() {
            let msg = format!("File not found: {}", file);
            warn!("{}", msg);
            errors.push(msg);
            continue;
        }

        match fs::remove_file(path) {
            Ok(()) => {
                info!("Deleted file: {}", file);
                deleted_files.push(file.to_string());
            }
            Err(e) => {
                let msg = format!("Error deleting file {}: {}", file, e);
                error!("{}", msg);
                errors.push(msg);
            }
        }
    }

    let status = if errors.is_empty() {
        DeleteStatus::Success
    } else {
        DeleteStatus::PartialSuccess
    };
    info!("Delete operation completed. Status: {:?}", status);

    DeleteReport {
        status,
        deleted_files,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DeleteStatus::PartialSuccess).unwrap(),
            "\"partial_success\""
        );
        assert_eq!(
            serde_json::to_string(&DeleteStatus::Success).unwrap(),
            "\"success\""
        );
    }

    #[test]
    fn test_all_deleted_is_success() {
        let tmp = tempdir().unwrap();
        let a = tmp.path().join("a.mp3");
        let b = tmp.path().join("b.mp3");
        fs::write(&a, b"a").unwrap();
        fs::write(&b, b"b").unwrap();

        let files = [a.to_string_lossy().into_owned(), b.to_string_lossy().into_owned()];
        let report = delete_files(&files);

        assert_eq!(report.status, DeleteStatus::Success);
        assert_eq!(report.deleted_files, files.to_vec());
        assert!(report.errors.is_empty());
        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn test_directory_is_reported_not_removed() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("album");
        fs::create_dir(&dir).unwrap();

        let report = delete_files(&[dir.to_string_lossy()]);
        assert_eq!(report.status, DeleteStatus::PartialSuccess);
        assert!(report.deleted_files.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Error deleting file "));
        assert!(dir.exists());
    }

    #[test]
    fn test_empty_batch_is_success() {
        let empty: [&str; 0] = [];
        let report = delete_files(&empty);
        assert_eq!(report.status, DeleteStatus::Success);
        assert!(report.deleted_files.is_empty());
    }
}
