use glob::Pattern;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

/// Recursive listing of candidate audio files under `root`.
///
/// Entries are visited in file-name order so the returned list, and with it
/// every index handed to the grouper, is stable between runs. Files whose
/// extension is in `ignore_extensions` and paths matching any of the
/// `ignore_globs` are skipped. Unreadable entries are logged and skipped.
/// Symlinks to files are listed under the link's own path.
pub fn list_audio_files(
    root: &Path,
    ignore_extensions: &[String],
    ignore_globs: &[String],
) -> Vec<PathBuf> {
    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !ignore_patterns
                .iter()
                .any(|pattern| pattern.matches_path(entry.path()))
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.io_error().map(io::Error::kind) == Some(io::ErrorKind::PermissionDenied) {
                    error!("Access denied: {}", err);
                } else {
                    error!("Error walking {}: {}", root.display(), err);
                }
                continue;
            }
        };

        // Links are listed when they resolve to a file; linked directories
        // are not descended into.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if is_ignored_extension(&file_name, ignore_extensions) {
            continue;
        }

        files.push(entry.into_path());
    }

    info!("Listed {} files in directory: {}", files.len(), root.display());
    files
}

/// The text after the last `.` (the whole name when there is none),
/// compared case-insensitively.
fn is_ignored_extension(file_name: &str, ignore_extensions: &[String]) -> bool {
    let suffix = file_name.rsplit('.').next().unwrap_or(file_name).to_lowercase();
    ignore_extensions
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(&suffix))
}
