//! Directory scanning and batch planning

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};

/// Plans a batch run over a documentation tree: which files are eligible,
/// where their translations go, and whether a file is already up to date.
#[derive(Debug, Clone)]
pub struct BatchScanner {
    config: TranslatorConfig,
}

impl BatchScanner {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Find translatable files under `root`.
    ///
    /// Configured text extensions are always eligible; `.json` files only
    /// when their raw content mentions a `description` field. Ignored
    /// directories, ignored file names, and previously produced
    /// `.{lang}.{ext}` outputs are skipped.
    pub fn find_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(TranslationError::FileError {
                path: root.display().to_string(),
                message: "Not a directory".to_string(),
            });
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            !(entry.file_type().is_dir() && self.is_ignored_dir_name(entry.file_name()))
        });

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() || self.is_ignored_file(path) {
                continue;
            }

            let ext = match extension_with_dot(path) {
                Some(ext) => ext,
                None => continue,
            };

            if self.config.is_text_extension(&ext) {
                files.push(path.to_path_buf());
            } else if ext == ".json" {
                // only JSON documents with translatable content
                match std::fs::read_to_string(path) {
                    Ok(content) if content.contains("\"description\"") => {
                        files.push(path.to_path_buf());
                    }
                    Ok(_) => {}
                    Err(e) => debug!("Skipping unreadable {}: {}", path.display(), e),
                }
            }
        }

        Ok(files)
    }

    /// Output path policy: `.txt` and `.json` sources get a sibling
    /// `<stem>.<lang>.<ext>` copy so the original is preserved; anything
    /// else (`.md`) is overwritten in place.
    pub fn target_path(&self, path: &Path) -> PathBuf {
        match extension_with_dot(path) {
            Some(ext) if ext == ".txt" || ext == ".json" => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                path.with_file_name(format!(
                    "{}.{}{}",
                    stem, self.config.target_language, ext
                ))
            }
            _ => path.to_path_buf(),
        }
    }

    /// Translate only when the target is missing or older than the source;
    /// in-place targets always retranslate.
    pub fn needs_translation(&self, source: &Path, target: &Path) -> bool {
        if source == target {
            return true;
        }

        let source_mtime = std::fs::metadata(source).and_then(|m| m.modified());
        let target_mtime = std::fs::metadata(target).and_then(|m| m.modified());

        match (source_mtime, target_mtime) {
            (Ok(source_mtime), Ok(target_mtime)) => source_mtime > target_mtime,
            _ => true,
        }
    }

    fn is_ignored_dir_name(&self, name: &std::ffi::OsStr) -> bool {
        let name = name.to_string_lossy();
        self.config.ignore_dirs.iter().any(|d| d == name.as_ref())
    }

    fn is_ignored_file(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };

        if self.config.ignore_files.iter().any(|f| f == name.as_ref()) {
            return true;
        }

        // outputs of a previous run
        name.contains(&format!(".{}.", self.config.target_language))
    }
}

fn extension_with_dot(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}
