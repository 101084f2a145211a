use std::path::Path;

/// A file the batch could not process, kept for the final summary
#[derive(Debug, Clone, PartialEq)]
pub struct FailedFile {
    pub file_name: String,
    pub error: String,
}

impl FailedFile {
    pub fn new(path: &Path, error: &anyhow::Error) -> Self {
        FailedFile {
            file_name: file_label(path),
            error: format!("{:#}", error),
        }
    }
}

pub fn file_label(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.display().to_string(),
    }
}
