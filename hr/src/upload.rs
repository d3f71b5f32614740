//! Persistence of files uploaded with the employee form.
//!
//! Files are written below a root directory, photos and documents in separate sub directories.
//! The returned path is the public URL path recorded on the employee, e.g.
//! `/uploads/photos/1739180400000-portrait.png`.
use crate::error::HrError;
use chrono::Utc;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Photo,
    Document,
}

impl UploadKind {
    #[must_use]
    pub fn directory(&self) -> &'static str {
        match self {
            UploadKind::Photo => "photos",
            UploadKind::Document => "documents",
        }
    }
}

/// A file received from a form, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `file` below the directory for `kind`.
    ///
    /// # Returns
    /// The public path of the stored file, or `None` for an empty upload (a file input left
    /// blank still submits a part without content).
    ///
    /// # Errors
    /// Returns `HrError::Upload` if the directory cannot be created or the file cannot be written.
    pub fn store(&self, kind: UploadKind, file: &UploadedFile) -> Result<Option<String>, HrError> {
        if file.is_empty() {
            return Ok(None);
        }

        let directory = self.root.join(kind.directory());
        fs::create_dir_all(&directory).map_err(|source| HrError::Upload {
            path: directory.clone(),
            source,
        })?;

        let file_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitise_file_name(&file.file_name)
        );
        let path = directory.join(&file_name);
        fs::write(&path, &file.bytes).map_err(|source| HrError::Upload {
            path: path.clone(),
            source,
        })?;
        debug!("Stored {} bytes in {}", file.bytes.len(), path.display());

        Ok(Some(format!(
            "{PUBLIC_PREFIX}/{}/{file_name}",
            kind.directory()
        )))
    }
}

/// Keeps only the final path component and replaces anything but ASCII letters, digits, `.`,
/// `-` and `_`.
fn sanitise_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
