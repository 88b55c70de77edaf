//! Dataset Archive Module
//! Downloads the dataset and reads entries of the zip nested inside it.

use std::io::{Cursor, Read};
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid zip archive: {0}")]
    Zip(#[from] ZipError),
    #[error("Failed to read archive entry: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive entry not found: {0}")]
    MissingEntry(String),
    #[error("Archive entry is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

/// Upper bound on the buffer reserved up front for one entry.
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

/// The inner dataset archive, held fully in memory.
pub struct DatasetArchive {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl DatasetArchive {
    /// Download the outer archive with a single blocking GET.
    pub fn fetch(url: &str) -> Result<Vec<u8>, ArchiveError> {
        log::info!("Downloading dataset from {url}");
        let response = reqwest::blocking::get(url)?.error_for_status()?;
        let body = response.bytes()?;
        log::info!("Downloaded {} bytes", body.len());
        Ok(body.to_vec())
    }

    /// Open `inner_name` from the outer archive bytes as the dataset archive.
    pub fn open_nested(outer: Vec<u8>, inner_name: &str) -> Result<Self, ArchiveError> {
        let mut outer = ZipArchive::new(Cursor::new(outer))?;
        let inner = read_entry(&mut outer, inner_name)?;
        log::debug!("Opened nested archive {inner_name} ({} bytes)", inner.len());

        Ok(Self {
            archive: ZipArchive::new(Cursor::new(inner))?,
        })
    }

    /// Read an entry of the dataset archive as text.
    pub fn read_text(&mut self, path: &str) -> Result<String, ArchiveError> {
        let bytes = read_entry(&mut self.archive, path)?;
        log::debug!("Read {path} ({} bytes)", bytes.len());
        String::from_utf8(bytes).map_err(|_| ArchiveError::InvalidUtf8(path.to_string()))
    }

    /// Entry names of the dataset archive.
    pub fn entry_names(&self) -> Vec<String> {
        self.archive.file_names().map(|s| s.to_string()).collect()
    }
}

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<Vec<u8>, ArchiveError> {
    let mut file = archive.by_name(path).map_err(|e| match e {
        ZipError::FileNotFound => ArchiveError::MissingEntry(path.to_string()),
        other => ArchiveError::Zip(other),
    })?;

    // Declared sizes come from the zip header; only use them as a bounded hint
    let hint = file.size().min(MAX_PREALLOC) as usize;
    let mut bytes = Vec::with_capacity(hint);
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}
