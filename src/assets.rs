//! Collaborator interfaces for asset input: raw file reads, tabular record
//! loading, and texture creation.
//!
//! The bootstrap consumes these seams; the crate ships a plain-filesystem
//! [`FsReader`], while texture decoding stays behind [`TextureFactory`]
//! (the engine's image pipeline implements it).

use std::path::Path;

use crate::error::ConfigError;
use crate::gpu::driver::TextureHandle;

/// Whole-file byte reads for shader sources and metadata tables.
pub trait FileReader {
    /// Read the entire file at `path`. A missing file is fatal.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] with the offending path.
    fn read_whole_file(&self, path: &Path) -> Result<Vec<u8>, ConfigError>;
}

/// [`FileReader`] over the real filesystem.
#[derive(Debug, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read_whole_file(&self, path: &Path) -> Result<Vec<u8>, ConfigError> {
        std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// One row of a fixed-format tabular metadata file.
pub trait Record: Sized {
    /// Parse a single line. `None` means the line is malformed, which fails
    /// the whole load.
    fn fill(line: &str) -> Option<Self>;

    /// Debug rendering of the parsed row, logged at `debug` level by the
    /// loader.
    fn dump(&self) -> String;
}

/// Parse every data line of `content` into records.
///
/// Blank lines and `#` comment lines are skipped. The returned vector's
/// length is the authoritative count for this load; teardown bounds are
/// snapshotted from it, never re-derived.
///
/// # Errors
///
/// [`ConfigError::MalformedRecord`] with the 1-based line number of the
/// first line `T::fill` rejects.
pub fn parse_records<T: Record>(
    content: &str,
    path: &Path,
) -> Result<Vec<T>, ConfigError> {
    let mut records = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record =
            T::fill(line).ok_or_else(|| ConfigError::MalformedRecord {
                path: path.to_path_buf(),
                line: idx + 1,
            })?;
        log::debug!("{}", record.dump());
        records.push(record);
    }
    Ok(records)
}

/// Read and parse a whole tabular file.
///
/// # Errors
///
/// I/O failure, non-UTF-8 content, or any malformed line.
pub fn load_records<T: Record, R: FileReader>(
    reader: &R,
    path: &Path,
) -> Result<Vec<T>, ConfigError> {
    let bytes = reader.read_whole_file(path)?;
    let content =
        String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8 {
            path: path.to_path_buf(),
        })?;
    parse_records(&content, path)
}

/// Texture creation seam. Decoding and upload live outside this crate.
pub trait TextureFactory {
    /// Decode the image at `path` and upload it as a GPU texture.
    /// `player_colored` marks textures whose alpha channel encodes
    /// player-color slots for the team-color program.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] for a missing or undecodable file.
    fn create_texture(
        &mut self,
        path: &Path,
        player_colored: bool,
    ) -> Result<TextureHandle, ConfigError>;
}
