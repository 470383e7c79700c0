//! Crate-level error types.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Configuration errors: missing or malformed input files and out-of-range
/// ids in the loaded metadata. Always fatal — the render session cannot
/// start from an incomplete resource set.
#[derive(Debug)]
pub enum ConfigError {
    /// A required input file could not be read.
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// A file expected to be UTF-8 text contained invalid bytes.
    NotUtf8 {
        /// Path of the offending file.
        path: PathBuf,
    },
    /// A tabular line failed its record parse. The whole load fails.
    MalformedRecord {
        /// Path of the table being loaded.
        path: PathBuf,
        /// 1-based line number of the offending line.
        line: usize,
    },
    /// A loaded table's row count does not match the fixed-size constant
    /// the rest of the subsystem is built around.
    RecordCountMismatch {
        /// Which table mismatched (e.g. "blending modes").
        table: &'static str,
        /// The constant the loader validated against.
        expected: usize,
        /// The count actually loaded.
        actual: usize,
    },
    /// A tile matrix entry referenced a terrain-type id outside the loaded
    /// table's range.
    InvalidTerrainId {
        /// The rejected id.
        id: u16,
        /// Number of terrain types actually loaded.
        terrain_type_count: usize,
    },
    /// A player-color entry's slot index exceeded the fixed table capacity.
    PlayerColorIndexOutOfRange {
        /// The rejected slot index.
        index: u32,
        /// Fixed table capacity.
        capacity: usize,
    },
    /// The bootstrap config file failed to parse as TOML.
    ConfigParse {
        /// Path of the config file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::NotUtf8 { path } => {
                write!(f, "{} is not valid UTF-8", path.display())
            }
            Self::MalformedRecord { path, line } => {
                write!(f, "malformed record at {}:{line}", path.display())
            }
            Self::RecordCountMismatch {
                table,
                expected,
                actual,
            } => write!(
                f,
                "{table} table has {actual} rows, expected {expected}"
            ),
            Self::InvalidTerrainId {
                id,
                terrain_type_count,
            } => write!(
                f,
                "terrain id {id} outside loaded range (0..{terrain_type_count})"
            ),
            Self::PlayerColorIndexOutOfRange { index, capacity } => write!(
                f,
                "player color index {index} exceeds table capacity {capacity}"
            ),
            Self::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors produced during resource bootstrap.
#[derive(Debug)]
pub enum InitError {
    /// Malformed or missing metadata/shader-source input.
    Config(ConfigError),
    /// Graphics-driver failure during shader assembly.
    Driver(crate::gpu::driver::DriverError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Driver(e) => write!(f, "driver error: {e}"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Driver(e) => Some(e),
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<crate::gpu::driver::DriverError> for InitError {
    fn from(e: crate::gpu::driver::DriverError) -> Self {
        Self::Driver(e)
    }
}
