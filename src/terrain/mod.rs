//! Terrain metadata, grid construction, and blend-precedence resolution.
//!
//! Everything here is CPU state: the grid is built and validated before any
//! GPU resource exists, and the priority ordering is advisory data for the
//! blending renderer downstream.

/// The playable terrain grid and its tile matrix.
pub mod grid;
/// Blend draw-precedence ordering.
pub mod priority;
/// Startup seed matrix.
pub mod seed;
/// Terrain-type and blending-mode records.
pub mod types;

pub use grid::{TerrainGrid, TileMatrix, TilePos, GRID_SIZE};
pub use priority::PriorityOrdering;
pub use types::{BlendingModeRecord, TerrainTypeRecord, BLEND_MODE_COUNT};
