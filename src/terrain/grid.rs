//! The playable terrain grid.

use crate::error::ConfigError;
use crate::terrain::types::{BlendingModeRecord, TerrainTypeRecord};

/// Side length of the playable terrain grid.
pub const GRID_SIZE: usize = 20;

/// The raw tile-id matrix seeding the grid, row-major.
pub type TileMatrix = [[u16; GRID_SIZE]; GRID_SIZE];

/// Axial tile position: north-east and south-east coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePos {
    /// North-east axis coordinate.
    pub ne: usize,
    /// South-east axis coordinate.
    pub se: usize,
}

/// One grid cell: its position and resolved terrain-type id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Cell position.
    pub pos: TilePos,
    /// Terrain-type id, valid against the grid's loaded table.
    pub terrain_id: u16,
}

/// A square grid of tiles plus the terrain/blending metadata tables it was
/// built from.
///
/// Shape is fixed at construction. Building performs no GPU calls; the grid
/// is pure CPU state consumed later by the renderer.
#[derive(Debug)]
pub struct TerrainGrid {
    size: usize,
    tiles: Vec<Tile>,
    terrain_types: Vec<TerrainTypeRecord>,
    blending_modes: Vec<BlendingModeRecord>,
}

impl TerrainGrid {
    /// Allocate a `size`×`size` grid over the loaded metadata tables.
    /// Every cell starts at terrain id 0; a full [`Self::seed_from_matrix`]
    /// sweep is required before the grid is a valid end state.
    #[must_use]
    pub fn new(
        size: usize,
        terrain_types: Vec<TerrainTypeRecord>,
        blending_modes: Vec<BlendingModeRecord>,
    ) -> Self {
        let mut tiles = Vec::with_capacity(size * size);
        for ne in 0..size {
            for se in 0..size {
                tiles.push(Tile {
                    pos: TilePos { ne, se },
                    terrain_id: 0,
                });
            }
        }
        Self {
            size,
            tiles,
            terrain_types,
            blending_modes,
        }
    }

    /// Side length fixed at construction.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of loaded terrain types; the valid id range is
    /// `0..terrain_type_count`.
    #[must_use]
    pub fn terrain_type_count(&self) -> usize {
        self.terrain_types.len()
    }

    /// Number of loaded blending modes.
    #[must_use]
    pub fn blending_mode_count(&self) -> usize {
        self.blending_modes.len()
    }

    /// The loaded terrain-type table, in declaration order.
    #[must_use]
    pub fn terrain_types(&self) -> &[TerrainTypeRecord] {
        &self.terrain_types
    }

    /// The loaded blending-mode table.
    #[must_use]
    pub fn blending_modes(&self) -> &[BlendingModeRecord] {
        &self.blending_modes
    }

    /// The tile at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        if pos.ne >= self.size || pos.se >= self.size {
            return None;
        }
        self.tiles.get(pos.ne * self.size + pos.se)
    }

    /// Terrain metadata for a tile's id.
    #[must_use]
    pub fn terrain_type(&self, id: u16) -> Option<&TerrainTypeRecord> {
        self.terrain_types.get(usize::from(id))
    }

    /// Set the terrain type of one cell.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTerrainId`] if `id` is outside the loaded
    /// table's range; the grid is left untouched. Out-of-grid positions
    /// reject with the same error class, since both are seed-data faults.
    pub fn set_tile(
        &mut self,
        pos: TilePos,
        id: u16,
    ) -> Result<(), ConfigError> {
        let terrain_type_count = self.terrain_types.len();
        if usize::from(id) >= terrain_type_count {
            return Err(ConfigError::InvalidTerrainId {
                id,
                terrain_type_count,
            });
        }
        let size = self.size;
        if pos.ne >= size || pos.se >= size {
            return Err(ConfigError::InvalidTerrainId {
                id,
                terrain_type_count,
            });
        }
        if let Some(tile) = self.tiles.get_mut(pos.ne * size + pos.se) {
            tile.terrain_id = id;
        }
        Ok(())
    }

    /// Sweep `matrix` row-major and set every cell. After a successful sweep
    /// each cell holds a terrain id validated against the loaded table;
    /// partial initialization never survives as an end state because any
    /// invalid id aborts the whole bootstrap.
    ///
    /// # Errors
    ///
    /// The first invalid id in the matrix.
    pub fn seed_from_matrix(
        &mut self,
        matrix: &TileMatrix,
    ) -> Result<(), ConfigError> {
        for (ne, row) in matrix.iter().enumerate() {
            for (se, &id) in row.iter().enumerate() {
                self.set_tile(TilePos { ne, se }, id)?;
            }
        }
        Ok(())
    }
}
