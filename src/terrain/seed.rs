//! Authoritative seed data for the playable terrain.

use crate::terrain::grid::TileMatrix;

/// The 20×20 tile-id matrix the grid is seeded from at startup, row-major.
/// Every id must exist in the loaded terrain-type table.
pub const TILE_MATRIX: TileMatrix = [
    [7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7],
    [7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7],
    [7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7],
    [7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 11, 11, 11, 7, 7, 7, 7, 7],
    [7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 11, 11, 11, 11, 11, 7, 7, 7],
    [7, 7, 20, 20, 20, 7, 7, 7, 7, 7, 7, 7, 11, 11, 11, 11, 11, 11, 7, 7],
    [7, 7, 20, 7, 7, 20, 20, 7, 7, 7, 7, 7, 11, 11, 11, 11, 11, 7, 7, 7],
    [7, 7, 20, 7, 7, 7, 7, 7, 7, 7, 7, 7, 11, 11, 11, 7, 7, 7, 7, 7],
    [7, 20, 20, 20, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7],
    [7, 7, 20, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7],
    [7, 7, 20, 7, 7, 7, 9, 9, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7],
    [7, 7, 7, 7, 7, 7, 9, 9, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7],
    [7, 7, 7, 7, 13, 7, 9, 7, 7, 12, 12, 7, 7, 7, 7, 7, 7, 7, 7, 7],
    [7, 7, 7, 7, 13, 9, 9, 7, 12, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7],
    [7, 7, 7, 7, 13, 7, 7, 7, 12, 7, 7, 7, 7, 17, 17, 17, 7, 7, 7, 7],
    [7, 7, 7, 7, 13, 7, 7, 7, 12, 7, 7, 7, 7, 18, 18, 18, 7, 7, 7, 7],
    [7, 7, 12, 12, 12, 12, 12, 12, 12, 7, 7, 7, 7, 19, 19, 19, 7, 7, 7, 7],
    [7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 3, 3, 3, 7, 7, 7, 7],
    [7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 3, 3, 3, 3, 14, 14, 7],
    [7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 3, 3, 7, 7, 7],
];
