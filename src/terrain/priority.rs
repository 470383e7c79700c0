//! Blend draw-precedence ordering over terrain types.

use crate::terrain::types::TerrainTypeRecord;

/// Terrain-type ids ordered by blend precedence, highest first.
///
/// Advisory data for the blending renderer: for two adjacent tiles of
/// differing type, the earlier id's transition texture draws on top.
/// Contains each loaded id exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityOrdering {
    ids: Vec<u16>,
}

impl PriorityOrdering {
    /// Derive the ordering from the loaded terrain-type table.
    ///
    /// Stable sort by descending `blend_priority`; equal priorities keep
    /// table order. An empty table yields an empty ordering.
    #[must_use]
    pub fn resolve(terrain_types: &[TerrainTypeRecord]) -> Self {
        let mut order: Vec<usize> = (0..terrain_types.len()).collect();
        order.sort_by_key(|&i| {
            std::cmp::Reverse(terrain_types[i].blend_priority)
        });
        let ids = order.into_iter().map(|i| terrain_types[i].id).collect();
        Self { ids }
    }

    /// The ordered ids, highest precedence first.
    #[must_use]
    pub fn ids(&self) -> &[u16] {
        &self.ids
    }

    /// Number of entries (equals the loaded terrain-type count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// `true` when no terrain types were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
