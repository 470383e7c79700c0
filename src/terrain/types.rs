//! Terrain and blending metadata records.

use crate::assets::Record;

/// Number of tile-transition blending modes. The blending table is still
/// fixed-size pending fully data-driven loading; the loader validates the
/// file against this constant instead of assuming it.
pub const BLEND_MODE_COUNT: usize = 9;

/// One distinct terrain surface (grass, sand, water, ...).
///
/// Loaded once at startup from the terrain metadata table; immutable
/// afterward. Ids are dense from 0 and match the ids used in the raw tile
/// matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainTypeRecord {
    /// Dense terrain-type id.
    pub id: u16,
    /// Texture reference for this surface, relative to the asset root.
    pub texture_ref: String,
    /// Draw precedence when adjacent tiles differ; higher draws on top.
    pub blend_priority: i32,
}

impl Record for TerrainTypeRecord {
    fn fill(line: &str) -> Option<Self> {
        let mut fields = line.split(',');
        let id = fields.next()?.trim().parse().ok()?;
        let texture_ref = fields.next()?.trim();
        let blend_priority = fields.next()?.trim().parse().ok()?;
        if texture_ref.is_empty() || fields.next().is_some() {
            return None;
        }
        Some(Self {
            id,
            texture_ref: texture_ref.to_owned(),
            blend_priority,
        })
    }

    fn dump(&self) -> String {
        format!(
            "terrain type {}: texture={} priority={}",
            self.id, self.texture_ref, self.blend_priority
        )
    }
}

/// Geometry/texture description for the transition between two terrain
/// types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendingModeRecord {
    /// Blending-mode id.
    pub id: u16,
    /// Transition-texture reference, relative to the asset root.
    pub texture_ref: String,
}

impl Record for BlendingModeRecord {
    fn fill(line: &str) -> Option<Self> {
        let (id, texture_ref) = line.split_once(',')?;
        let texture_ref = texture_ref.trim();
        if texture_ref.is_empty() {
            return None;
        }
        Some(Self {
            id: id.trim().parse().ok()?,
            texture_ref: texture_ref.to_owned(),
        })
    }

    fn dump(&self) -> String {
        format!("blending mode {}: texture={}", self.id, self.texture_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_type_line_roundtrip() {
        let record =
            TerrainTypeRecord::fill("7, terrain/grass.png, 40").unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.texture_ref, "terrain/grass.png");
        assert_eq!(record.blend_priority, 40);
    }

    #[test]
    fn test_terrain_type_rejects_missing_and_extra_fields() {
        assert!(TerrainTypeRecord::fill("7,terrain/grass.png").is_none());
        assert!(TerrainTypeRecord::fill("7,grass.png,40,extra").is_none());
        assert!(TerrainTypeRecord::fill("x,grass.png,40").is_none());
    }

    #[test]
    fn test_blending_mode_line() {
        let record = BlendingModeRecord::fill("3,blend/diagonal.png").unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(record.texture_ref, "blend/diagonal.png");
        assert!(BlendingModeRecord::fill("3,").is_none());
    }
}
