//! Player-color palette loading and normalization.

use crate::assets::Record;
use crate::error::ConfigError;

/// Fixed capacity of the player-color table uploaded to the team-color
/// program.
pub const PLAYER_COLOR_SLOTS: usize = 64;

/// One palette line, shaped `index=r,g,b,a` (all integers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerColorEntry {
    /// Slot index in the fixed table; must be `< PLAYER_COLOR_SLOTS`.
    pub index: u32,
    /// Red channel, 0–255.
    pub r: u8,
    /// Green channel, 0–255.
    pub g: u8,
    /// Blue channel, 0–255.
    pub b: u8,
    /// Alpha channel, 0–255.
    pub a: u8,
}

impl Record for PlayerColorEntry {
    fn fill(line: &str) -> Option<Self> {
        let (index, channels) = line.split_once('=')?;
        let mut channels = channels.split(',');
        let r = channels.next()?.trim().parse().ok()?;
        let g = channels.next()?.trim().parse().ok()?;
        let b = channels.next()?.trim().parse().ok()?;
        let a = channels.next()?.trim().parse().ok()?;
        if channels.next().is_some() {
            return None;
        }
        Some(Self {
            index: index.trim().parse().ok()?,
            r,
            g,
            b,
            a,
        })
    }

    fn dump(&self) -> String {
        format!(
            "color {}: ({},{},{},{})",
            self.index, self.r, self.g, self.b, self.a
        )
    }
}

/// The normalized 64-slot color table, ready for a one-time vec4-array
/// upload to the team-color program.
///
/// Slots not covered by the palette file stay transparent black.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerColorTable {
    colors: [[f32; 4]; PLAYER_COLOR_SLOTS],
}

impl PlayerColorTable {
    /// Convert loaded entries into normalized slots. Integer channels map
    /// to `[0.0, 1.0]` by division by 255, preserving order.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PlayerColorIndexOutOfRange`] for any entry whose
    /// index does not fit the fixed table.
    pub fn from_entries(
        entries: &[PlayerColorEntry],
    ) -> Result<Self, ConfigError> {
        let mut colors = [[0.0; 4]; PLAYER_COLOR_SLOTS];
        for entry in entries {
            let slot = colors.get_mut(entry.index as usize).ok_or(
                ConfigError::PlayerColorIndexOutOfRange {
                    index: entry.index,
                    capacity: PLAYER_COLOR_SLOTS,
                },
            )?;
            *slot = [
                f32::from(entry.r) / 255.0,
                f32::from(entry.g) / 255.0,
                f32::from(entry.b) / 255.0,
                f32::from(entry.a) / 255.0,
            ];
        }
        Ok(Self { colors })
    }

    /// The full table as upload-ready vec4 slots.
    #[must_use]
    pub fn slots(&self) -> &[[f32; 4]; PLAYER_COLOR_SLOTS] {
        &self.colors
    }

    /// One normalized slot, or `None` past the table's capacity.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<[f32; 4]> {
        self.colors.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_line_parse() {
        let entry = PlayerColorEntry::fill("5=10,20,30,255").unwrap();
        assert_eq!(entry.index, 5);
        assert_eq!((entry.r, entry.g, entry.b, entry.a), (10, 20, 30, 255));
    }

    #[test]
    fn test_palette_line_rejects_wrong_shape() {
        assert!(PlayerColorEntry::fill("5=10,20,30").is_none());
        assert!(PlayerColorEntry::fill("5=10,20,30,255,9").is_none());
        assert!(PlayerColorEntry::fill("10,20,30,255").is_none());
        assert!(PlayerColorEntry::fill("5=10,20,30,256").is_none());
    }

    #[test]
    fn test_normalization_is_order_preserving_division_by_255() {
        let entry = PlayerColorEntry::fill("5=10,20,30,255").unwrap();
        let table = PlayerColorTable::from_entries(&[entry]).unwrap();
        let slot = table.slot(5).unwrap();
        assert_eq!(slot[0], 10.0 / 255.0);
        assert_eq!(slot[1], 20.0 / 255.0);
        assert_eq!(slot[2], 30.0 / 255.0);
        assert_eq!(slot[3], 1.0);
    }

    #[test]
    fn test_uncovered_slots_stay_transparent() {
        let table = PlayerColorTable::from_entries(&[]).unwrap();
        assert_eq!(table.slot(0).unwrap(), [0.0; 4]);
        assert_eq!(table.slots().len(), PLAYER_COLOR_SLOTS);
    }

    #[test]
    fn test_out_of_range_index_is_fatal() {
        let entry = PlayerColorEntry {
            index: PLAYER_COLOR_SLOTS as u32,
            r: 1,
            g: 2,
            b: 3,
            a: 4,
        };
        let err = PlayerColorTable::from_entries(&[entry]).unwrap_err();
        match err {
            ConfigError::PlayerColorIndexOutOfRange { index, capacity } => {
                assert_eq!(index as usize, PLAYER_COLOR_SLOTS);
                assert_eq!(capacity, PLAYER_COLOR_SLOTS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_channel_normalization_endpoints() {
        let entries = [
            PlayerColorEntry {
                index: 0,
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            },
            PlayerColorEntry {
                index: 1,
                r: 255,
                g: 255,
                b: 255,
                a: 255,
            },
        ];
        let table = PlayerColorTable::from_entries(&entries).unwrap();
        assert_eq!(table.slot(0).unwrap(), [0.0; 4]);
        assert_eq!(table.slot(1).unwrap(), [1.0; 4]);
    }
}
