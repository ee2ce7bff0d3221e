//! Tile module - a single valued cube occupying one grid cell.

use tui_cube2048_types::{Position, TileKind};

/// A numbered tile with its position and per-move history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub value: u32,
    pub kind: TileKind,
    pub position: Position,
    /// Position at the start of the current move.
    pub previous_position: Option<Position>,
    /// The two tiles consumed to create this one during the current move.
    pub merged_from: Option<Box<[Tile; 2]>>,
}

impl Tile {
    pub fn new(position: Position, value: u32) -> Self {
        Self::with_kind(position, value, TileKind::Normal)
    }

    pub fn bonus(position: Position, value: u32) -> Self {
        Self::with_kind(position, value, TileKind::Bonus)
    }

    pub fn with_kind(position: Position, value: u32, kind: TileKind) -> Self {
        Self {
            value,
            kind,
            position,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Combine `moving` into `resting`, producing a tile of double value at
    /// `resting`'s cell. Both sources are kept in `merged_from`, with the
    /// moving tile converged onto the target cell.
    pub fn merge(mut moving: Tile, resting: Tile) -> Self {
        debug_assert_eq!(moving.value, resting.value);
        debug_assert_eq!(moving.kind, resting.kind);

        let at = resting.position;
        let kind = if resting.kind == TileKind::Normal {
            TileKind::Normal
        } else {
            TileKind::MergedBonus
        };
        moving.update_position(at);

        Self {
            value: resting.value * 2,
            kind,
            position: at,
            previous_position: None,
            merged_from: Some(Box::new([moving, resting])),
        }
    }

    /// Record the current position and drop last move's merge history.
    pub fn save_position(&mut self) {
        self.previous_position = Some(self.position);
        self.merged_from = None;
    }

    pub fn update_position(&mut self, position: Position) {
        self.position = position;
    }

    /// True when this tile is a merge result from the current move.
    pub fn has_merged_this_turn(&self) -> bool {
        self.merged_from.is_some()
    }

    /// Whether two tiles could combine, ignoring per-move merge history.
    pub fn matches(&self, other: &Tile) -> bool {
        self.value == other.value && self.kind == other.kind
    }

    /// True if the tile ended the move somewhere other than where it began.
    pub fn moved(&self) -> bool {
        self.previous_position
            .map_or(false, |prev| prev != self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_doubles_value_at_resting_cell() {
        let moving = Tile::new(Position::new(0, 0, 0), 8);
        let resting = Tile::new(Position::new(2, 0, 0), 8);
        let merged = Tile::merge(moving, resting);

        assert_eq!(merged.value, 16);
        assert_eq!(merged.kind, TileKind::Normal);
        assert_eq!(merged.position, Position::new(2, 0, 0));
        assert!(merged.has_merged_this_turn());

        let sources = merged.merged_from.as_ref().unwrap();
        assert!(sources.iter().all(|t| t.position == Position::new(2, 0, 0)));
    }

    #[test]
    fn bonus_merges_become_merged_bonus() {
        let a = Tile::bonus(Position::new(0, 0, 0), 64);
        let b = Tile::bonus(Position::new(0, 1, 0), 64);
        assert_eq!(Tile::merge(a, b).kind, TileKind::MergedBonus);

        let a = Tile::with_kind(Position::new(0, 0, 0), 128, TileKind::MergedBonus);
        let b = Tile::with_kind(Position::new(0, 1, 0), 128, TileKind::MergedBonus);
        let merged = Tile::merge(a, b);
        assert_eq!(merged.kind, TileKind::MergedBonus);
        assert_eq!(merged.value, 256);
    }

    #[test]
    fn save_position_clears_merge_history() {
        let mut merged = Tile::merge(
            Tile::new(Position::new(0, 0, 0), 2),
            Tile::new(Position::new(0, 0, 1), 2),
        );
        merged.save_position();
        assert!(!merged.has_merged_this_turn());
        assert_eq!(merged.previous_position, Some(Position::new(0, 0, 1)));
        assert!(!merged.moved());

        merged.update_position(Position::new(0, 0, 2));
        assert!(merged.moved());
    }

    #[test]
    fn matches_requires_value_and_kind() {
        let p = Position::new(0, 0, 0);
        assert!(Tile::new(p, 4).matches(&Tile::new(p, 4)));
        assert!(!Tile::new(p, 4).matches(&Tile::new(p, 8)));
        assert!(!Tile::new(p, 4).matches(&Tile::bonus(p, 4)));
    }
}
