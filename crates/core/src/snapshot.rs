//! Snapshots handed to the presentation layer, and the observer seam that
//! delivers them.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::tile::Tile;
use crate::types::{Position, TileKind};

/// A tile as the presentation sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub value: u32,
    pub kind: TileKind,
    pub position: Position,
    pub previous_position: Option<Position>,
    /// Cells the two merge sources came from, for merge animations.
    pub merged_from: Option<[Position; 2]>,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            value: tile.value,
            kind: tile.kind,
            position: tile.position,
            previous_position: tile.previous_position,
            merged_from: tile.merged_from.as_ref().map(|sources| {
                [
                    sources[0].previous_position.unwrap_or(sources[0].position),
                    sources[1].previous_position.unwrap_or(sources[1].position),
                ]
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub size: usize,
    /// Every cell in grid order (x outer, y middle, z inner).
    pub cells: Vec<Option<TileView>>,
    pub score: u32,
    pub best_score: u32,
    pub max_tile: u32,
    pub over: bool,
    pub won: bool,
    pub keep_playing: bool,
    /// `over || (won && !keep_playing)`
    pub terminated: bool,
    pub rotated: bool,
    pub bonus_in_play: u32,
}

impl GameSnapshot {
    /// Tile at `(x, y, z)`, or `None` when empty or out of range.
    pub fn tile_at(&self, x: usize, y: usize, z: usize) -> Option<&TileView> {
        if x >= self.size || y >= self.size || z >= self.size {
            return None;
        }
        let s = self.size;
        self.cells.get(x * s * s + y * s + z)?.as_ref()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &TileView> {
        self.cells.iter().flatten()
    }

    pub fn playable(&self) -> bool {
        !self.terminated
    }
}

/// Receives a snapshot every time the game visibly changes.
pub trait GameObserver {
    fn on_change(&mut self, snapshot: &GameSnapshot);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameSnapshot),
{
    fn on_change(&mut self, snapshot: &GameSnapshot) {
        self(snapshot)
    }
}

/// Forward snapshots to another part of the program. A dropped receiver is
/// not an error for the engine; the snapshot is discarded.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::Sender<GameSnapshot>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<GameSnapshot>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::Receiver<GameSnapshot>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl GameObserver for ChannelObserver {
    fn on_change(&mut self, snapshot: &GameSnapshot) {
        let _ = self.tx.send(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_view_reports_merge_sources_by_origin() {
        let mut a = Tile::new(Position::new(0, 0, 0), 2);
        let mut b = Tile::new(Position::new(1, 0, 0), 2);
        a.save_position();
        b.save_position();
        let merged = Tile::merge(b, a);

        let view = TileView::from(&merged);
        assert_eq!(view.value, 4);
        assert_eq!(
            view.merged_from,
            Some([Position::new(1, 0, 0), Position::new(0, 0, 0)])
        );
    }

    #[test]
    fn tile_at_guards_range() {
        let snap = GameSnapshot {
            size: 2,
            cells: vec![None; 8],
            ..GameSnapshot::default()
        };
        assert!(snap.tile_at(1, 1, 1).is_none());
        assert!(snap.tile_at(2, 0, 0).is_none());
    }

    #[test]
    fn snapshot_serializes_kind_in_kebab_case() {
        let snap = GameSnapshot {
            size: 2,
            cells: {
                let mut cells = vec![None; 8];
                cells[0] = Some(TileView::from(&Tile::with_kind(
                    Position::new(0, 0, 0),
                    8,
                    TileKind::MergedBonus,
                )));
                cells
            },
            ..GameSnapshot::default()
        };
        let v: serde_json::Value = serde_json::to_value(&snap).unwrap();
        assert_eq!(v["cells"][0]["kind"], "merged-bonus");
        assert_eq!(v["cells"][1], serde_json::Value::Null);
        assert_eq!(v["terminated"], false);
    }

    #[test]
    fn channel_observer_forwards_and_tolerates_dropped_receiver() {
        let (mut obs, rx) = ChannelObserver::channel();
        obs.on_change(&GameSnapshot::default());
        assert!(rx.try_recv().is_ok());
        drop(rx);
        obs.on_change(&GameSnapshot::default());
    }
}
