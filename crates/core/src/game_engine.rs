//! Game engine module - the move/merge state machine
//!
//! This module ties together the grid, tiles, bonus bookkeeping and the
//! injected collaborators (random source, best-score store, observer).
//!
//! # States
//!
//! - **Playing**: moves are accepted
//! - **Won**: a normal tile reached the win value; terminal until
//!   [`GameEngine::keep_playing`] is called
//! - **Over**: no empty cell and no adjacent equal pair remain
//!
//! [`GameEngine::restart`] returns to Playing from any state.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, error, info, trace};

use crate::bonus::BonusCounters;
use crate::config::{BonusConfig, GameConfig};
use crate::error::{ConfigError, GameError, GridError};
use crate::grid::Grid;
use crate::score::{BestScoreStore, MemoryScoreStore};
use crate::snapshot::{GameObserver, GameSnapshot, TileView};
use crate::tile::Tile;
use crate::types::{Direction, Position, TileKind, Vector};

/// Everything that changes while a game is played.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    grid: Grid,
    score: u32,
    max_tile: u32,
    over: bool,
    won: bool,
    keep_playing: bool,
    bonus: BonusCounters,
}

impl GameState {
    /// A fresh, empty state.
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            score: 0,
            max_tile: 2,
            over: false,
            won: false,
            keep_playing: false,
            bonus: BonusCounters::new(),
        }
    }

    /// Build a position from explicit tiles. Bonus counters and the max tile
    /// are derived from what is placed.
    ///
    /// Each tile needs a free in-bounds cell and a power-of-two value of at
    /// least 2. Bonus tiles are held to the shipped per-value and total caps.
    pub fn with_tiles<I>(size: usize, tiles: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = Tile>,
    {
        let caps = BonusConfig::default();
        let mut state = Self::new(size);
        for tile in tiles {
            if tile.value < 2 || !tile.value.is_power_of_two() {
                return Err(GameError::TileValue(tile.value));
            }
            if state.grid.checked_cell_content(tile.position)?.is_some() {
                return Err(GridError::Occupied { pos: tile.position }.into());
            }
            let is_bonus = tile.kind == TileKind::Bonus;
            if is_bonus && !state.bonus.can_add(tile.value, &caps) {
                return Err(GameError::BonusCap { value: tile.value });
            }
            state.max_tile = state.max_tile.max(tile.value);
            let value = tile.value;
            state.grid.insert_tile(tile)?;
            if is_bonus && !state.bonus.increment(value) {
                return Err(GameError::BonusCap { value });
            }
        }
        Ok(state)
    }

    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Largest tile produced so far (starts at 2).
    pub fn max_tile(&self) -> u32 {
        self.max_tile
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn keep_playing(&self) -> bool {
        self.keep_playing
    }

    pub fn bonus(&self) -> &BonusCounters {
        &self.bonus
    }

    /// Over, or won without permission to continue.
    pub fn is_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    pub fn moves_available(&self) -> bool {
        self.grid.cells_available() || self.tile_matches_available()
    }

    /// Any two face-adjacent tiles with equal value and kind.
    ///
    /// Adjacency is symmetric, so checking the three positive axis neighbours
    /// of every tile covers all six directions.
    pub fn tile_matches_available(&self) -> bool {
        self.grid.tiles().any(|tile| {
            Vector::POSITIVE_AXES.iter().any(|&v| {
                self.grid
                    .cell_content(tile.position.step(v))
                    .map_or(false, |other| other.matches(tile))
            })
        })
    }
}

/// What a single call to [`GameEngine::move_tiles`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub score_delta: u32,
    pub merges: u32,
    pub spawned: Option<Position>,
    pub bonus_spawned: Option<Position>,
}

/// Axis visiting orders for a move along `vector`: ascending, except axes
/// travelled in the positive direction, which go farthest-first.
pub fn build_traversals(size: usize, vector: Vector) -> [Vec<i32>; 3] {
    let axis = |component: i32| {
        let mut order: Vec<i32> = (0..size as i32).collect();
        if component == 1 {
            order.reverse();
        }
        order
    };
    [axis(vector.dx), axis(vector.dy), axis(vector.dz)]
}

/// The 3D 2048 game.
///
/// Construct with [`GameEngine::new`] (seeded xoshiro) or
/// [`GameEngine::with_rng`], attach collaborators, then call
/// [`GameEngine::setup`] to place the starting tiles.
pub struct GameEngine<R: Rng = Xoshiro256PlusPlus> {
    config: GameConfig,
    state: GameState,
    rng: R,
    rotated: bool,
    store: Box<dyn BestScoreStore>,
    observer: Option<Box<dyn GameObserver>>,
}

impl GameEngine<Xoshiro256PlusPlus> {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(config.size);
        Ok(Self {
            config,
            state,
            rng,
            rotated: false,
            store: Box::new(MemoryScoreStore::default()),
            observer: None,
        })
    }

    /// Resume from an explicit position (puzzles, tests, benchmarks). The
    /// config's size is taken from the state.
    pub fn from_state(mut config: GameConfig, state: GameState, rng: R) -> Result<Self, ConfigError> {
        config.size = state.grid.size();
        let mut engine = Self::with_rng(config, rng)?;
        engine.state = state;
        Ok(engine)
    }

    pub fn with_best_score_store(mut self, store: impl BestScoreStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn set_observer(&mut self, observer: impl GameObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.store.best()
    }

    pub fn rotated(&self) -> bool {
        self.rotated
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// Start a new game: fresh state, starting tiles, observer notified.
    pub fn setup(&mut self) {
        self.state = GameState::new(self.config.size);
        for _ in 0..self.config.start_tiles {
            self.add_random_tile();
        }
        debug!(size = self.config.size, "game set up");
        self.actuate();
    }

    pub fn restart(&mut self) {
        info!(score = self.state.score, "restart");
        self.setup();
    }

    /// Continue after winning.
    pub fn keep_playing(&mut self) {
        self.state.keep_playing = true;
        self.actuate();
    }

    /// Select the camera orientation used to map directions to vectors.
    pub fn set_view_rotation(&mut self, rotated: bool) {
        self.rotated = rotated;
    }

    pub fn toggle_rotation(&mut self) -> bool {
        self.rotated = !self.rotated;
        self.rotated
    }

    /// Move by numeric direction code (0..=5).
    pub fn move_code(&mut self, code: u8) -> Result<MoveOutcome, GameError> {
        let direction = Direction::from_code(code).ok_or(GameError::InvalidDirection(code))?;
        Ok(self.move_tiles(direction))
    }

    /// Slide every tile toward `direction`, merging equal neighbours.
    ///
    /// A move that shifts nothing is a no-op: no spawn, no score change and
    /// no notification.
    pub fn move_tiles(&mut self, direction: Direction) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        if self.state.is_terminated() {
            return outcome;
        }

        let vector = direction.vector(self.rotated);
        let [xs, ys, zs] = build_traversals(self.state.grid.size(), vector);

        self.prepare_tiles();

        for &x in &xs {
            for &y in &ys {
                for &z in &zs {
                    let cell = Position::new(x, y, z);
                    let Some(mut tile) = self.state.grid.remove_tile(cell) else {
                        continue;
                    };

                    let (farthest, next) = self.find_farthest_position(cell, vector);
                    let mergeable = self
                        .state
                        .grid
                        .cell_content(next)
                        .map_or(false, |other| other.matches(&tile) && !other.has_merged_this_turn());
                    let partner = if mergeable {
                        self.state.grid.remove_tile(next)
                    } else {
                        None
                    };

                    match partner {
                        Some(resting) => {
                            let merged = Tile::merge(tile, resting);
                            self.record_merge(&merged, &mut outcome);
                            self.place_tile(merged);
                            outcome.moved = true;
                        }
                        None => {
                            tile.update_position(farthest);
                            if farthest != cell {
                                outcome.moved = true;
                            }
                            self.place_tile(tile);
                        }
                    }
                }
            }
        }

        if outcome.moved {
            outcome.spawned = self.add_random_tile();
            outcome.bonus_spawned = self.add_bonus();

            if !self.state.moves_available() {
                self.state.over = true;
                info!(score = self.state.score, max_tile = self.state.max_tile, "game over");
            }

            self.actuate();
        }

        debug!(
            direction = direction.as_str(),
            rotated = self.rotated,
            moved = outcome.moved,
            merges = outcome.merges,
            score_delta = outcome.score_delta,
            "move"
        );
        outcome
    }

    /// Place a 2 (or occasionally a 4) in a random empty cell.
    pub fn add_random_tile(&mut self) -> Option<Position> {
        if !self.state.grid.cells_available() {
            return None;
        }
        let value = if self.rng.gen::<f64>() < self.config.two_probability {
            2
        } else {
            4
        };
        let pos = self.state.grid.random_available_cell(&mut self.rng).ok()?;
        self.place_tile(Tile::new(pos, value));
        trace!(value, x = pos.x, y = pos.y, z = pos.z, "spawned tile");
        Some(pos)
    }

    /// Maybe place a bonus tile. The chance shrinks with the free space, and
    /// the per-value and total caps are never exceeded.
    pub fn add_bonus(&mut self) -> Option<Position> {
        let bonus = &self.config.bonus;
        if bonus.values.is_empty() {
            return None;
        }

        let free = self.state.grid.available_count();
        let chance = bonus.spawn_rate * free as f64 / self.state.grid.capacity() as f64;
        if self.rng.gen::<f64>() >= chance {
            return None;
        }

        let value = bonus.values[self.rng.gen_range(0..bonus.values.len())];
        if !self.state.bonus.can_add(value, bonus) {
            trace!(value, "bonus capped");
            return None;
        }

        let pos = self.state.grid.random_available_cell(&mut self.rng).ok()?;
        if !self.state.bonus.increment(value) {
            return None;
        }
        self.place_tile(Tile::bonus(pos, value));
        trace!(value, x = pos.x, y = pos.y, z = pos.z, "spawned bonus");
        Some(pos)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let state = &self.state;
        GameSnapshot {
            size: state.grid.size(),
            cells: state
                .grid
                .cells()
                .iter()
                .map(|cell| cell.as_ref().map(TileView::from))
                .collect(),
            score: state.score,
            best_score: self.store.best(),
            max_tile: state.max_tile,
            over: state.over,
            won: state.won,
            keep_playing: state.keep_playing,
            terminated: state.is_terminated(),
            rotated: self.rotated,
            bonus_in_play: state.bonus.total(),
        }
    }

    /// Save positions and forget last move's merges (optionally retiring
    /// merged-bonus tiles first).
    fn prepare_tiles(&mut self) {
        if self.config.retire_merged_bonus {
            let retired = self
                .state
                .grid
                .retain_tiles(|t| t.kind != TileKind::MergedBonus);
            if retired > 0 {
                trace!(retired, "retired merged-bonus tiles");
            }
        }
        for tile in self.state.grid.tiles_mut() {
            tile.save_position();
        }
    }

    /// Walk from `cell` along `vector` until leaving the grid or hitting a
    /// tile. Returns the last free cell and the blocking cell.
    fn find_farthest_position(&self, cell: Position, vector: Vector) -> (Position, Position) {
        let mut previous = cell;
        let mut next = cell.step(vector);
        while self.state.grid.cell_available(next) {
            previous = next;
            next = next.step(vector);
        }
        (previous, next)
    }

    fn record_merge(&mut self, merged: &Tile, outcome: &mut MoveOutcome) {
        let value = merged.value;
        if let Some(sources) = merged.merged_from.as_deref() {
            for source in sources.iter().filter(|s| s.kind == TileKind::Bonus) {
                self.state.bonus.decrement(source.value);
            }
        }

        self.state.score = self.state.score.saturating_add(value);
        self.state.max_tile = self.state.max_tile.max(value);
        outcome.score_delta = outcome.score_delta.saturating_add(value);
        outcome.merges += 1;

        if value == self.config.win_value && merged.kind == TileKind::Normal && !self.state.won {
            self.state.won = true;
            info!(score = self.state.score, "reached win tile");
        }
    }

    /// Positions come from traversals and free-cell queries over this grid,
    /// so the insert cannot miss. Release builds log a miss instead of
    /// panicking.
    fn place_tile(&mut self, tile: Tile) {
        let result = self.state.grid.insert_tile(tile);
        if let Err(err) = &result {
            error!(%err, "tile placed outside the grid");
        }
        debug_assert!(result.is_ok(), "tile placed outside the grid");
    }

    /// Persist a new best and push a snapshot to the observer.
    fn actuate(&mut self) {
        let score = self.state.score;
        if self.store.best() < score {
            self.store.set_best(score);
        }

        if self.observer.is_some() {
            let snapshot = self.snapshot();
            if let Some(observer) = self.observer.as_mut() {
                observer.on_change(&snapshot);
            }
        }
    }
}
