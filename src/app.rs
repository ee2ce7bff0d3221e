//! Application context: configuration, engine wiring and command handling.
//!
//! The engine pushes snapshots through a [`ChannelObserver`]; the context
//! keeps the latest one plus the view options, and the run loop redraws when
//! either changes.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing::info;

use crate::best_score::FileScoreStore;
use crate::core::{ChannelObserver, GameConfig, GameEngine, GameSnapshot, MemoryScoreStore};
use crate::input::InputCommand;
use crate::term::{FrameBuffer, GameView, ViewOptions, Viewport};

/// Binary configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub game: GameConfig,
    /// Fixed seed for a reproducible game; the clock is used otherwise.
    pub seed: Option<u64>,
    /// Where the best score is kept. In memory only when unset.
    pub best_score_path: Option<PathBuf>,
    /// Log file. No logging when unset.
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read `CUBE2048_*` variables on top of [`GameConfig::from_env`].
    pub fn from_env() -> Self {
        use std::env;

        let seed = env::var("CUBE2048_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let path_var = |name: &str| {
            env::var(name)
                .ok()
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
        };

        Self {
            game: GameConfig::from_env(),
            seed,
            best_score_path: path_var("CUBE2048_BEST_SCORE_PATH"),
            log_path: path_var("CUBE2048_LOG_PATH"),
        }
    }

    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

/// What the run loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Nothing to do beyond waiting for snapshots.
    Continue,
    /// Display state changed without a new snapshot.
    Redraw,
    Quit,
}

pub struct AppContext {
    engine: GameEngine,
    snapshots: mpsc::Receiver<GameSnapshot>,
    snapshot: GameSnapshot,
    view: GameView,
    options: ViewOptions,
}

impl AppContext {
    /// Build the engine with its collaborators and start the first game.
    pub fn new(config: AppConfig) -> Result<Self> {
        let seed = config.seed_or_clock();
        let (observer, snapshots) = ChannelObserver::channel();

        let engine = GameEngine::new(config.game.clone(), seed)?.with_observer(observer);
        let mut engine = match &config.best_score_path {
            Some(path) => engine.with_best_score_store(FileScoreStore::open(path.clone())),
            None => engine.with_best_score_store(MemoryScoreStore::default()),
        };
        info!(seed, size = config.game.size, "starting game");
        engine.setup();

        let snapshot = engine.snapshot();
        Ok(Self {
            engine,
            snapshots,
            snapshot,
            view: GameView::default(),
            options: ViewOptions::default(),
        })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The most recent snapshot received.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Drain pending snapshots; returns true if any arrived.
    pub fn pull_snapshots(&mut self) -> bool {
        let mut fresh = false;
        while let Ok(snap) = self.snapshots.try_recv() {
            self.snapshot = snap;
            fresh = true;
        }
        fresh
    }

    pub fn handle(&mut self, command: InputCommand) -> Control {
        match command {
            InputCommand::Move(direction) => {
                self.engine.move_tiles(direction);
                Control::Continue
            }
            InputCommand::Restart => {
                self.engine.restart();
                Control::Continue
            }
            InputCommand::KeepPlaying => {
                if self.snapshot.won && !self.snapshot.keep_playing {
                    self.engine.keep_playing();
                }
                Control::Continue
            }
            InputCommand::ToggleRotation => {
                self.engine.toggle_rotation();
                self.snapshot = self.engine.snapshot();
                Control::Redraw
            }
            InputCommand::FocusLayer(layer) => {
                self.options.toggle_focus(layer, self.snapshot.size);
                Control::Redraw
            }
            InputCommand::Quit => Control::Quit,
        }
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        self.view
            .render_into(&self.snapshot, &self.options, viewport, fb);
    }
}
