//! Terminal 3D 2048 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the term
//! crate. Redraws happen only when the engine publishes a snapshot or the
//! display options change.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::info;

use tui_cube2048::app::{AppConfig, AppContext, Control};
use tui_cube2048::input::map_key;
use tui_cube2048::logging;
use tui_cube2048::term::{FrameBuffer, TerminalRenderer, Viewport};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Some(path) = &config.log_path {
        logging::init_file_logging(path)?;
    }

    let mut ctx = AppContext::new(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut ctx);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(score = ctx.snapshot().score, "exit");
    result
}

fn run(term: &mut TerminalRenderer, ctx: &mut AppContext) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut fb = FrameBuffer::new(w, h);
    let mut dirty = true;

    loop {
        dirty |= ctx.pull_snapshots();
        if dirty {
            ctx.render_into(viewport, &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                let Some(command) = map_key(key) else {
                    continue;
                };
                match ctx.handle(command) {
                    Control::Quit => return Ok(()),
                    Control::Redraw => dirty = true,
                    Control::Continue => {}
                }
            }
            Event::Resize(w, h) => {
                viewport = Viewport::new(w, h);
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}
