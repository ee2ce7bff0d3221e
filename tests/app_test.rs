use tui_cube2048::app::{AppConfig, AppContext, Control};
use tui_cube2048::input::InputCommand;
use tui_cube2048::term::{FrameBuffer, Viewport};
use tui_cube2048::types::Direction;

fn context() -> AppContext {
    AppContext::new(AppConfig {
        seed: Some(7),
        ..AppConfig::default()
    })
    .unwrap()
}

#[test]
fn new_context_starts_a_game() {
    let mut ctx = context();
    assert!(ctx.pull_snapshots());
    assert_eq!(ctx.snapshot().tiles().count(), 2);
    assert!(!ctx.pull_snapshots());
}

#[test]
fn moves_publish_snapshots() {
    let mut ctx = context();
    ctx.pull_snapshots();

    let mut published = false;
    for d in Direction::ALL {
        assert_eq!(ctx.handle(InputCommand::Move(d)), Control::Continue);
        published |= ctx.pull_snapshots();
    }
    assert!(published);
    assert!(ctx.snapshot().tiles().count() >= 2);
}

#[test]
fn display_commands_request_redraw() {
    let mut ctx = context();

    assert_eq!(ctx.handle(InputCommand::FocusLayer(1)), Control::Redraw);
    assert_eq!(ctx.options().focus_layer, Some(1));
    assert_eq!(ctx.handle(InputCommand::FocusLayer(1)), Control::Redraw);
    assert_eq!(ctx.options().focus_layer, None);

    assert_eq!(ctx.handle(InputCommand::ToggleRotation), Control::Redraw);
    assert!(ctx.snapshot().rotated);
    assert!(ctx.engine().rotated());
}

#[test]
fn restart_and_quit() {
    let mut ctx = context();
    ctx.pull_snapshots();

    assert_eq!(ctx.handle(InputCommand::Restart), Control::Continue);
    assert!(ctx.pull_snapshots());
    assert_eq!(ctx.snapshot().score, 0);

    // Nothing to continue from before a win.
    ctx.handle(InputCommand::KeepPlaying);
    assert!(!ctx.pull_snapshots());

    assert_eq!(ctx.handle(InputCommand::Quit), Control::Quit);
}

#[test]
fn render_fills_viewport() {
    let ctx = context();
    let mut fb = FrameBuffer::new(1, 1);
    ctx.render_into(Viewport::new(100, 16), &mut fb);
    assert_eq!((fb.width(), fb.height()), (100, 16));
    let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.contains("SCORE"));
}

#[test]
fn fixed_seed_wins_over_clock() {
    let config = AppConfig {
        seed: Some(99),
        ..AppConfig::default()
    };
    assert_eq!(config.seed_or_clock(), 99);
}
