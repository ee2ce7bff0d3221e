//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! The cube is drawn as a row of 2D slices. With the default camera each
//! slice is a z layer (x across, y down); with the rotated camera each slice
//! is an x layer (z across, y down), so screen left/right always matches the
//! move the player makes.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, TileView};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{TileKind, LABEL_POWER_THRESHOLD};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const BLACK: Rgb = Rgb::new(0, 0, 0);
const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end-only display state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Draw only this layer (0-based) instead of the whole cube.
    pub focus_layer: Option<usize>,
}

impl ViewOptions {
    /// Focus `layer`. Focusing the current layer again, or a layer the cube
    /// does not have, shows every layer.
    pub fn toggle_focus(&mut self, layer: usize, size: usize) {
        self.focus_layer = if layer >= size || self.focus_layer == Some(layer) {
            None
        } else {
            Some(layer)
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Terminal renderer for the cube.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    /// Columns between two layers.
    layer_gap: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 6x3 fits a five character label with a margin.
        Self {
            cell_w: 6,
            cell_h: 3,
            layer_gap: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Width and height of one framed layer.
    pub fn layer_frame_size(&self, size: usize) -> (u16, u16) {
        let n = size as u16;
        (n * self.cell_w + 2, n * self.cell_h + 2)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        options: &ViewOptions,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));
        if snap.size == 0 {
            return;
        }

        let focus = options.focus_layer.filter(|&l| l < snap.size);
        let (first, count) = match focus {
            Some(layer) => (layer, 1),
            None => (0, snap.size),
        };

        let (frame_w, frame_h) = self.layer_frame_size(snap.size);
        let count16 = count as u16;
        let block_w = count16 * frame_w + (count16 - 1) * self.layer_gap;
        // caption row above the frames
        let block_h = frame_h + 1;

        let start_x = viewport.width.saturating_sub(block_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(block_h) / 2,
            AnchorY::Top => 0,
        };

        for (i, layer) in (first..first + count).enumerate() {
            let x0 = start_x + (i as u16) * (frame_w + self.layer_gap);
            self.draw_layer(fb, snap, layer, x0, start_y);
        }

        self.draw_side_panel(fb, snap, focus, viewport, start_x + block_w, start_y);

        if snap.over {
            self.draw_overlay_text(fb, start_x, start_y, block_w, block_h, "GAME OVER");
        } else if snap.won && !snap.keep_playing {
            self.draw_overlay_text(fb, start_x, start_y, block_w, block_h, "YOU WIN!");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, options: &ViewOptions, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, options, viewport, &mut fb);
        fb
    }

    fn draw_layer(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layer: usize, x0: u16, y0: u16) {
        let caption = CellStyle::new(Rgb::new(160, 160, 170), BLACK);
        let axis = if snap.rotated { "X " } else { "Z " };
        let cx = fb.put_str(x0 + 1, y0, axis, caption);
        fb.put_u32(cx, y0, layer as u32 + 1, caption.bold());

        let (frame_w, frame_h) = self.layer_frame_size(snap.size);
        let top = y0 + 1;
        self.draw_border(fb, x0, top, frame_w, frame_h, CellStyle::new(Rgb::new(200, 200, 200), BLACK));

        for row in 0..snap.size {
            for col in 0..snap.size {
                let (x, y, z) = if snap.rotated {
                    (layer, row, col)
                } else {
                    (col, row, layer)
                };
                let px = x0 + 1 + col as u16 * self.cell_w;
                let py = top + 1 + row as u16 * self.cell_h;
                match snap.tile_at(x, y, z) {
                    Some(tile) => self.draw_tile(fb, px, py, tile),
                    None => self.draw_empty_cell(fb, px, py),
                }
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for cx in x + 1..right {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            fb.put_char(x, cy, '│', style);
            fb.put_char(right, cy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, px: u16, py: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, px: u16, py: u16, tile: &TileView) {
        let style = tile_style(tile.kind, tile.value);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let label = tile_label(tile.value);
        let len = (label.chars().count() as u16).min(self.cell_w);
        let lx = px + (self.cell_w - len) / 2;
        let ly = py + self.cell_h / 2;
        for (i, ch) in label.chars().take(len as usize).enumerate() {
            fb.put_char(lx + i as u16, ly, ch, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        focus: Option<usize>,
        viewport: Viewport,
        block_right: u16,
        start_y: u16,
    ) {
        let panel_x = block_right.saturating_add(3);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = start_y;
        let rows: [(&str, u32); 4] = [
            ("SCORE", snap.score),
            ("BEST", snap.best_score),
            ("MAX", snap.max_tile),
            ("BONUS", snap.bonus_in_play),
        ];
        for (name, n) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "VIEW", label);
        y = y.saturating_add(1);
        let camera = if snap.rotated { "SIDE" } else { "FRONT" };
        let end = fb.put_str(panel_x, y, camera, value);
        if let Some(layer) = focus {
            let dim = value.dim();
            let cx = fb.put_str(end + 1, y, "#", dim);
            fb.put_u32(cx, y, layer as u32 + 1, dim);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
        let ty = y.saturating_add(h / 2);
        let style = CellStyle::new(WHITE, BLACK).bold();
        fb.put_str(tx, ty, text, style);
    }
}

/// Tile caption: the number itself, or `2^k` once it no longer fits.
pub fn tile_label(value: u32) -> String {
    if value > LABEL_POWER_THRESHOLD {
        format!("2^{}", value.trailing_zeros())
    } else {
        value.to_string()
    }
}

/// Colors by kind, then by magnitude for normal tiles.
pub fn tile_style(kind: TileKind, value: u32) -> CellStyle {
    const NORMAL: [Rgb; 11] = [
        Rgb::new(238, 228, 218),
        Rgb::new(237, 224, 200),
        Rgb::new(242, 177, 121),
        Rgb::new(245, 149, 99),
        Rgb::new(246, 124, 95),
        Rgb::new(246, 94, 59),
        Rgb::new(237, 207, 114),
        Rgb::new(237, 204, 97),
        Rgb::new(237, 200, 80),
        Rgb::new(237, 197, 63),
        Rgb::new(237, 194, 46),
    ];
    match kind {
        TileKind::Bonus => CellStyle::new(WHITE, Rgb::new(150, 60, 170)).bold(),
        TileKind::MergedBonus => CellStyle::new(WHITE, Rgb::new(40, 130, 140)).bold(),
        TileKind::Normal => {
            let exp = value.trailing_zeros() as usize;
            match NORMAL.get(exp.saturating_sub(1)) {
                Some(&bg) if exp <= 2 => CellStyle::new(Rgb::new(119, 110, 101), bg).bold(),
                Some(&bg) => CellStyle::new(WHITE, bg).bold(),
                None => CellStyle::new(WHITE, Rgb::new(60, 58, 50)).bold(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_switch_to_powers_above_threshold() {
        assert_eq!(tile_label(2), "2");
        assert_eq!(tile_label(8192), "8192");
        assert_eq!(tile_label(16384), "2^14");
        assert_eq!(tile_label(1 << 20), "2^20");
    }

    #[test]
    fn toggle_focus_cycles_back_to_all() {
        let mut opts = ViewOptions::default();
        opts.toggle_focus(1, 3);
        assert_eq!(opts.focus_layer, Some(1));
        opts.toggle_focus(2, 3);
        assert_eq!(opts.focus_layer, Some(2));
        opts.toggle_focus(2, 3);
        assert_eq!(opts.focus_layer, None);
        opts.toggle_focus(0, 3);
        opts.toggle_focus(5, 3);
        assert_eq!(opts.focus_layer, None);
    }

    #[test]
    fn bonus_kinds_have_their_own_colors() {
        let normal = tile_style(TileKind::Normal, 4);
        let bonus = tile_style(TileKind::Bonus, 4);
        let merged = tile_style(TileKind::MergedBonus, 4);
        assert_ne!(normal.bg, bonus.bg);
        assert_ne!(bonus.bg, merged.bg);
    }

    #[test]
    fn empty_snapshot_renders_blank() {
        let fb = GameView::default().render(&GameSnapshot::default(), &ViewOptions::default(), Viewport::new(10, 2));
        assert_eq!(fb.row_text(0), " ".repeat(10));
    }
}
