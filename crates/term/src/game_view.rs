//! GameView: maps a game snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen layout, top to bottom:
//!
//! - 1 row HUD (score, level, lives, words, wpm, accuracy, best)
//! - the playfield, one row per [`CELL_PX_H`] logical pixels
//! - 1 separator row and 1 typing row

use crate::core::{GameSnapshot, Phase, WordSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameOptions, Playfield, CELL_PX_H, CELL_PX_W};

/// Rows reserved outside the playfield.
pub const HUD_ROWS: u16 = 1;
pub const TYPING_ROWS: u16 = 2;

/// Smallest terminal the view draws a game in.
pub const MIN_WIDTH: u16 = 24;
pub const MIN_HEIGHT: u16 = 8;

const BG: Rgb = Rgb::new(0, 0, 0);
const FIELD_BG: Rgb = Rgb::new(12, 14, 28);

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

    /// Rows available to the playfield.
    pub fn field_rows(&self) -> u16 {
        self.height.saturating_sub(HUD_ROWS + TYPING_ROWS)
    }

    pub fn too_small(&self) -> bool {
        self.width < MIN_WIDTH || self.height < MIN_HEIGHT
    }
}

/// Playfield in logical pixels for a terminal viewport.
pub fn playfield_for(viewport: Viewport) -> Playfield {
    Playfield::from_cells(viewport.width.max(1), viewport.field_rows().max(1))
}

/// Everything drawn in one frame besides the game itself.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub snapshot: &'a GameSnapshot,
    pub options: &'a GameOptions,
    pub premium: bool,
    /// Level to announce while the level-up banner is visible.
    pub level_up_banner: Option<u32>,
}

struct Palette {
    hud_label: CellStyle,
    hud_value: CellStyle,
    word: CellStyle,
    word_danger: CellStyle,
    typed: CellStyle,
    target: CellStyle,
    input: CellStyle,
    hint: CellStyle,
    title: CellStyle,
    accent: CellStyle,
    field: CellStyle,
}

impl Default for Palette {
    fn default() -> Self {
        let on_field = |fg| CellStyle {
            fg,
            bg: FIELD_BG,
            bold: false,
            dim: false,
        };
        Self {
            hud_label: CellStyle::fg(Rgb::new(140, 150, 170)),
            hud_value: CellStyle::fg(Rgb::new(240, 240, 240)).bold(),
            word: on_field(Rgb::new(210, 220, 255)),
            word_danger: on_field(Rgb::new(255, 90, 90)).bold(),
            typed: on_field(Rgb::new(90, 230, 120)).bold(),
            target: on_field(Rgb::new(255, 220, 90)).bold(),
            input: CellStyle::fg(Rgb::new(255, 255, 255)).bold(),
            hint: CellStyle::fg(Rgb::new(150, 150, 160)),
            title: CellStyle::fg(Rgb::new(120, 200, 255)).bold(),
            accent: CellStyle::fg(Rgb::new(255, 200, 80)).bold(),
            field: on_field(Rgb::new(60, 60, 80)),
        }
    }
}

/// Renders [`Screen`]s into framebuffers.
#[derive(Default)]
pub struct GameView {
    palette: Palette,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, screen: &Screen<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::fg(Rgb::new(220, 220, 220)).into_cell(' '));

        if viewport.too_small() {
            let y = viewport.height / 2;
            self.center(fb, viewport, y, "terminal too small", self.palette.accent);
            return;
        }

        match screen.snapshot.phase {
            Phase::Idle | Phase::GameOver => self.draw_menu(fb, screen, viewport),
            Phase::Playing | Phase::Paused => {
                self.draw_hud(fb, screen.snapshot, viewport);
                self.draw_field(fb, screen, viewport);
                self.draw_typing_zone(fb, screen, viewport);
                if screen.snapshot.phase == Phase::Paused {
                    self.draw_pause(fb, viewport);
                } else if let Some(level) = screen.level_up_banner {
                    self.draw_banner(fb, viewport, level);
                }
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: &Screen<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, viewport, &mut fb);
        fb
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let p = &self.palette;
        let mut x = self.hud_field(fb, 1, "SCORE", snap.score, "");
        x = self.hud_field(fb, x, "LEVEL", snap.level, "");

        x = fb.put_str(x, 0, "LIVES ", p.hud_label);
        let hearts = CellStyle::fg(Rgb::new(255, 80, 110)).bold();
        if snap.lives <= 5 {
            for _ in 0..snap.lives {
                x = fb.put_str(x, 0, "♥", hearts);
            }
        } else {
            x = fb.put_str(x, 0, "♥x", hearts);
            x = fb.put_u32(x, 0, snap.lives, hearts);
        }
        x += 2;

        x = self.hud_field(fb, x, "WORDS", snap.words_typed, "");
        if viewport.width >= 64 {
            x = self.hud_field(fb, x, "WPM", snap.stats.wpm, "");
            x = self.hud_field(fb, x, "ACC", snap.stats.accuracy, "%");
        }
        if viewport.width >= 80 {
            self.hud_field(fb, x, "BEST", snap.stats.high_score, "");
        }
    }

    /// `LABEL value` at column `x`; returns where the next field starts.
    fn hud_field(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        label: &str,
        value: u32,
        suffix: &str,
    ) -> u16 {
        let p = &self.palette;
        let x = fb.put_str(x, 0, label, p.hud_label);
        let x = fb.put_u32(x + 1, 0, value, p.hud_value);
        fb.put_str(x, 0, suffix, p.hud_value) + 2
    }

    fn draw_field(&self, fb: &mut FrameBuffer, screen: &Screen<'_>, viewport: Viewport) {
        let rows = viewport.field_rows();
        fb.fill_rect(0, HUD_ROWS, viewport.width, rows, ' ', self.palette.field);

        let field = playfield_for(viewport);
        // Danger line marker on the right edge.
        let danger_row = (field.danger_line() / CELL_PX_H) as u16;
        if danger_row < rows {
            fb.put_char(
                viewport.width - 1,
                HUD_ROWS + danger_row,
                '┤',
                self.palette.field,
            );
        }

        for word in &screen.snapshot.words {
            self.draw_word(fb, word, screen.options, field, viewport);
        }
    }

    fn draw_word(
        &self,
        fb: &mut FrameBuffer,
        word: &WordSnapshot,
        options: &GameOptions,
        field: Playfield,
        viewport: Viewport,
    ) {
        // Words above the top edge are not visible yet.
        if word.y < 0.0 {
            return;
        }
        let rows = viewport.field_rows();
        let row = ((word.y / CELL_PX_H) as u16).min(rows.saturating_sub(1));
        let len = word.text.chars().count() as u16;
        let center = (word.x / CELL_PX_W) as u16;
        let col = center
            .saturating_sub(len / 2)
            .min(viewport.width.saturating_sub(len));
        let y = HUD_ROWS + row;

        let p = &self.palette;
        let base = if word.y > field.danger_line() {
            p.word_danger
        } else {
            p.word
        };

        if word.being_typed && options.show_typed_text {
            let x = fb.put_str(col, y, word.typed(), p.typed);
            fb.put_str(x, y, word.remaining(), p.target);
        } else if word.being_typed {
            fb.put_str(col, y, word.text, p.target);
        } else {
            fb.put_str(col, y, word.text, base);
        }
    }

    fn draw_typing_zone(&self, fb: &mut FrameBuffer, screen: &Screen<'_>, viewport: Viewport) {
        let p = &self.palette;
        let sep_y = viewport.height - TYPING_ROWS;
        let input_y = sep_y + 1;

        fb.fill_rect(0, sep_y, viewport.width, 1, '─', p.hint);
        let label = screen.snapshot.difficulty.as_str();
        fb.put_str(2, sep_y, label, p.hint);

        let snap = screen.snapshot;
        let mut x = fb.put_str(1, input_y, "> ", p.hint);
        x = fb.put_str(x, input_y, &snap.input, p.input);
        fb.put_char(x, input_y, '_', p.hint.dim());

        if screen.options.word_preview {
            if let Some(target) = snap.target() {
                let len = target.text.chars().count() as u16 + 2;
                let px = viewport.width.saturating_sub(len + 1).max(x + 2);
                let px = fb.put_str(px, input_y, "» ", p.hint);
                fb.put_str(px, input_y, target.text, p.accent);
            }
        }
    }

    fn draw_pause(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let mid = HUD_ROWS + viewport.field_rows() / 2;
        let p = &self.palette;
        self.center(fb, viewport, mid.saturating_sub(1), "  PAUSED  ", p.title);
        self.center(fb, viewport, mid + 1, " [Esc] resume  [q] menu ", p.hint);
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, viewport: Viewport, level: u32) {
        let mid = HUD_ROWS + viewport.field_rows() / 3;
        let text = format!(" LEVEL {level}! ");
        self.center(fb, viewport, mid, &text, self.palette.accent);
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, screen: &Screen<'_>, viewport: Viewport) {
        let p = &self.palette;
        let snap = screen.snapshot;
        let opts = screen.options;
        let on_off = |b: bool| if b { "on" } else { "off" };

        let mut lines: Vec<(String, CellStyle)> = Vec::with_capacity(20);
        lines.push(("TYPING RAIN".to_string(), p.title));
        if screen.premium {
            lines.push(("★ PREMIUM".to_string(), p.accent));
        }
        lines.push((String::new(), p.hint));

        if snap.phase == Phase::GameOver {
            lines.push(("GAME OVER".to_string(), CellStyle::fg(Rgb::new(255, 90, 90)).bold()));
        }
        if snap.episode_id > 0 {
            let (min, sec) = snap.stats.clock();
            lines.push((format!("Last score  {}", snap.score), p.hud_value));
            lines.push((
                format!(
                    "Words {}  WPM {}  Accuracy {}%  Time {}:{:02}",
                    snap.stats.total_words_typed, snap.stats.wpm, snap.stats.accuracy, min, sec
                ),
                p.hud_label,
            ));
        }
        lines.push((format!("High score  {}", snap.stats.high_score), p.hud_value));
        lines.push((String::new(), p.hint));

        let menu = [
            ("[Enter]", "start", String::new()),
            ("[d]", "difficulty", opts.difficulty.to_string()),
            ("[s]", "sound", on_off(opts.sound_enabled).to_string()),
            ("[+/-]", "volume", opts.sound_volume.to_string()),
            ("[t]", "typed text", on_off(opts.show_typed_text).to_string()),
            ("[f]", "effects", on_off(opts.particle_effects).to_string()),
            ("[w]", "word preview", on_off(opts.word_preview).to_string()),
            ("[q]", "quit", String::new()),
        ];
        for (key, label, value) in menu {
            lines.push((format!("{key:>7} {label:<13}{value:>6}"), p.hint));
        }

        let total = lines.len() as u16;
        let top = viewport.height.saturating_sub(total) / 2;
        for (i, (text, style)) in lines.iter().enumerate() {
            self.center(fb, viewport, top + i as u16, text, *style);
        }
    }

    fn center(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        y: u16,
        text: &str,
        style: CellStyle,
    ) {
        let w = text.chars().count() as u16;
        let x = viewport.width.saturating_sub(w) / 2;
        fb.put_str(x, y, text, style);
    }
}
