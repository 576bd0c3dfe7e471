//! Terminal rendering.  All screen output lives here.
//!
//! `GlyphAtlas` stands in for an asset pipeline: it hands out texture
//! handles sized like the original sprites and remembers which glyph each
//! one is drawn with.  `TerminalRenderer` maps world pixels onto terminal
//! cells and queues crossterm commands; nothing is written until `present`.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use star_catcher::collaborators::{AssetLoader, Renderer};
use star_catcher::entities::{TextStyle, TextureRef, Vec2};
use star_catcher::error::{GameError, GameResult};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_LEDGE: Color = Color::Green;
const C_STAR: Color = Color::Yellow;
const C_BOMB: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Asset table ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
enum Glyph {
    Backdrop,
    Ledge,
    Star,
    Bomb,
    Dude,
}

/// Known image assets and their pixel size.
const IMAGES: &[(&str, Glyph, f32, f32)] = &[
    ("sky", Glyph::Backdrop, 800.0, 600.0),
    ("ground", Glyph::Ledge, 400.0, 32.0),
    ("star", Glyph::Star, 24.0, 22.0),
    ("bomb", Glyph::Bomb, 14.0, 14.0),
];

const SHEETS: &[(&str, Glyph)] = &[("dude", Glyph::Dude)];

#[derive(Clone, Debug, Default)]
pub struct GlyphAtlas {
    entries: Vec<(String, Glyph, TextureRef)>,
}

impl GlyphAtlas {
    fn insert(&mut self, name: &str, glyph: Glyph, width: f32, height: f32) -> TextureRef {
        if let Some((_, _, texture)) = self.entries.iter().find(|(n, _, _)| n == name) {
            return *texture;
        }
        let texture = TextureRef {
            id: self.entries.len(),
            width,
            height,
        };
        self.entries.push((name.to_string(), glyph, texture));
        texture
    }

    fn glyph(&self, texture: TextureRef) -> Option<Glyph> {
        self.entries.get(texture.id).map(|(_, glyph, _)| *glyph)
    }
}

impl AssetLoader for GlyphAtlas {
    fn load(&mut self, name: &str, path: &str) -> GameResult<TextureRef> {
        let (_, glyph, width, height) = IMAGES
            .iter()
            .find(|(n, ..)| *n == name)
            .ok_or_else(|| GameError::MissingAsset {
                name: format!("{} ({})", name, path),
            })?;
        Ok(self.insert(name, *glyph, *width, *height))
    }

    fn load_spritesheet(
        &mut self,
        name: &str,
        path: &str,
        frame_width: u32,
        frame_height: u32,
    ) -> GameResult<TextureRef> {
        let (_, glyph) = SHEETS
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| GameError::MissingAsset {
                name: format!("{} ({})", name, path),
            })?;
        Ok(self.insert(name, *glyph, frame_width as f32, frame_height as f32))
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    atlas: GlyphAtlas,
    cols: u16,
    rows: u16,
    world: Vec2,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16, world: Vec2) -> Self {
        Self {
            out,
            atlas: GlyphAtlas::default(),
            cols,
            rows,
            world,
        }
    }

    /// The asset loader sessions are built against.
    pub fn atlas_mut(&mut self) -> &mut GlyphAtlas {
        &mut self.atlas
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Clear the screen and draw the play-area frame.
    pub fn begin_frame(&mut self) -> GameResult<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()
    }

    // Play area: columns 1..cols-1, rows 1..rows-2 (row rows-2 is the
    // bottom border, row rows-1 the controls hint).
    fn inner_width(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_height(&self) -> f32 {
        self.rows.saturating_sub(3).max(1) as f32
    }

    fn to_cell(&self, pos: Vec2) -> (u16, u16) {
        let col = (pos.x / self.world.x * self.inner_width()).floor();
        let row = (pos.y / self.world.y * self.inner_height()).floor();
        let col = col.clamp(0.0, self.inner_width() - 1.0) as u16 + 1;
        let row = row.clamp(0.0, self.inner_height() - 1.0) as u16 + 1;
        (col, row)
    }

    fn cells_wide(&self, pixels: f32) -> u16 {
        ((pixels / self.world.x * self.inner_width()).round() as u16).max(1)
    }

    fn draw_border(&mut self) -> GameResult<()> {
        let w = self.cols as usize;
        let bottom = self.rows.saturating_sub(2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;
        for row in 1..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_ledge(&mut self, pos: Vec2, width: f32) -> GameResult<()> {
        let cells = self.cells_wide(width);
        let (centre, row) = self.to_cell(pos);
        let first = centre.saturating_sub(cells / 2).max(1);
        let last = (first + cells).min(self.cols.saturating_sub(1));
        self.out.queue(cursor::MoveTo(first, row))?;
        self.out.queue(style::SetForegroundColor(C_LEDGE))?;
        self.out
            .queue(Print("▀".repeat(last.saturating_sub(first) as usize)))?;
        Ok(())
    }

    fn put(&mut self, pos: Vec2, color: Color, text: &str) -> GameResult<()> {
        let (col, row) = self.to_cell(pos);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    // ── Overlays ──────────────────────────────────────────────────────────────

    pub fn draw_controls_hint(&mut self) -> GameResult<()> {
        self.out
            .queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out
            .queue(Print("← → / A D : Move   ↑ / W / SPACE : Jump   Q : Quit"))?;
        Ok(())
    }

    pub fn draw_frozen(&mut self, score: u32, best: u32) -> GameResult<()> {
        let score_line = format!("Final Score: {:>4}", score);
        let best_line = if score >= best && score > 0 {
            format!("★ NEW BEST: {:>4} ★", score)
        } else {
            format!("Best Score:  {:>4}", best.max(score))
        };
        let lines: [(&str, Color); 6] = [
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            (best_line.as_str(), Color::DarkGrey),
            ("R - Play Again  Q - Quit", Color::White),
        ];

        let cx = self.cols / 2;
        let start_row = (self.rows / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (msg, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(col, start_row + i as u16))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(*msg))?;
        }
        Ok(())
    }
}

fn rgb(value: u32) -> Color {
    Color::Rgb {
        r: (value >> 16 & 0xff) as u8,
        g: (value >> 8 & 0xff) as u8,
        b: (value & 0xff) as u8,
    }
}

/// Head and body glyphs for a frame of the 9-frame player sheet.
fn dude_glyphs(frame: u32) -> (&'static str, &'static str) {
    match frame {
        0..=3 => ("◀", if frame % 2 == 0 { "/" } else { "|" }),
        5..=8 => ("▶", if frame % 2 == 0 { "\\" } else { "|" }),
        _ => ("☻", "Λ"),
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw_image(&mut self, pos: Vec2, texture: TextureRef, scale: f32) -> GameResult<()> {
        match self.atlas.glyph(texture) {
            // The terminal background already is the sky.
            Some(Glyph::Backdrop) | None => Ok(()),
            Some(Glyph::Ledge) => self.draw_ledge(pos, texture.width * scale),
            Some(Glyph::Star) => self.put(pos, C_STAR, "★"),
            Some(Glyph::Bomb) => self.put(pos, C_BOMB, "●"),
            Some(Glyph::Dude) => self.put(pos, C_PLAYER, "☻"),
        }
    }

    fn draw_sprite(
        &mut self,
        pos: Vec2,
        texture: TextureRef,
        frame: u32,
        tint: Option<u32>,
    ) -> GameResult<()> {
        let color = tint.map(rgb).unwrap_or(C_PLAYER);
        let (head, body) = dude_glyphs(frame);
        let quarter = texture.height / 4.0;
        self.put(Vec2::new(pos.x, pos.y - quarter), color, head)?;
        self.put(Vec2::new(pos.x, pos.y + quarter), color, body)
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, style: &TextStyle) -> GameResult<()> {
        // Black on a dark terminal is unreadable; fall back to the HUD colour.
        let color = if style.fill == 0 { C_HUD } else { rgb(style.fill) };
        self.put(pos, color, text)
    }

    fn present(&mut self) -> GameResult<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
