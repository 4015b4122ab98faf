/// crossterm backend: the 800×600 viewport scaled into terminal cells.
///
/// "Images" are small glyph grids chosen by asset file name and stretched
/// (nearest cell) over the sprite rectangle. Spaces are transparent.

use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};

use super::{AssetError, AssetLoader, FontSize, Placement, Surface, TextStyle};
use crate::config::Size;
use crate::entities::{Rect, Sprite};

// ── Glyph art ─────────────────────────────────────────────────────────────────

const BACKGROUND_ART: &[&str] = &[
    "      .                 *          .      ",
    "  .         ~~~~             .            ",
    "          ~~~~~~~                  ~~~    ",
    "   *                .        ~~~~~~~~     ",
    "              .                           ",
    "     ~~~                   *          .   ",
    "   ~~~~~~         .                       ",
    "                          ~~~~~           ",
    " .          *          ~~~~~~~~~      *   ",
    "                  .                       ",
    "  ,,    ,,,     ,,   ,,,,    ,,    ,,,    ",
    "__________________________________________",
];

const ENEMY_ART: &[&str] = &["<(@)", " /\\ "];

const BONUS_ART: &[&str] = &["[$]", "[$]"];

const GOOSE_ART: [&[&str]; 5] = [
    &["   __  ", "\\\\(o >", " \\__) "],
    &["   __  ", "==(o >", " \\__) "],
    &["   __  ", "//(o >", " \\__) "],
    &["   __  ", "==(o >", " \\__) "],
    &["   __  ", "\\\\(o >", " \\__/ "],
];

const C_BACKGROUND: Color = Color::DarkBlue;
const C_ENEMY: Color = Color::Red;
const C_BONUS: Color = Color::Yellow;
const C_GOOSE: Color = Color::White;

struct Art {
    cells: Vec<Vec<char>>,
    color: Color,
}

impl Art {
    fn new(rows: &[&str], color: Color) -> Self {
        Self {
            cells: rows.iter().map(|r| r.chars().collect()).collect(),
            color,
        }
    }

    /// Glyph at fractional position `(u, v)` in `[0, 1)`.
    fn sample(&self, u_num: i64, u_den: i64, v_num: i64, v_den: i64) -> char {
        let rows = self.cells.len() as i64;
        let Some(row) = self.cells.get((v_num * rows / v_den) as usize) else {
            return ' ';
        };
        let cols = row.len() as i64;
        row.get((u_num * cols / u_den) as usize).copied().unwrap_or(' ')
    }
}

/// Art for a known asset file name, `None` for anything else.
fn art_for(path: &Path) -> Option<Art> {
    let name = path.file_name()?.to_str()?;
    match name {
        "background.png" => Some(Art::new(BACKGROUND_ART, C_BACKGROUND)),
        "enemy.png" => Some(Art::new(ENEMY_ART, C_ENEMY)),
        "bonus.png" => Some(Art::new(BONUS_ART, C_BONUS)),
        _ => {
            let n: usize = name.strip_prefix("goose")?.strip_suffix(".png")?.parse().ok()?;
            let frame = n.checked_sub(1)? % GOOSE_ART.len();
            Some(Art::new(GOOSE_ART[frame], C_GOOSE))
        }
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    viewport: Size,
    arts: Vec<Art>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, viewport: Size) -> Self {
        Self {
            out,
            cols,
            rows,
            viewport,
            arts: Vec::new(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn col(&self, x: i32) -> i64 {
        (x as i64 * self.cols as i64).div_euclid(self.viewport.w.max(1) as i64)
    }

    fn row(&self, y: i32) -> i64 {
        (y as i64 * self.rows as i64).div_euclid(self.viewport.h.max(1) as i64)
    }
}

impl<W: Write> AssetLoader for TerminalSurface<W> {
    fn load(&mut self, path: &Path, size: Size) -> Result<Sprite, AssetError> {
        let art = art_for(path).ok_or_else(|| AssetError::Missing(path.to_path_buf()))?;
        self.arts.push(art);
        Ok(Sprite::new(self.arts.len() - 1, size))
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_image(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()> {
        let Some(art) = self.arts.get(sprite.id()) else {
            return Ok(());
        };

        let (c0, r0) = (self.col(rect.left()), self.row(rect.top()));
        let c1 = self.col(rect.right()).max(c0 + 1);
        let r1 = self.row(rect.bottom()).max(r0 + 1);

        self.out.queue(style::SetForegroundColor(art.color))?;
        for r in r0.max(0)..r1.min(self.rows as i64) {
            for c in c0.max(0)..c1.min(self.cols as i64) {
                let glyph = art.sample(c - c0, c1 - c0, r - r0, r1 - r0);
                if glyph == ' ' {
                    continue;
                }
                self.out.queue(cursor::MoveTo(c as u16, r as u16))?;
                self.out.queue(Print(glyph))?;
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, placement: Placement, text_style: TextStyle) -> io::Result<()> {
        let text: String = match text_style.size {
            FontSize::Small => text.to_string(),
            // Letter-spaced stands in for a larger font.
            FontSize::Big => text.chars().flat_map(|c| [c, ' ']).collect::<String>().trim_end().to_string(),
        };
        let width = text.chars().count() as i64;

        let (col, row) = match placement {
            Placement::At { x, y } => (self.col(x), self.row(y)),
            Placement::Centered { y } => ((self.cols as i64 - width) / 2, self.row(y)),
        };
        if row < 0 || row >= self.rows as i64 {
            return Ok(());
        }
        let col = col.clamp(0, self.cols.saturating_sub(1) as i64);
        let visible: String = text.chars().take((self.cols as i64 - col).max(0) as usize).collect();

        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(text_style.color))?;
        if text_style.size == FontSize::Big {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        self.out.queue(Print(visible))?;
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
