//! Rendering layer.
//!
//! The game never touches pixels: it asks a [`Surface`] to draw images and
//! text, and an [`AssetLoader`] to turn asset paths into [`Sprite`] handles.
//! The functions here only translate state into those calls.

pub mod terminal;

use std::io;
use std::path::{Path, PathBuf};

use crossterm::style::Color;
use thiserror::Error;

use crate::config::{Config, Size};
use crate::entities::{Assets, GameState, Phase, Rect, Sprite};

// ── Collaborator seams ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    Missing(PathBuf),
}

pub trait AssetLoader {
    /// Load the image at `path`, scaled to `size`.
    fn load(&mut self, path: &Path, size: Size) -> Result<Sprite, AssetError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Big,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub size: FontSize,
    pub color: Color,
}

/// Where a line of text goes, in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Top-left corner of the text.
    At { x: i32, y: i32 },
    /// Horizontally centered, top edge at `y`.
    Centered { y: i32 },
}

pub trait Surface {
    fn clear(&mut self) -> io::Result<()>;
    fn draw_image(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()>;
    fn draw_text(&mut self, text: &str, placement: Placement, style: TextStyle) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;
}

// ── Assets ────────────────────────────────────────────────────────────────────

pub fn background_path(config: &Config) -> PathBuf {
    config.assets_dir.join("background.png")
}

pub fn enemy_path(config: &Config) -> PathBuf {
    config.assets_dir.join("enemy.png")
}

pub fn bonus_path(config: &Config) -> PathBuf {
    config.assets_dir.join("bonus.png")
}

/// `goose1.png` … `gooseN.png`, in playback order.
pub fn player_frame_paths(config: &Config) -> Vec<PathBuf> {
    (1..=config.player_frames)
        .map(|i| config.assets_dir.join("goose").join(format!("goose{}.png", i)))
        .collect()
}

/// Load every image the game needs. The background is scaled to fill the
/// viewport; entities to their configured sizes.
pub fn load_assets<L: AssetLoader>(loader: &mut L, config: &Config) -> Result<Assets, AssetError> {
    let background = loader.load(&background_path(config), config.viewport)?;
    let enemy = loader.load(&enemy_path(config), config.enemy_size)?;
    let bonus = loader.load(&bonus_path(config), config.bonus_size)?;
    let player_frames = player_frame_paths(config)
        .iter()
        .map(|path| loader.load(path, config.player_size))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("Loaded {} player frames", player_frames.len());
    Ok(Assets {
        background,
        enemy,
        bonus,
        player_frames,
    })
}

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Green;
const C_GAME_OVER: Color = Color::Red;
const C_TEXT: Color = Color::White;
const C_HIGH: Color = Color::Green;
const C_SCORE: Color = Color::Red;

fn small(color: Color) -> TextStyle {
    TextStyle {
        size: FontSize::Small,
        color,
    }
}

fn big(color: Color) -> TextStyle {
    TextStyle {
        size: FontSize::Big,
        color,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whichever screen is active.
pub fn render<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    surface.clear()?;
    match state.phase {
        Phase::Start => draw_start_screen(surface, state)?,
        Phase::Playing => draw_gameplay(surface, state)?,
        Phase::GameOver => draw_game_over(surface, state)?,
    }
    surface.present()
}

fn draw_start_screen<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    let h = state.viewport.h;
    surface.draw_text("GOOSE GAME", Placement::Centered { y: h / 3 }, big(C_TITLE))?;
    surface.draw_text("Press ENTER to Start", Placement::Centered { y: h / 2 }, small(C_TEXT))?;
    surface.draw_text(
        "Use arrows to move, collect bonuses, avoid enemies",
        Placement::Centered { y: h / 2 + 40 },
        small(C_TEXT),
    )?;
    surface.draw_text(
        &format!("High Score: {}", state.high_score),
        Placement::Centered { y: h / 2 + 80 },
        small(C_HIGH),
    )
}

/// Background first, HUD last, so text is never covered.
fn draw_gameplay<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    let bg = &state.background;
    for x in bg.offsets {
        surface.draw_image(bg.sprite, bg.sprite.rect_at(x, 0))?;
    }

    surface.draw_image(state.player.sprite(), state.player.rect())?;

    for enemy in &state.enemies {
        surface.draw_image(enemy.sprite, enemy.rect)?;
    }
    for bonus in &state.bonuses {
        surface.draw_image(bonus.sprite, bonus.rect)?;
    }

    draw_hud(surface, state)
}

fn draw_hud<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    surface.draw_text(
        &state.score.to_string(),
        Placement::At {
            x: state.viewport.w - 50,
            y: 20,
        },
        small(C_SCORE),
    )?;
    surface.draw_text(
        &format!("High: {}", state.high_score),
        Placement::At { x: 20, y: 20 },
        small(C_HIGH),
    )
}

fn draw_game_over<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    let h = state.viewport.h;
    surface.draw_text("GAME OVER", Placement::Centered { y: h / 3 }, big(C_GAME_OVER))?;
    surface.draw_text(
        &format!("Your Score: {}", state.score),
        Placement::Centered { y: h / 2 },
        small(C_TEXT),
    )?;
    surface.draw_text(
        &format!("High Score: {}", state.high_score),
        Placement::Centered { y: h / 2 + 40 },
        small(C_HIGH),
    )?;
    surface.draw_text(
        "Press R to Restart or ESC to Quit",
        Placement::Centered { y: h / 2 + 80 },
        small(C_TEXT),
    )
}
