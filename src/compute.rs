/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::{Config, Size};
use crate::entities::{Assets, Background, Entity, GameState, Phase, Player, Rect};
use crate::spawn::{spawn_bonus, spawn_enemy, Timers};

/// Directions held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Player centered horizontally, `player_start_lift` above the bottom edge.
pub fn spawn_player(assets: &Assets, config: &Config) -> Player {
    let rect = Rect::centered_at(
        config.viewport.w / 2,
        config.viewport.h - config.player_start_lift,
        config.player_size,
    )
    .clamped_within(config.viewport);
    Player::new(assets.player_frames.clone(), rect, config.player_speed)
}

/// State shown on the start screen when the program launches.
pub fn init_state(assets: &Assets, config: &Config, high_score: u32) -> GameState {
    GameState {
        phase: Phase::Start,
        score: 0,
        high_score,
        player: spawn_player(assets, config),
        enemies: Vec::new(),
        bonuses: Vec::new(),
        background: Background::new(assets.background),
        timers: Timers::from_config(config),
        tick: 0,
        viewport: config.viewport,
    }
}

/// Fresh round: score zeroed, lists emptied, player re-centered, background
/// and timers rewound. Only the high score carries over.
pub fn reset(state: &GameState, assets: &Assets, config: &Config) -> GameState {
    GameState {
        phase: Phase::Playing,
        ..init_state(assets, config, state.high_score)
    }
}

// ── Movement (pure) ──────────────────────────────────────────────────────────

pub fn move_player(player: &Player, input: &TickInput, viewport: Size) -> Player {
    let step = player.body.speed;
    let dx = (input.right as i32 - input.left as i32) * step;
    let dy = (input.down as i32 - input.up as i32) * step;
    if dx == 0 && dy == 0 {
        return player.clone();
    }
    let rect = player.rect().translated(dx, dy).clamped_within(viewport);
    player.moved_to(rect)
}

// ── Per-frame tick (RNG injected) ──────────────────────────────────────────

/// Advance the simulation by one tick.  Does nothing outside `Playing`.
///
/// All randomness comes through `rng` so callers control determinism
/// (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameState,
    input: &TickInput,
    assets: &Assets,
    config: &Config,
    rng: &mut impl Rng,
) -> GameState {
    if state.phase != Phase::Playing {
        return state.clone();
    }
    let viewport = state.viewport;

    // ── 1. Timers: spawns and animation ──────────────────────────────────────
    let mut timers = state.timers.clone();
    let fired = timers.advance(config.tick_delta());

    let mut enemies = state.enemies.clone();
    for _ in 0..fired.enemies {
        enemies.push(spawn_enemy(assets.enemy, viewport, config.enemy_speed, rng));
    }
    let mut bonuses = state.bonuses.clone();
    for _ in 0..fired.bonuses {
        bonuses.push(spawn_bonus(assets.bonus, viewport, config.bonus_speed, rng));
    }
    let player = state.player.animated(fired.animation);

    // ── 2. Background scroll ─────────────────────────────────────────────────
    let background = state.background.scrolled(config.background_speed);

    // ── 3. Player movement ───────────────────────────────────────────────────
    let player = move_player(&player, input, viewport);
    let hitbox = player.rect();

    // ── 4. Enemies: move, cull, collide ──────────────────────────────────────
    let enemies: Vec<Entity> = enemies
        .iter()
        .map(Entity::advanced)
        .filter(|e| !e.has_exited(viewport))
        .collect();
    let hit = enemies.iter().any(|e| e.rect.overlaps(&hitbox));

    // ── 5. Bonuses: move, cull, collect ──────────────────────────────────────
    let (collected, bonuses): (Vec<Entity>, Vec<Entity>) = bonuses
        .iter()
        .map(Entity::advanced)
        .filter(|b| !b.has_exited(viewport))
        .partition(|b| b.rect.overlaps(&hitbox));
    let score = state.score + collected.len() as u32;

    // ── 6. Status ────────────────────────────────────────────────────────────
    let (phase, high_score) = if hit {
        (Phase::GameOver, state.high_score.max(score))
    } else {
        (Phase::Playing, state.high_score)
    };

    GameState {
        phase,
        score,
        high_score,
        player,
        enemies,
        bonuses,
        background,
        timers,
        tick: state.tick + 1,
        ..state.clone()
    }
}
