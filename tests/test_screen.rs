use goose_game::compute::TickInput;
use goose_game::config::{Config, Size};
use goose_game::entities::*;
use goose_game::highscore::HighscoreStore;
use goose_game::screen::*;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::{tempdir, TempDir};

fn make_assets() -> Assets {
    Assets {
        background: Sprite::new(0, Size::new(800, 600)),
        enemy: Sprite::new(1, Size::new(60, 40)),
        bonus: Sprite::new(2, Size::new(40, 40)),
        player_frames: (3..8).map(|id| Sprite::new(id, Size::new(100, 60))).collect(),
    }
}

/// A game whose high score file lives in a fresh temp dir.
fn make_game(stored: Option<&str>) -> (Game<StdRng>, TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.txt");
    if let Some(text) = stored {
        std::fs::write(&path, text).unwrap();
    }
    let config = Config {
        highscore_file: path.clone(),
        ..Config::default()
    };
    let game = Game::new(
        make_assets(),
        config,
        HighscoreStore::open(path),
        StdRng::seed_from_u64(42),
    );
    (game, dir)
}

fn doomed_enemy() -> Entity {
    Entity {
        kind: EntityKind::Enemy,
        sprite: make_assets().enemy,
        rect: Rect::new(360, 510, 60, 40),
        speed: 5,
    }
}

// ── transition table ──────────────────────────────────────────────────────────

#[test]
fn close_exits_from_every_phase() {
    for phase in [Phase::Start, Phase::Playing, Phase::GameOver] {
        assert_eq!(transition(phase, Command::Close), Transition::Exit);
    }
}

#[test]
fn start_only_reacts_to_confirm() {
    assert_eq!(transition(Phase::Start, Command::Confirm), Transition::NewRound);
    assert_eq!(transition(Phase::Start, Command::Restart), Transition::Stay);
    assert_eq!(transition(Phase::Start, Command::Escape), Transition::Stay);
}

#[test]
fn playing_ignores_menu_keys() {
    for command in [Command::Confirm, Command::Restart, Command::Escape] {
        assert_eq!(transition(Phase::Playing, command), Transition::Stay);
    }
}

#[test]
fn game_over_restarts_or_quits() {
    assert_eq!(transition(Phase::GameOver, Command::Restart), Transition::NewRound);
    assert_eq!(transition(Phase::GameOver, Command::Escape), Transition::Exit);
    assert_eq!(transition(Phase::GameOver, Command::Confirm), Transition::Stay);
}

// ── Game session ──────────────────────────────────────────────────────────────

#[test]
fn new_game_shows_stored_high_score() {
    let (game, _dir) = make_game(Some("12"));
    assert_eq!(game.phase(), Phase::Start);
    assert_eq!(game.state().high_score, 12);
}

#[test]
fn start_screen_does_not_tick() {
    let (mut game, _dir) = make_game(None);
    game.update(&TickInput::default());
    assert_eq!(game.state().tick, 0);
    assert_eq!(game.state().background.offsets, [0, 800]);
}

#[test]
fn confirm_starts_a_round() {
    let (mut game, _dir) = make_game(None);
    assert_eq!(game.handle(Command::Confirm), Flow::Continue);
    assert_eq!(game.phase(), Phase::Playing);
    game.update(&TickInput::default());
    assert_eq!(game.state().tick, 1);
}

#[test]
fn escape_does_not_leave_a_round() {
    let (mut game, _dir) = make_game(None);
    game.handle(Command::Confirm);
    assert_eq!(game.handle(Command::Escape), Flow::Continue);
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn close_exits_mid_round() {
    let (mut game, _dir) = make_game(None);
    game.handle(Command::Confirm);
    assert_eq!(game.handle(Command::Close), Flow::Exit);
}

#[test]
fn collision_ends_round_and_saves_record() {
    let (mut game, dir) = make_game(Some("3"));
    game.handle(Command::Confirm);

    // Simulate a scoring round that then hits an enemy.
    let mut state = game.state().clone();
    state.score = 7;
    state.enemies.push(doomed_enemy());
    game.set_state(state);

    game.update(&TickInput::default());
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.state().high_score, 7);
    assert_eq!(game.store().best(), 7);
    let saved = std::fs::read_to_string(dir.path().join("highscore.txt")).unwrap();
    assert_eq!(saved, "7");
}

#[test]
fn worse_round_leaves_record_alone() {
    let (mut game, dir) = make_game(Some("7"));
    game.handle(Command::Confirm);
    let mut state = game.state().clone();
    state.score = 3;
    state.enemies.push(doomed_enemy());
    game.set_state(state);

    game.update(&TickInput::default());
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.state().high_score, 7);
    let saved = std::fs::read_to_string(dir.path().join("highscore.txt")).unwrap();
    assert_eq!(saved, "7");
}

#[test]
fn restart_after_game_over_resets_round() {
    let (mut game, _dir) = make_game(None);
    game.handle(Command::Confirm);
    let mut state = game.state().clone();
    state.score = 2;
    state.enemies.push(doomed_enemy());
    game.set_state(state);
    game.update(&TickInput::default());
    assert_eq!(game.phase(), Phase::GameOver);

    // Frozen until the player acts
    let frozen_tick = game.state().tick;
    game.update(&TickInput::default());
    assert_eq!(game.state().tick, frozen_tick);

    assert_eq!(game.handle(Command::Restart), Flow::Continue);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.state().score, 0);
    assert_eq!(game.state().high_score, 2);
    assert!(game.state().enemies.is_empty());
    assert_eq!(game.state().player.rect(), Rect::new(350, 500, 100, 60));
}

#[test]
fn escape_quits_from_game_over() {
    let (mut game, _dir) = make_game(None);
    game.handle(Command::Confirm);
    let mut state = game.state().clone();
    state.enemies.push(doomed_enemy());
    game.set_state(state);
    game.update(&TickInput::default());
    assert_eq!(game.handle(Command::Escape), Flow::Exit);
}
