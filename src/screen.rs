//! Screen flow: Start → Playing → GameOver → Playing …
//!
//! [`transition`] is the pure phase table; [`Game`] owns one session and
//! applies it, running the gameplay tick and recording high scores.

use rand::Rng;

use crate::compute::{self, TickInput};
use crate::config::Config;
use crate::entities::{Assets, GameState, Phase};
use crate::highscore::HighscoreStore;

/// Discrete inputs that can change the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Enter on the start screen.
    Confirm,
    /// R on the game-over screen.
    Restart,
    /// Esc.
    Escape,
    /// Window close. Honoured in every phase.
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Reset the round and start playing.
    NewRound,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn transition(phase: Phase, command: Command) -> Transition {
    match (phase, command) {
        (_, Command::Close) => Transition::Exit,
        (Phase::Start, Command::Confirm) => Transition::NewRound,
        (Phase::GameOver, Command::Restart) => Transition::NewRound,
        (Phase::GameOver, Command::Escape) => Transition::Exit,
        _ => Transition::Stay,
    }
}

pub struct Game<R: Rng> {
    state: GameState,
    assets: Assets,
    config: Config,
    store: HighscoreStore,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(assets: Assets, config: Config, store: HighscoreStore, rng: R) -> Self {
        let state = compute::init_state(&assets, &config, store.best());
        Self {
            state,
            assets,
            config,
            store,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the whole state. Test hook for staging a position that
    /// play would take many ticks to reach.
    pub fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &HighscoreStore {
        &self.store
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match transition(self.state.phase, command) {
            Transition::Stay => Flow::Continue,
            Transition::NewRound => {
                log::info!("{:?} -> Playing (new round)", self.state.phase);
                self.state = compute::reset(&self.state, &self.assets, &self.config);
                Flow::Continue
            }
            Transition::Exit => {
                log::info!("Exit requested from {:?}", self.state.phase);
                Flow::Exit
            }
        }
    }

    /// Run one gameplay tick if a round is in progress.
    pub fn update(&mut self, input: &TickInput) {
        if self.state.phase != Phase::Playing {
            return;
        }
        let next = compute::tick(&self.state, input, &self.assets, &self.config, &mut self.rng);
        if next.phase == Phase::GameOver {
            self.finish_round(next);
        } else {
            self.state = next;
        }
    }

    fn finish_round(&mut self, mut state: GameState) {
        log::info!("Game over after {} ticks, score {}", state.tick, state.score);
        if let Err(e) = self.store.record(state.score) {
            log::warn!(
                "Could not save high score to {}: {}",
                self.store.path().display(),
                e
            );
        }
        state.high_score = state.high_score.max(self.store.best());
        self.state = state;
    }
}
