//! Goose Game: dodge enemies, catch bonuses, beat the high score.
//!
//! - `entities`: geometry, sprites, entities and the whole `GameState`
//! - `spawn`: interval timers and enemy/bonus factories
//! - `compute`: the pure per-tick gameplay step
//! - `screen`: Start / Playing / GameOver flow for one session
//! - `highscore`: the persisted best score
//! - `display`: rendering seams and the terminal backend
//! - `config`: every tunable constant

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod highscore;
pub mod screen;
pub mod spawn;
