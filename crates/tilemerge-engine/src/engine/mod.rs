//! Game engine logic and state management.
//!
//! This module builds the game on top of the core grid structures:
//!
//! - [`Board`] - Board state machine (move, finalize, spawn, undo/redo, reset)
//! - [`MovePlan`] / [`Motion`] - A computed move and its per-tile motion records
//! - [`TileSpawner`] - Seeded random tile placement following a [`SpawnPolicy`]
//! - [`GameSession`] - Frame-driven session with animation, win/game-over
//!   states and best score tracking
//! - [`GameStats`] - Per-game statistics
//!
//! # Game Flow
//!
//! 1. Create a [`Board`]; two tiles are spawned
//! 2. Request a move; the board computes the result and the tile motions
//! 3. Animate the motions, then finalize the move
//! 4. Spawn one new tile
//! 5. Repeat until no move changes the grid
//!
//! [`GameSession`] runs steps 2-4 frame by frame; [`Board::step`] runs them
//! at once.

pub use self::{best_score::*, board::*, move_plan::*, session::*, spawner::*, stats::*};

mod best_score;
mod board;
mod history;
mod move_plan;
mod session;
mod spawner;
mod stats;
