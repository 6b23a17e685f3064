//! QShip, a terminal shoot-em-up.
//!
//! - `entities`, `spawner`, `collision`, `compute`: the per-frame simulation
//! - `session`: title screen / playing / game-over state machine
//! - `seed`: the one-off measurement that parameterises random ranges
//! - `present`, `display`, `input`: terminal front end behind narrow traits
//! - `clock`, `config`, `error`: plumbing

pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod events;
pub mod input;
pub mod present;
pub mod seed;
pub mod session;
pub mod spawner;

pub use config::GameConfig;
pub use error::{ConfigError, GameError, SeedError};
pub use session::{Flow, Phase, Session};
