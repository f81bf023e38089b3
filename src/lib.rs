//! Pixel Shooter: simulation core of a single-player arcade shooter.
//!
//! - `entities`: plain data for everything on screen
//! - `config`: tuning tables and arena geometry
//! - `compute`: the per-frame systems and the `Session` that runs them
//! - `error`: configuration failures
//!
//! Rendering and input are left to the caller, which feeds a `TickInput` into
//! `Session::update` each frame and draws from `Session::snapshot`.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;

pub use compute::{Session, Snapshot, TickInput};
pub use config::GameConfig;
pub use error::ConfigError;
