//! Sweep Shooter - a ship on a fixed track and an enemy formation that
//! sweeps side to side across the playfield.
//!
//! Core modules:
//! - `entities`: pure data (playfield, ship, enemies, directions)
//! - `compute`: pure state transitions
//! - `scheduler`: fixed-period tick timer
//! - `session`: the surface a host drives (start/stop, input, snapshots)

pub mod autopilot;
pub mod compute;
pub mod config;
pub mod entities;
pub mod scheduler;
pub mod session;

pub use config::{ConfigError, FormationLayout, GameConfig};
pub use session::{Session, SessionError, SessionEvent};
