//! Session: the surface a host drives.
//!
//! The session owns every piece of simulation state.  Its tick timer runs on
//! a worker thread but only posts `SessionEvent::Tick` into the host's
//! channel; the host applies events one at a time on its own thread.

use std::sync::mpsc;

use log::{debug, info, trace};
use thiserror::Error;

use crate::compute::{advance, init_formation, init_ship, move_ship};
use crate::config::{ConfigError, GameConfig};
use crate::entities::{Enemy, Formation, Playfield, Ship, ShipInput, SweepDirection};
use crate::scheduler::TickScheduler;

/// Everything a host event loop may receive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Posted by the tick timer of the session started as `generation`.
    Tick { generation: u64 },
    /// A raw key name, e.g. `"ArrowLeft"`.
    Key(String),
    Restart,
    Quit,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to spawn tick timer: {0}")]
    SpawnTimer(#[source] std::io::Error),
}

pub struct Session {
    config: GameConfig,
    playfield: Playfield,
    ship: Ship,
    formation: Formation,
    scheduler: TickScheduler,
    active: bool,
    generation: u64,
    ticks: u64,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let playfield = config.playfield()?;
        Ok(Self {
            ship: init_ship(&playfield),
            formation: init_formation(&config.formation),
            scheduler: TickScheduler::new(config.tick_period()),
            playfield,
            config,
            active: false,
            generation: 0,
            ticks: 0,
        })
    }

    /// Lay out a fresh formation, put the ship back at the start, attach
    /// input and start the tick timer posting into `events`.
    ///
    /// Returns `Ok(false)` if the session was already active.
    pub fn start(&mut self, events: mpsc::Sender<SessionEvent>) -> Result<bool, SessionError> {
        if self.active {
            debug!("start ignored: session already active");
            return Ok(false);
        }

        // Nothing is committed until the timer is running, so a failed start
        // leaves the session exactly as it was.
        let generation = self.generation + 1;
        self.scheduler
            .restart(self.config.tick_period(), move || {
                // A closed channel means the host is gone.
                events.send(SessionEvent::Tick { generation }).is_ok()
            })
            .map_err(SessionError::SpawnTimer)?;

        self.generation = generation;
        self.ship = init_ship(&self.playfield);
        self.formation = init_formation(&self.config.formation);
        self.ticks = 0;
        self.active = true;
        info!(
            "session {} started: {} enemies, ship at {}",
            generation,
            self.formation.enemies.len(),
            self.ship.position
        );
        Ok(true)
    }

    /// Cancel the tick timer and detach input.  Returns `false` if the
    /// session was not active.
    pub fn stop(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.scheduler.stop();
        self.active = false;
        info!("session {} stopped after {} ticks", self.generation, self.ticks);
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Apply a timer tick.  Ticks from an earlier session, or that arrive
    /// after `stop`, are dropped.
    pub fn on_tick(&mut self, generation: u64) -> bool {
        if !self.active || generation != self.generation {
            trace!("dropping stale tick from session {}", generation);
            return false;
        }
        self.tick();
        true
    }

    /// Advance the formation by one step of `enemy_speed`.
    pub fn tick(&mut self) {
        let before = self.formation.direction;
        self.formation = advance(&self.formation, &self.playfield, self.config.enemy_speed);
        self.ticks += 1;
        if self.formation.direction != before {
            debug!(
                "formation reversed to {} on tick {}",
                self.formation.direction.as_str(),
                self.ticks
            );
        }
        trace!("tick {}", self.ticks);
    }

    /// Move the ship for an arrow key.  Other keys, and any key while the
    /// session is stopped, leave the ship where it is.
    pub fn handle_directional_input(&mut self, key: &str) -> i32 {
        if !self.active {
            return self.ship.position;
        }
        if let Some(input) = ShipInput::from_key(key) {
            self.ship = move_ship(&self.ship, &self.playfield, input, self.config.move_distance);
        }
        self.ship.position
    }

    pub fn ship_position(&self) -> i32 {
        self.ship.position
    }

    pub fn enemy_positions(&self) -> &[Enemy] {
        &self.formation.enemies
    }

    pub fn direction(&self) -> SweepDirection {
        self.formation.direction
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
