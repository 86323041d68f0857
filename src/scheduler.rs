//! Fixed-period tick timer
//!
//! A `TickScheduler` owns at most one worker thread.  The worker sleeps on a
//! cancel channel until the next deadline and calls its callback each time
//! the wait times out, so cancellation interrupts the wait at once.
//! Deadlines advance by whole periods, so callback time does not drift the
//! tick rate.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};

struct Worker {
    cancel: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

pub struct TickScheduler {
    period: Duration,
    stack_size: Option<usize>,
    worker: Option<Worker>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            stack_size: None,
            worker: None,
        }
    }

    /// Stack size of the worker thread, in bytes.
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// True while a worker is installed.  A worker whose callback returned
    /// `false` still counts until `stop` reaps it.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Install a worker calling `on_tick` once per period.  The worker exits
    /// when stopped or when `on_tick` returns `false`.
    ///
    /// Returns `Ok(false)` without touching the running worker if one is
    /// already installed.
    pub fn start<F>(&mut self, mut on_tick: F) -> io::Result<bool>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        if self.worker.is_some() {
            debug!("tick scheduler already running");
            return Ok(false);
        }

        let period = self.period;
        let (cancel, cancelled) = mpsc::channel::<()>();
        let mut builder = thread::Builder::new().name("tick-scheduler".into());
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }
        let handle = builder.spawn(move || {
            let mut deadline = Instant::now() + period;
            loop {
                let wait = deadline.saturating_duration_since(Instant::now());
                match cancelled.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {
                        if !on_tick() {
                            break;
                        }
                        deadline = next_deadline(deadline, period, Instant::now());
                    }
                    // Cancelled, or the scheduler was dropped without stop.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        })?;

        debug!("tick scheduler started, period {:?}", period);
        self.worker = Some(Worker { cancel, handle });
        Ok(true)
    }

    /// Cancel the worker and wait for it to exit.  Returns `false` if nothing
    /// was running.
    pub fn stop(&mut self) -> bool {
        let Some(worker) = self.worker.take() else {
            return false;
        };
        // Send fails only if the worker already exited on its own.
        let _ = worker.cancel.send(());
        if worker.handle.join().is_err() {
            warn!("tick callback panicked");
        }
        debug!("tick scheduler stopped");
        true
    }

    /// Replace the running worker.  The old one is fully stopped before the
    /// new one is spawned, so two workers never overlap.
    pub fn restart<F>(&mut self, period: Duration, on_tick: F) -> io::Result<bool>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        self.stop();
        self.period = period;
        self.start(on_tick)
    }
}

/// Deadline after the one just served.  Ticks that fell behind `now` are
/// skipped rather than fired back to back.
fn next_deadline(deadline: Instant, period: Duration, now: Instant) -> Instant {
    let next = deadline + period;
    if next > now {
        next
    } else {
        now + period
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
