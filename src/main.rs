mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::thread_rng;
use thiserror::Error;

use sweep_shooter::autopilot::Autopilot;
use sweep_shooter::{ConfigError, GameConfig, Session, SessionError, SessionEvent};

/// Environment variable naming the file log output is written to.  The
/// terminal is in raw alternate-screen mode, so logs never go to stderr.
const LOG_FILE_ENV_VAR: &str = "SWEEP_LOG_FILE";

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

fn init_logging() {
    let log_file = std::env::var_os(LOG_FILE_ENV_VAR).and_then(|path| File::create(path).ok());
    let default_filter = if log_file.is_some() { "info" } else { "off" };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(file) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
}

// ── Input mapping ─────────────────────────────────────────────────────────────

/// Translate a terminal event into a session event.  Arrow keys and A/D are
/// reported under the arrow key names the session understands.
fn translate(event: Event) -> Option<SessionEvent> {
    let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
        return None;
    };
    if kind == KeyEventKind::Release {
        return None;
    }
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(SessionEvent::Key("ArrowLeft".to_string()))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(SessionEvent::Key("ArrowRight".to_string()))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(SessionEvent::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(SessionEvent::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(SessionEvent::Quit)
        }
        _ => None,
    }
}

// ── Event loop ────────────────────────────────────────────────────────────────

/// Apply events in arrival order until the player quits.
fn event_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    tx: &mpsc::Sender<SessionEvent>,
    rx: &mpsc::Receiver<SessionEvent>,
) -> Result<(), AppError> {
    let mut rng = thread_rng();
    let mut autopilot = session.config().demo.then(Autopilot::new);

    session.start(tx.clone())?;
    display::render(out, session)?;

    while let Ok(event) = rx.recv() {
        match event {
            SessionEvent::Tick { generation } => {
                if session.on_tick(generation) {
                    if let Some(key) = autopilot.as_mut().and_then(|a| a.next_key(&mut rng)) {
                        session.handle_directional_input(key);
                    }
                }
            }
            SessionEvent::Key(key) => {
                session.handle_directional_input(&key);
            }
            SessionEvent::Restart => {
                session.stop();
                session.start(tx.clone())?;
            }
            SessionEvent::Quit => break,
        }
        display::render(out, session)?;
    }

    session.stop();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    init_logging();

    let config = GameConfig::from_env().map_err(|e| {
        error!("{e}");
        e
    })?;
    let mut session = Session::new(config)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Timer ticks and terminal input share one channel, so the loop below is
    // the only place session state changes.
    let (tx, rx) = mpsc::channel::<SessionEvent>();
    let input_tx = tx.clone();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if let Some(ev) = translate(ev) {
                    if input_tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
            }
            Err(_) => break,
        }
    });

    let result = event_loop(&mut out, &mut session, &tx, &rx);

    // Always restore the terminal
    session.stop();
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match &result {
        Ok(()) => info!("exited cleanly"),
        Err(e) => error!("{e}"),
    }
    result
}
