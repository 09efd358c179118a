use std::io;
use std::time::Instant;

use crate::config::Config;
use crate::error::SetupError;
use crate::event_loop::{self, replay_geometry, LoopExit};
use crate::lock::{auth, LockMachine};
use crate::saver::Saver;
use crate::session::{Session, SignalFlags};

/// Run the screensaver around the user's shell.
///
/// Returns the shell's exit code, or its terminating signal number.
pub fn run(config: &Config) -> Result<i32, SetupError> {
    let authenticator = if config.saver.password_check {
        Some(auth::from_config(&config.auth)?)
    } else {
        None
    };
    let signals = SignalFlags::register()?;
    let mut session = Session::acquire()?;

    let fixed = (config.saver.replay_rows, config.saver.replay_cols);
    let machine = LockMachine::new(
        authenticator,
        auth::current_identity(),
        config.auth.service.clone(),
    );
    let saver = Saver::new(
        &config.saver,
        machine,
        replay_geometry(fixed.0, fixed.1),
        Instant::now(),
    );
    // cursor and alternate screen come back on every way out, panics included
    let mut saver = scopeguard::guard(saver, |mut saver| {
        if let Err(e) = saver.finish(&mut io::stdout()) {
            tracing::warn!("restoring display failed: {}", e);
        }
    });

    tracing::info!(
        interval = ?config.saver.interval(),
        restore = ?config.saver.restore,
        password_check = config.saver.password_check,
        "screensaver armed"
    );
    let exit = match event_loop::open_input() {
        Ok(input) => event_loop::run(
            &mut session,
            input,
            &mut io::stdout().lock(),
            &mut saver,
            &signals,
            fixed,
        ),
        Err(e) => LoopExit::Error(e),
    };
    drop(saver);

    match exit {
        LoopExit::ChildExited => {}
        LoopExit::Terminated => {
            tracing::info!("termination requested");
            session.kill_child();
        }
        LoopExit::Error(e) => {
            tracing::error!("event loop failed: {}", e);
            session.kill_child();
        }
    }
    Ok(session.wait_for_exit())
}
