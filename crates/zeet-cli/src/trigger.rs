//! Start trigger wiring: Enter on stdin, or Ctrl-C
//!
//! The splash treats a keyboard interrupt the same as Enter. Stdin EOF and
//! read errors also count as Enter so a closed input can never hang the
//! splash.

use std::io::{self, BufRead};
use std::thread;

use anyhow::{Context, Result};
use zeet_core::{ChannelTrigger, TriggerEvent};

/// Build a trigger fed by a stdin reader thread and a Ctrl-C handler
pub fn stdin_trigger() -> Result<ChannelTrigger> {
    let (tx, trigger) = ChannelTrigger::channel();

    let interrupt_tx = tx.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.send(TriggerEvent::Interrupt);
    })
    .context("Failed to install Ctrl-C handler")?;

    // Left detached: after the splash nothing else reads stdin
    thread::Builder::new()
        .name("stdin-trigger".to_string())
        .spawn(move || {
            let mut line = String::new();
            match io::stdin().lock().read_line(&mut line) {
                Ok(0) => tracing::debug!("Stdin closed, starting"),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Stdin read failed, starting"),
            }
            let _ = tx.send(TriggerEvent::Start);
        })
        .context("Failed to spawn stdin reader")?;

    Ok(trigger)
}
