//! ZEET - Efficient Exam Terminal
//!
//! Boot progress bar, then the animated splash until Enter (or Ctrl-C).

mod cli;
mod logging;
mod settings;
mod trigger;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use zeet_core::{BootProgress, SplashCoordinator, TriggerEvent};

use crate::cli::Cli;
use crate::settings::Settings;

/// Worker threads are named `zeet-<role>` by the supervisor
fn is_worker_thread(name: Option<&str>) -> bool {
    name.is_some_and(|name| name.starts_with("zeet-"))
}

/// Keep worker panics off the screen. The supervisor already logs them and
/// winds the splash down, so the hook stays silent for those threads.
/// Panics anywhere else still go through the default hook.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if !is_worker_thread(std::thread::current().name()) {
            default_hook(info);
        }
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = logging::init_logging(cli.log_file.as_deref(), cli.verbose);
    install_panic_hook();

    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_cli(&cli);

    let config = settings.splash.to_config();
    config.validate().context("Invalid splash settings")?;
    let user = settings.user.handle();

    tracing::info!(user = %user, log = ?log_path, "ZEET starting");

    let mut stdout = io::stdout();
    if settings.boot.enabled {
        BootProgress::new("Initializing modules...", settings.boot.duration()?)
            .with_completion_message(format!("ZEET accessed. Welcome, {user}."))
            .run(&mut stdout)
            .context("Boot sequence failed")?;
    }

    let mut trigger = trigger::stdin_trigger()?;
    let report = SplashCoordinator::new(config, io::stdout())
        .run(&mut trigger)
        .context("Splash failed to start")?;
    tracing::debug!(?report, "Splash report");

    if report.trigger == TriggerEvent::Interrupt {
        println!("Interrupted. Bye.");
    } else {
        println!("ZEET shutting down. glfyt ✨");
    }
    Ok(())
}
