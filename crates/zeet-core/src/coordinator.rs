//! Splash coordinator
//!
//! Lifecycle: `Idle -> Running -> Stopping -> Stopped`.
//!
//! Starts the typewriter, spinner and renderer, blocks on the start
//! trigger, then cancels and joins every worker with a bounded timeout.
//! The screen is cleared as the last step no matter how the joins went.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use flume::RecvTimeoutError;
use parking_lot::Mutex;

use crate::cancellation::CancellationSignal;
use crate::config::AnimationConfig;
use crate::error::Result;
use crate::producers::{Spinner, Typewriter};
use crate::render::{clear_screen, CrosstermTerminal, FrameRenderer, TerminalWidth};
use crate::state::PresentationState;
use crate::supervisor::{JoinOutcome, SupervisedWorker, WorkerStatus};

/// Coordinator lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    Idle,
    Running,
    Stopping,
    Stopped,
}

/// Shared view of a coordinator's phase.
///
/// Stays valid after `run` takes the coordinator, so callers on other
/// threads can follow the lifecycle.
#[derive(Debug, Clone)]
pub struct PhaseWatch(Arc<Mutex<SplashPhase>>);

impl PhaseWatch {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(SplashPhase::Idle)))
    }

    pub fn get(&self) -> SplashPhase {
        *self.0.lock()
    }

    fn set(&self, next: SplashPhase) -> SplashPhase {
        std::mem::replace(&mut *self.0.lock(), next)
    }
}

/// What ended the running phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The user asked to begin (Enter)
    Start,
    /// Keyboard interrupt
    Interrupt,
    /// Cancellation was requested first, by a failed worker or an
    /// external holder of the signal
    Cancelled,
}

/// Blocking source of the single "begin" event.
///
/// Implementations must return promptly once `cancel` is requested so a
/// crashed worker does not leave the coordinator waiting on input.
pub trait StartTrigger {
    fn wait(&mut self, cancel: &CancellationSignal) -> TriggerEvent;
}

const TRIGGER_POLL: Duration = Duration::from_millis(25);

/// Trigger fed by a channel; senders may be an input thread, a signal
/// handler, or both
pub struct ChannelTrigger {
    events: flume::Receiver<TriggerEvent>,
}

impl ChannelTrigger {
    pub fn new(events: flume::Receiver<TriggerEvent>) -> Self {
        Self { events }
    }

    /// Create a trigger together with the sender that fires it
    pub fn channel() -> (flume::Sender<TriggerEvent>, Self) {
        let (tx, rx) = flume::unbounded();
        (tx, Self::new(rx))
    }
}

impl StartTrigger for ChannelTrigger {
    fn wait(&mut self, cancel: &CancellationSignal) -> TriggerEvent {
        loop {
            if cancel.is_requested() {
                return TriggerEvent::Cancelled;
            }
            match self.events.recv_timeout(TRIGGER_POLL) {
                Ok(event) => return event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("All trigger senders dropped, starting immediately");
                    return TriggerEvent::Start;
                }
            }
        }
    }
}

/// Diagnostic summary of one splash run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    pub trigger: TriggerEvent,
    pub typewriter: WorkerStatus,
    pub spinner: WorkerStatus,
    pub renderer: WorkerStatus,
    /// Frames written, when the renderer exited cleanly
    pub frames_rendered: Option<u64>,
}

/// Runs one splash animation against a terminal sink
pub struct SplashCoordinator<S> {
    config: AnimationConfig,
    sink: Arc<Mutex<S>>,
    width: Box<dyn TerminalWidth + Send>,
    cancel: CancellationSignal,
    phase: PhaseWatch,
}

impl<S: Write + Send + 'static> SplashCoordinator<S> {
    pub fn new(config: AnimationConfig, sink: S) -> Self {
        Self {
            config,
            sink: Arc::new(Mutex::new(sink)),
            width: Box::new(CrosstermTerminal),
            cancel: CancellationSignal::new(),
            phase: PhaseWatch::new(),
        }
    }

    /// Use a different terminal width source (fixed widths for pipes and tests)
    pub fn with_width(mut self, width: Box<dyn TerminalWidth + Send>) -> Self {
        self.width = width;
        self
    }

    pub fn phase(&self) -> SplashPhase {
        self.phase.get()
    }

    /// Handle for observing the phase while `run` is in progress
    pub fn phase_watch(&self) -> PhaseWatch {
        self.phase.clone()
    }

    /// Handle for stopping the splash from elsewhere; requesting twice is a no-op
    pub fn cancellation(&self) -> CancellationSignal {
        self.cancel.clone()
    }

    /// Shared handle to the output sink
    pub fn sink(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.sink)
    }

    fn transition(&self, next: SplashPhase) {
        let from = self.phase.set(next);
        tracing::debug!(?from, to = ?next, "Splash phase change");
    }

    /// Run the splash until the trigger fires, then shut everything down.
    ///
    /// Only configuration errors are returned, and only before any worker
    /// has started. Everything after that is logged and reported.
    pub fn run(mut self, trigger: &mut dyn StartTrigger) -> Result<ShutdownReport> {
        self.config.validate()?;

        let state = Arc::new(PresentationState::new());
        let join_timeout = self.config.join_timeout;
        self.transition(SplashPhase::Running);

        let typewriter = {
            let typewriter =
                Typewriter::new(self.config.target_text.clone(), self.config.type_interval);
            let (state, cancel) = (Arc::clone(&state), self.cancel.clone());
            self.start_worker("typewriter", move || {
                typewriter.run(&state, &cancel);
                Ok(())
            })
        };

        let spinner = {
            let spinner =
                Spinner::new(self.config.spinner_glyphs.clone(), self.config.spinner_interval);
            let (state, cancel) = (Arc::clone(&state), self.cancel.clone());
            self.start_worker("spinner", move || {
                spinner.run(&state, &cancel);
                Ok(())
            })
        };

        let renderer = {
            let width = std::mem::replace(&mut self.width, Box::new(CrosstermTerminal));
            let mut renderer = FrameRenderer::new(&self.config, width);
            let (state, sink, cancel) = (
                Arc::clone(&state),
                Arc::clone(&self.sink),
                self.cancel.clone(),
            );
            self.start_worker("renderer", move || Ok(renderer.run(&state, &sink, &cancel)?))
        };

        let trigger_event = if self.cancel.is_requested() {
            TriggerEvent::Cancelled
        } else {
            trigger.wait(&self.cancel)
        };
        tracing::info!(trigger = ?trigger_event, "Splash trigger received");

        self.transition(SplashPhase::Stopping);
        self.cancel.request();

        let typewriter = join_worker(typewriter, join_timeout);
        let spinner = join_worker(spinner, join_timeout);
        let renderer = join_worker(renderer, join_timeout);

        let frames_rendered = match &renderer {
            Some(JoinOutcome::Finished(frames)) => Some(*frames),
            _ => None,
        };
        let report = ShutdownReport {
            trigger: trigger_event,
            typewriter: worker_status(&typewriter),
            spinner: worker_status(&spinner),
            renderer: worker_status(&renderer),
            frames_rendered,
        };

        self.clear_terminal(join_timeout);
        self.transition(SplashPhase::Stopped);

        tracing::info!(
            typewriter = %report.typewriter,
            spinner = %report.spinner,
            renderer = %report.renderer,
            frames = ?report.frames_rendered,
            "Splash stopped"
        );
        Ok(report)
    }

    fn start_worker<T, F>(&self, name: &str, body: F) -> Option<SupervisedWorker<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        match SupervisedWorker::spawn(name, self.cancel.clone(), body) {
            Ok(worker) => Some(worker),
            Err(e) => {
                tracing::error!(worker = name, error = %e, "Failed to start worker");
                self.cancel.request();
                None
            }
        }
    }

    /// Clear the screen, waiting up to `wait` for an abandoned renderer
    /// to release the sink
    fn clear_terminal(&self, wait: Duration) {
        let Some(mut out) = self.sink.try_lock_for(wait) else {
            tracing::warn!("Terminal sink still busy, skipping final clear");
            return;
        };
        if let Err(e) = clear_screen(&mut *out) {
            tracing::warn!(error = %e, "Failed to clear terminal");
        }
    }
}

fn join_worker<T: Send + 'static>(
    worker: Option<SupervisedWorker<T>>,
    timeout: Duration,
) -> Option<JoinOutcome<T>> {
    worker.map(|w| w.join_timeout(timeout))
}

fn worker_status<T>(outcome: &Option<JoinOutcome<T>>) -> WorkerStatus {
    outcome
        .as_ref()
        .map_or(WorkerStatus::NotStarted, JoinOutcome::status)
}
