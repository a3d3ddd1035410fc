//! ZEET core - terminal splash animation engine
//!
//! - `coordinator` - lifecycle of one splash run (start, trigger, shutdown)
//! - `producers` - typewriter and spinner workers
//! - `render` - frame composition, wave offsets, terminal collaborators
//! - `state` - lock-guarded presentation record shared by the workers
//! - `supervisor` - named worker threads with bounded joins
//! - `progress` - boot progress bar shown before the splash

pub mod cancellation;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logo;
pub mod producers;
pub mod progress;
pub mod render;
pub mod state;
pub mod supervisor;

pub use cancellation::CancellationSignal;
pub use config::AnimationConfig;
pub use coordinator::{
    ChannelTrigger, PhaseWatch, ShutdownReport, SplashCoordinator, SplashPhase, StartTrigger,
    TriggerEvent,
};
pub use error::{AnimationError, Result};
pub use progress::{BootProgress, ProgressOutcome};
pub use render::{CrosstermTerminal, FixedWidth, TerminalWidth};
pub use supervisor::WorkerStatus;
