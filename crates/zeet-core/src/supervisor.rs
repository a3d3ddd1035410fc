//! Supervised workers - spawn, signal, join with a deadline, abandon on timeout
//!
//! A worker reports its exit on a channel instead of relying on
//! `JoinHandle::join`, which cannot time out. Panics and errors inside
//! the worker are caught on its own thread and turned into a
//! cancellation request, so one failing worker winds the whole group down
//! without taking the caller with it.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use flume::RecvTimeoutError;

use crate::cancellation::CancellationSignal;
use crate::error::{AnimationError, Result};

/// How a worker ended, as seen by the supervisor
#[derive(Debug)]
pub enum JoinOutcome<T> {
    /// Returned normally within the deadline
    Finished(T),
    /// Returned an error
    Failed(AnimationError),
    /// Panicked; carries the panic message
    Panicked(String),
    /// Did not report back in time and was left running detached
    TimedOut,
}

/// Payload-free summary of a [`JoinOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    Finished,
    Failed,
    Panicked,
    TimedOut,
    NotStarted,
}

impl<T> JoinOutcome<T> {
    pub fn status(&self) -> WorkerStatus {
        match self {
            JoinOutcome::Finished(_) => WorkerStatus::Finished,
            JoinOutcome::Failed(_) => WorkerStatus::Failed,
            JoinOutcome::Panicked(_) => WorkerStatus::Panicked,
            JoinOutcome::TimedOut => WorkerStatus::TimedOut,
        }
    }
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerStatus::Finished => write!(f, "finished"),
            WorkerStatus::Failed => write!(f, "failed"),
            WorkerStatus::Panicked => write!(f, "panicked"),
            WorkerStatus::TimedOut => write!(f, "timed out"),
            WorkerStatus::NotStarted => write!(f, "not started"),
        }
    }
}

enum WorkerExit<T> {
    Returned(Result<T>),
    Panicked(String),
}

/// A named worker thread with a bounded join
pub struct SupervisedWorker<T> {
    name: String,
    done: flume::Receiver<WorkerExit<T>>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> SupervisedWorker<T> {
    /// Start `body` on its own thread.
    ///
    /// If the body fails or panics, `cancel` is requested so the other
    /// workers and the coordinator move on to shutdown.
    pub fn spawn<F>(name: &str, cancel: CancellationSignal, body: F) -> Result<Self>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (tx, rx) = flume::bounded(1);
        let worker_name = name.to_string();

        let handle = thread::Builder::new()
            .name(format!("zeet-{name}"))
            .spawn(move || {
                tracing::debug!(worker = %worker_name, "Worker started");
                let exit = match panic::catch_unwind(AssertUnwindSafe(body)) {
                    Ok(Ok(value)) => WorkerExit::Returned(Ok(value)),
                    Ok(Err(e)) => {
                        tracing::warn!(worker = %worker_name, error = %e, "Worker failed");
                        cancel.request();
                        WorkerExit::Returned(Err(e))
                    }
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        tracing::error!(worker = %worker_name, panic = %message, "Worker panicked");
                        cancel.request();
                        WorkerExit::Panicked(message)
                    }
                };
                // Supervisor may already have given up on us
                let _ = tx.send(exit);
            })?;

        Ok(Self {
            name: name.to_string(),
            done: rx,
            handle: Some(handle),
        })
    }

    /// Wait up to `timeout` for the worker to finish.
    ///
    /// A worker that misses the deadline is abandoned: its thread is
    /// detached and keeps running until it next observes cancellation.
    pub fn join_timeout(mut self, timeout: Duration) -> JoinOutcome<T> {
        match self.done.recv_timeout(timeout) {
            Ok(exit) => {
                if let Some(handle) = self.handle.take() {
                    // Already reported, so this only waits for thread teardown
                    let _ = handle.join();
                }
                match exit {
                    WorkerExit::Returned(Ok(value)) => JoinOutcome::Finished(value),
                    WorkerExit::Returned(Err(e)) => JoinOutcome::Failed(e),
                    WorkerExit::Panicked(message) => JoinOutcome::Panicked(message),
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    worker = %self.name,
                    timeout_ms = timeout.as_millis() as u64,
                    "Worker did not stop in time, abandoning it"
                );
                JoinOutcome::TimedOut
            }
            Err(RecvTimeoutError::Disconnected) => {
                if let Some(handle) = self.handle.take() {
                    let _ = handle.join();
                }
                JoinOutcome::Panicked(String::from("worker exited without reporting"))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("non-string panic payload")
    }
}
