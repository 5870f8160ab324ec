//! Synchronous and asynchronous delivery of rendered lines
//!
//! In sync mode the caller's thread fans a line out to every sink. In async
//! mode lines go through a bounded queue drained by a fixed pool of worker
//! threads; a full queue blocks the producer rather than dropping records.

use super::{
    config::Config,
    error::{LoggerError, Result},
    metrics::LoggerMetrics,
    sink::{panic_message, SinkSet},
};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Barrier};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Used when an async logger is dropped without explicit shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// How records travel from the logging call to the sinks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchMode {
    /// The calling thread writes to every sink before returning
    #[default]
    Sync,
    /// Records are queued and written by background workers
    Async,
}

enum Task {
    Line(String),
    Flush(Arc<Barrier>),
}

struct Worker {
    receiver: Receiver<Task>,
    sinks: Arc<SinkSet>,
}

impl Worker {
    fn run(self) {
        let Self { receiver, sinks } = self;

        while let Ok(task) = receiver.recv() {
            match task {
                Task::Line(line) => sinks.deliver(&line),
                // Parks this worker until every worker and the flushing
                // caller have reached the barrier
                Task::Flush(barrier) => {
                    barrier.wait();
                }
            }

            if receiver.is_empty() {
                sinks.flush();
            }
        }
    }
}

struct State {
    sender: Sender<Task>,
    workers: Vec<JoinHandle<()>>,
}

pub(crate) struct AsyncDispatcher {
    state: Option<State>,
    sinks: Arc<SinkSet>,
    metrics: Arc<LoggerMetrics>,
    /// Serializes flushes so barrier tokens of two flushes never interleave
    flush_lock: Mutex<()>,
}

impl AsyncDispatcher {
    fn start(config: &Config, sinks: Arc<SinkSet>, metrics: Arc<LoggerMetrics>) -> Result<Self> {
        let thread_count = config.effective_thread_count();
        let (sender, receiver) = bounded(config.async_queue_size);

        let mut workers = Vec::with_capacity(thread_count);
        for idx in 0..thread_count {
            let worker = Worker {
                receiver: receiver.clone(),
                sinks: Arc::clone(&sinks),
            };
            let handle = thread::Builder::new()
                .name(format!("kvalog-worker-{}", idx))
                .spawn(move || worker.run())
                .map_err(|e| {
                    LoggerError::io_operation(
                        "spawning async worker",
                        format!("worker {} of {} could not start", idx + 1, thread_count),
                        e,
                    )
                })?;
            workers.push(handle);
        }

        Ok(Self {
            state: Some(State { sender, workers }),
            sinks,
            metrics,
            flush_lock: Mutex::new(()),
        })
    }

    fn send(&self, line: String) {
        let Some(ref state) = self.state else {
            // Workers are gone after shutdown; write inline instead of losing the record
            self.sinks.deliver(&line);
            return;
        };

        match state.sender.try_send(Task::Line(line)) {
            Ok(()) => {}
            Err(TrySendError::Full(task)) => {
                // Back-pressure: wait for a worker to free a slot
                self.metrics.record_block();
                if state.sender.send(task).is_err() {
                    eprintln!("[LOGGER ERROR] {}", LoggerError::ChannelSendError);
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                eprintln!("[LOGGER ERROR] {}", LoggerError::ChannelSendError);
            }
        }
    }

    fn flush(&self) {
        let _guard = self.flush_lock.lock();

        if let Some(ref state) = self.state {
            // One token per worker: each worker parks on the barrier after
            // finishing everything it dequeued before its token, so once the
            // barrier opens every earlier record has been handed to the sinks.
            let barrier = Arc::new(Barrier::new(state.workers.len() + 1));
            for _ in 0..state.workers.len() {
                if state.sender.send(Task::Flush(Arc::clone(&barrier))).is_err() {
                    eprintln!("[LOGGER ERROR] {}", LoggerError::ChannelSendError);
                    return;
                }
            }
            barrier.wait();
        }

        self.sinks.flush();
    }

    fn shutdown(&mut self, timeout: Duration) -> bool {
        let Some(State { sender, workers }) = self.state.take() else {
            return true;
        };

        // Workers leave their loop once the queue is drained and closed
        drop(sender);

        let start = Instant::now();
        let mut clean = true;

        for handle in workers {
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Async worker thread panicked during shutdown: {}",
                            panic_message(&e)
                        );
                        clean = false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Async worker thread did not finish within {:?} timeout. \
                         Some logs may be lost.",
                        timeout
                    );
                    return false;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        self.sinks.flush();
        clean
    }
}

impl Drop for AsyncDispatcher {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

/// The delivery engine owned by one logger
pub(crate) enum Dispatcher {
    Sync(Arc<SinkSet>),
    Async(AsyncDispatcher),
}

impl Dispatcher {
    pub(crate) fn new(
        config: &Config,
        sinks: Arc<SinkSet>,
        metrics: Arc<LoggerMetrics>,
    ) -> Result<Self> {
        match config.mode {
            DispatchMode::Sync => Ok(Dispatcher::Sync(sinks)),
            DispatchMode::Async => Ok(Dispatcher::Async(AsyncDispatcher::start(
                config, sinks, metrics,
            )?)),
        }
    }

    pub(crate) fn mode(&self) -> DispatchMode {
        match self {
            Dispatcher::Sync(_) => DispatchMode::Sync,
            Dispatcher::Async(_) => DispatchMode::Async,
        }
    }

    pub(crate) fn dispatch(&self, line: String) {
        match self {
            Dispatcher::Sync(sinks) => sinks.deliver(&line),
            Dispatcher::Async(dispatcher) => dispatcher.send(line),
        }
    }

    /// Block until every record dispatched before this call reached the sinks,
    /// then flush sink buffers
    pub(crate) fn flush(&self) {
        match self {
            Dispatcher::Sync(sinks) => sinks.flush(),
            Dispatcher::Async(dispatcher) => dispatcher.flush(),
        }
    }

    pub(crate) fn shutdown(&mut self, timeout: Duration) -> bool {
        match self {
            Dispatcher::Sync(sinks) => {
                sinks.flush();
                true
            }
            Dispatcher::Async(dispatcher) => dispatcher.shutdown(timeout),
        }
    }
}
