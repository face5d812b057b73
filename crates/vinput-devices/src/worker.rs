//! Deferred-worker execution for a device controller.
//!
//! `inject` plays the fast top-half role: it enqueues bytes and rings a
//! doorbell. A dedicated thread plays the bottom half, draining the ring to
//! empty each time the doorbell fires. Wake-ups coalesce through a single
//! `pending` flag, so ringing the doorbell while a drain is in flight results
//! in at most one follow-up drain and never a second concurrent one.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use vinput_events::EventSink;

use crate::controller::{DeviceController, DeviceInjector, ProtocolDecoder};

#[derive(Debug, Default)]
struct DoorbellState {
    pending: bool,
    shutdown: bool,
}

#[derive(Debug, Default)]
struct Doorbell {
    state: Mutex<DoorbellState>,
    cv: Condvar,
}

enum Wake {
    Drain,
    Shutdown,
}

impl Doorbell {
    fn lock(&self) -> MutexGuard<'_, DoorbellState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn ring(&self) {
        self.lock().pending = true;
        self.cv.notify_one();
    }

    fn shutdown(&self) {
        self.lock().shutdown = true;
        self.cv.notify_one();
    }

    /// Blocks until there is work or a shutdown request. Shutdown wins when
    /// both are set; the caller flushes once more before exiting.
    fn wait(&self) -> Wake {
        let mut state = self.lock();
        loop {
            if state.shutdown {
                return Wake::Shutdown;
            }
            if state.pending {
                state.pending = false;
                return Wake::Drain;
            }
            state = match self.cv.wait(state) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
        }
    }
}

/// Owns the consumer thread for one device.
///
/// Dropping the worker signals shutdown, flushes bytes already accepted by
/// `inject`, and joins the thread, so no drain is in flight once the handle
/// is gone.
#[derive(Debug)]
pub struct DeviceWorker {
    injector: DeviceInjector,
    doorbell: Arc<Doorbell>,
    thread: Option<JoinHandle<()>>,
}

impl DeviceWorker {
    /// Moves `controller` and `sink` onto a dedicated consumer thread named
    /// after the device.
    pub fn spawn<D, S>(controller: DeviceController<D>, sink: S) -> std::io::Result<Self>
    where
        D: ProtocolDecoder + Send + 'static,
        S: EventSink + Send + 'static,
    {
        let injector = controller.injector();
        let doorbell = Arc::new(Doorbell::default());
        let worker_bell = Arc::clone(&doorbell);
        let thread = thread::Builder::new()
            .name(format!("vinput-{}", controller.name()))
            .spawn(move || run(controller, sink, worker_bell))?;
        Ok(Self {
            injector,
            doorbell,
            thread: Some(thread),
        })
    }

    /// Producer context: enqueue raw wire bytes and schedule a drain. Returns
    /// the number of bytes accepted.
    pub fn inject(&self, bytes: &[u8]) -> usize {
        let accepted = self.injector.inject(bytes);
        self.doorbell.ring();
        accepted
    }

    /// Bytes rejected so far because the ring was full.
    pub fn dropped_bytes(&self) -> u64 {
        self.injector.dropped_bytes()
    }
}

impl Drop for DeviceWorker {
    fn drop(&mut self) {
        self.doorbell.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run<D, S>(mut controller: DeviceController<D>, mut sink: S, doorbell: Arc<Doorbell>)
where
    D: ProtocolDecoder,
    S: EventSink,
{
    loop {
        match doorbell.wait() {
            Wake::Drain => {
                controller.drain_and_process(&mut sink);
            }
            Wake::Shutdown => {
                // Flush anything accepted before the shutdown signal so bytes
                // already buffered are decoded rather than lost.
                controller.drain_and_process(&mut sink);
                return;
            }
        }
    }
}
