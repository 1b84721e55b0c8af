use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TrySendError};

/// Periodic refresh driver: a background thread publishing tick instants.
///
/// The channel is bounded to one pending tick and filled with `try_send`, so
/// a consumer that falls behind coalesces missed ticks instead of replaying
/// a backlog of stale refreshes. The driver loop is expected to invalidate
/// its targets and refresh overlays once per received tick.
pub struct IntervalTicker {
    rx: Receiver<Instant>,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    pub fn start(interval: Duration) -> Self {
        let (tx, rx) = crossbeam_channel::bounded::<Instant>(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = std::thread::spawn(move || loop {
            std::thread::sleep(interval);
            if flag.load(Ordering::Relaxed) {
                break;
            }
            match tx.try_send(Instant::now()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {} // consumer is behind, coalesce
                Err(TrySendError::Disconnected(_)) => break,
            }
        });

        Self {
            rx,
            cancelled,
            handle: Some(handle),
        }
    }

    pub fn ticks(&self) -> &Receiver<Instant> {
        &self.rx
    }

    /// Signals the thread and waits for it to exit. The thread observes the
    /// flag after at most one interval of sleep.
    pub fn stop(mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}
