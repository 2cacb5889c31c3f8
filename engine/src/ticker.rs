use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

/// A scoped repeating timer. The callback runs on a background thread every
/// `period` until the handle is stopped or dropped; releasing the handle joins
/// the thread, so no callback fires after release.
#[derive(Debug)]
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let observed = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            loop {
                thread::sleep(period);
                if observed.load(Ordering::SeqCst) {
                    break;
                }
                tick();
            }
        });
        debug!(period_ms = period.as_millis() as u64, "ticker started");
        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            // The thread re-checks the flag before every tick, so joining
            // waits at most one period.
            let _ = handle.join();
            debug!("ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.release();
    }
}
