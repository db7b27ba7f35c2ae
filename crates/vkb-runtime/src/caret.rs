#![forbid(unsafe_code)]

//! Caret blink ticker.
//!
//! A background thread flips a shared visibility flag every period. The
//! event pump publishes the dialog's pin state each frame and reads
//! [`CaretBlink::show_caret`] when rendering. The dialog itself never
//! touches either flag.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Blink period of the on-screen caret.
pub const DEFAULT_BLINK_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct Flags {
    visible: AtomicBool,
    pinned: AtomicBool,
}

/// Stop flag the ticker waits on between toggles.
#[derive(Debug, Clone)]
struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    fn new() -> Self {
        Self {
            inner: Arc::new((Mutex::new(false), Condvar::new())),
        }
    }

    /// Block for `duration` or until stopped. Returns `true` if stopped.
    fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return true;
        }
        let (stopped, _) = cvar
            .wait_timeout(stopped, duration)
            .unwrap_or_else(PoisonError::into_inner);
        *stopped
    }

    fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }
}

/// Handle to a running blink thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct CaretBlink {
    flags: Arc<Flags>,
    stop: StopSignal,
    thread: Option<thread::JoinHandle<()>>,
}

impl CaretBlink {
    /// Spawn the ticker. The caret starts visible.
    pub fn start(period: Duration) -> io::Result<Self> {
        let flags = Arc::new(Flags {
            visible: AtomicBool::new(true),
            pinned: AtomicBool::new(false),
        });
        let stop = StopSignal::new();

        let thread = {
            let flags = Arc::clone(&flags);
            let stop = stop.clone();
            thread::Builder::new()
                .name("vkb-caret".into())
                .spawn(move || {
                    tracing::debug!(period_ms = period.as_millis() as u64, "caret blink started");
                    while !stop.wait_timeout(period) {
                        flags.visible.fetch_xor(true, Ordering::Relaxed);
                    }
                    tracing::debug!("caret blink stopped");
                })?
        };

        Ok(Self {
            flags,
            stop,
            thread: Some(thread),
        })
    }

    /// Keep the caret drawn while an edit is being repeated.
    pub fn set_pinned(&self, pinned: bool) {
        self.flags.pinned.store(pinned, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.flags.pinned.load(Ordering::Relaxed)
    }

    /// Whether the caret should be drawn this frame.
    #[must_use]
    pub fn show_caret(&self) -> bool {
        self.is_pinned() || self.flags.visible.load(Ordering::Relaxed)
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.stop.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CaretBlink {
    fn drop(&mut self) {
        self.stop.stop();
    }
}
