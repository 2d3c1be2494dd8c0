//! Cooperative interrupt handling.
//!
//! When installed, the first interrupt (Ctrl-C) does not kill the process.
//! It only asks the run to stop before the next test, so the test in progress
//! can finish and the partial results still get reported. A second interrupt
//! terminates the process right away with status 130.
//!
//! Without the handler, an interrupt follows the default signal behavior.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Result;

static INTERRUPTS: AtomicUsize = AtomicUsize::new(0);
static INSTALLED_AT: AtomicUsize = AtomicUsize::new(0);

/// Exit status used when a second interrupt aborts the run.
pub const ABORT_STATUS: i32 = 130;

/// Ask the current run to stop, exactly like a first interrupt would.
pub fn request_stop() {
    INTERRUPTS.fetch_add(1, Ordering::SeqCst);
}

/// Number of interrupts seen since the process started.
pub fn interrupt_count() -> usize {
    INTERRUPTS.load(Ordering::SeqCst)
}

/// Observes interrupts that arrive after it was created.
#[derive(Debug, Clone, Copy)]
pub struct StopSignal {
    source: &'static AtomicUsize,
    baseline: usize,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::watching(&INTERRUPTS)
    }

    /// Observe increments of `source` instead of the process interrupts.
    pub fn watching(source: &'static AtomicUsize) -> Self {
        Self {
            source,
            baseline: source.load(Ordering::SeqCst),
        }
    }

    pub fn is_raised(&self) -> bool {
        self.source.load(Ordering::SeqCst) > self.baseline
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
extern "C" fn on_interrupt(_: libc::c_int) {
    let previous = INTERRUPTS.fetch_add(1, Ordering::SeqCst);
    if previous > INSTALLED_AT.load(Ordering::SeqCst) {
        // SAFETY: `_exit` is async-signal-safe.
        unsafe { libc::_exit(ABORT_STATUS) };
    }
}

/// Install the handler for `SIGINT`.
#[cfg(unix)]
pub fn install() -> Result<()> {
    INSTALLED_AT.store(interrupt_count(), Ordering::SeqCst);
    let handler = on_interrupt as extern "C" fn(libc::c_int);
    // SAFETY: the handler only touches an atomic and calls `_exit`.
    let previous = unsafe { libc::signal(libc::SIGINT, handler as libc::sighandler_t) };
    if previous == libc::SIG_ERR {
        return Err(crate::Error::Interrupt(std::io::Error::last_os_error()));
    }
    tracing::debug!("installed interrupt handler");
    Ok(())
}

#[cfg(not(unix))]
pub fn install() -> Result<()> {
    tracing::warn!("cooperative interrupt handling is not supported on this platform");
    Ok(())
}
