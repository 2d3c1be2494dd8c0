//! Per test output capture.
//!
//! Rust offers no way to redirect the process stdout and stderr for a single
//! test, so tests that want their output buffered print through the macros of
//! this module ([`print!`](crate::print), [`println!`](crate::println),
//! [`eprint!`](crate::eprint), [`eprintln!`](crate::eprintln) and
//! [`dbg!`](crate::dbg)). While the runner buffers, they write into a
//! thread local capture that is attached to the test outcome. Otherwise they
//! forward to the real streams.
//!
//! The panic hook installed by [`CapturePanicHookGuard`] keeps panics from
//! printing over the report and remembers where the last panic happened, so
//! the failure message can point at it.

use std::{
    cell::{Cell, RefCell},
    fmt,
    io::{self, Write},
    marker::PhantomData,
    mem,
    panic::{self, PanicHookInfo},
    sync::{Arc, Mutex, PoisonError},
    thread,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TestOutputCapture {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl TestOutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }

    pub fn clear(&mut self) {
        self.stdout.clear();
        self.stderr.clear();
    }

    pub fn take(&mut self) -> Self {
        let stdout = mem::take(&mut self.stdout);
        let stderr = mem::take(&mut self.stderr);
        Self { stdout, stderr }
    }
}

#[derive(Debug, Default)]
struct CaptureState {
    buffering: bool,
    output: TestOutputCapture,
    panic_location: Option<String>,
}

thread_local! {
    static TEST_OUTPUT_CAPTURE: RefCell<CaptureState> = RefCell::new(CaptureState::default());
}

/// Start capturing for the next test on this thread.
pub fn begin(buffering: bool) {
    TEST_OUTPUT_CAPTURE.with_borrow_mut(|capture| {
        capture.buffering = buffering;
        capture.output.clear();
        capture.panic_location = None;
    });
}

/// Stop capturing and hand out what was captured since [`begin`].
pub fn finish() -> TestOutputCapture {
    TEST_OUTPUT_CAPTURE.with_borrow_mut(|capture| {
        capture.buffering = false;
        capture.output.take()
    })
}

pub(crate) fn take_panic_location() -> Option<String> {
    TEST_OUTPUT_CAPTURE
        .try_with(|capture| {
            capture
                .try_borrow_mut()
                .ok()
                .and_then(|mut capture| capture.panic_location.take())
        })
        .ok()
        .flatten()
}

fn is_buffering() -> bool {
    TEST_OUTPUT_CAPTURE.with_borrow(|capture| capture.buffering)
}

#[doc(hidden)]
pub fn write_stdout(args: fmt::Arguments<'_>) {
    match is_buffering() {
        true => {
            let text = fmt::format(args);
            TEST_OUTPUT_CAPTURE.with_borrow_mut(|capture| {
                capture.output.stdout.extend_from_slice(text.as_bytes())
            });
        }
        false => {
            let _ = io::stdout().write_fmt(args);
        }
    }
}

#[doc(hidden)]
pub fn write_stderr(args: fmt::Arguments<'_>) {
    match is_buffering() {
        true => {
            let text = fmt::format(args);
            TEST_OUTPUT_CAPTURE.with_borrow_mut(|capture| {
                capture.output.stderr.extend_from_slice(text.as_bytes())
            });
        }
        false => {
            let _ = io::stderr().write_fmt(args);
        }
    }
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

struct HookState {
    guards: usize,
    previous: Option<Arc<PanicHook>>,
}

static PANIC_HOOK: Mutex<HookState> = Mutex::new(HookState {
    guards: 0,
    previous: None,
});

thread_local! {
    static RUN_GUARDS: Cell<usize> = const { Cell::new(0) };
}

fn record_panic_location(panic_hook_info: &PanicHookInfo<'_>) {
    let location = panic_hook_info.location().map(|location| location.to_string());
    let _ = TEST_OUTPUT_CAPTURE.try_with(|capture| {
        if let Ok(mut capture) = capture.try_borrow_mut() {
            capture.panic_location = location;
        }
    });
}

/// Replaces the panic hook for the duration of a run.
///
/// Guards may overlap across threads. The first one installs the capture
/// hook and the last one restores the hook that was set before. Panics on
/// threads that are not inside a run still reach that previous hook.
pub struct CapturePanicHookGuard {
    _not_send: PhantomData<*const ()>,
}

impl CapturePanicHookGuard {
    pub fn install() -> Self {
        let mut state = PANIC_HOOK.lock().unwrap_or_else(PoisonError::into_inner);
        if state.guards == 0 {
            let previous = Arc::new(panic::take_hook());
            let fallback = Arc::clone(&previous);
            panic::set_hook(Box::new(move |panic_hook_info| {
                match RUN_GUARDS.try_with(Cell::get).unwrap_or(0) {
                    0 => (**fallback)(panic_hook_info),
                    _ => record_panic_location(panic_hook_info),
                }
            }));
            state.previous = Some(previous);
        }
        state.guards += 1;
        RUN_GUARDS.set(RUN_GUARDS.get() + 1);

        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for CapturePanicHookGuard {
    fn drop(&mut self) {
        RUN_GUARDS.set(RUN_GUARDS.get().saturating_sub(1));

        let mut state = PANIC_HOOK.lock().unwrap_or_else(PoisonError::into_inner);
        state.guards = state.guards.saturating_sub(1);
        // the hook cannot be changed while unwinding
        if state.guards > 0 || thread::panicking() {
            return;
        }

        drop(panic::take_hook());
        match state.previous.take().map(Arc::try_unwrap) {
            Some(Ok(previous)) => panic::set_hook(previous),
            Some(Err(previous)) => panic::set_hook(Box::new(move |info| (**previous)(info))),
            None => (),
        }
    }
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::capture::write_stdout(::std::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! println {
    () => {
        $crate::capture::write_stdout(::std::format_args!("\n"))
    };
    ($($arg:tt)*) => {{
        $crate::capture::write_stdout(::std::format_args!($($arg)*));
        $crate::capture::write_stdout(::std::format_args!("\n"));
    }};
}

#[macro_export]
macro_rules! eprint {
    ($($arg:tt)*) => {
        $crate::capture::write_stderr(::std::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! eprintln {
    () => {
        $crate::capture::write_stderr(::std::format_args!("\n"))
    };
    ($($arg:tt)*) => {{
        $crate::capture::write_stderr(::std::format_args!($($arg)*));
        $crate::capture::write_stderr(::std::format_args!("\n"));
    }};
}

#[macro_export]
macro_rules! dbg {
    () => {
        $crate::eprintln!("[{}:{}:{}]", ::std::file!(), ::std::line!(), ::std::column!())
    };
    ($val:expr $(,)?) => {
        match $val {
            tmp => {
                $crate::eprintln!(
                    "[{}:{}:{}] {} = {:#?}",
                    ::std::file!(),
                    ::std::line!(),
                    ::std::column!(),
                    ::std::stringify!($val),
                    &&tmp as &dyn ::std::fmt::Debug,
                );
                tmp
            }
        }
    };
    ($($val:expr),+ $(,)?) => {
        ($($crate::dbg!($val)),+,)
    };
}
