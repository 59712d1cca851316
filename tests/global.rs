//! Tests for the free functions backed by the process-wide policy.
//!
//! All tests share the global policy, so each one holds `GLOBAL_LOCK` and
//! restores the settings it changed.

use std::{
    io,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Mutex, MutexGuard, PoisonError},
};

use errpolicy::{Config, DocumentationError, PanicReporter, sink::MemorySink};

static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
struct TestError(&'static str);

/// Routes global output into a buffer for the lifetime of the guard.
struct Capture {
    buffer: MemorySink,
    _lock: MutexGuard<'static, ()>,
}

impl Capture {
    fn new() -> Self {
        let lock = GLOBAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let buffer = MemorySink::new();
        let policy = errpolicy::global();
        policy.set_sink(Some(Box::new(buffer.clone())));
        policy.set_panic_on_warn(false);
        policy.set_show_location(false);
        policy.set_debug_show_location(false);
        policy.set_debug_sink(None);
        Self {
            buffer,
            _lock: lock,
        }
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        let policy = errpolicy::global();
        policy.set_panic_on_warn(false);
        policy.set_show_location(true);
        policy.set_debug_show_location(true);
        policy.set_debug_sink(None);
    }
}

#[test]
fn test_warn_scenario_disk_full() {
    let capture = Capture::new();

    assert!(!errpolicy::warn(Some(TestError("disk full"))));
    assert!(capture.buffer.contents().ends_with("disk full\n"));
}

#[test]
fn test_log_nil_leaves_buffer_unchanged() {
    let capture = Capture::new();

    assert!(errpolicy::log(None::<TestError>));
    assert!(errpolicy::warn(Ok::<(), TestError>(())));
    assert!(errpolicy::check(None::<TestError>));
    assert!(capture.buffer.is_empty());
}

#[test]
fn test_warn_without_sink_panics() {
    let _capture = Capture::new();
    let previous = errpolicy::global().set_sink(None);

    let payload = catch_unwind(|| {
        errpolicy::warn(Some(TestError("x")));
    })
    .expect_err("warn without a sink must panic");

    errpolicy::global().set_sink(previous);
    assert_eq!(
        payload.downcast_ref::<TestError>(),
        Some(&TestError("x"))
    );
}

#[test]
fn test_warn_write_failure_panics_with_io_error() {
    struct Refusing;

    impl io::Write for Refusing {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let _capture = Capture::new();
    let previous = errpolicy::global().set_sink(Some(Box::new(Refusing)));

    let payload = catch_unwind(|| {
        errpolicy::deprecated("use load_v2");
    })
    .expect_err("a failed write must panic");

    errpolicy::global().set_sink(previous);
    let err = payload
        .downcast_ref::<io::Error>()
        .expect("payload is the write error");
    assert_eq!(err.kind(), io::ErrorKind::StorageFull);
}

#[test]
fn test_log_without_sink_does_not_panic() {
    let _capture = Capture::new();
    let previous = errpolicy::global().set_sink(None);

    let logged = errpolicy::log(Some(TestError("x")));

    errpolicy::global().set_sink(previous);
    assert!(!logged);
}

#[test]
fn test_panic_on_warn_is_global() {
    let capture = Capture::new();
    errpolicy::global().set_panic_on_warn(true);

    let payload = catch_unwind(|| {
        errpolicy::todo("x");
    })
    .expect_err("todo must escalate with panic-on-warn");
    let err = payload
        .downcast_ref::<DocumentationError>()
        .expect("payload is the documentation error");
    assert_eq!(err.to_string(), "TODO: x");

    assert!(!errpolicy::log(Some(TestError("logged anyway"))));
    assert_eq!(capture.buffer.contents(), "logged anyway\n");
}

#[test]
fn test_panic_passes_error_through() {
    let _capture = Capture::new();

    errpolicy::panic(None::<TestError>);
    let payload = catch_unwind(|| errpolicy::panic(Some(TestError("TestPanic"))))
        .expect_err("panic must panic");
    assert_eq!(
        payload.downcast_ref::<TestError>(),
        Some(&TestError("TestPanic"))
    );
}

#[test]
fn test_documentation_suffixes() {
    let capture = Capture::new();
    errpolicy::global().set_show_location(true);

    errpolicy::todo("x");
    errpolicy::deprecated("x");

    let contents = capture.buffer.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("global.rs:"));
    assert!(lines[0].ends_with("TODO: x"));
    assert!(lines[1].ends_with("Deprecated: x"));
}

#[test]
fn test_issue_macro_reports_invocation_site() {
    let capture = Capture::new();
    errpolicy::global().set_show_location(true);

    let attempts = 3;
    let line = line!() + 1;
    errpolicy::issue!("retry loop gives up after {attempts} attempts");

    assert_eq!(
        capture.buffer.contents(),
        format!("global.rs:{line}: retry loop gives up after 3 attempts\n")
    );
}

#[test]
fn test_debug_follows_global_debug_sink() {
    let capture = Capture::new();
    let debug_buffer = MemorySink::new();

    errpolicy::debug("hidden");
    errpolicy::global().set_debug_sink(Some(Box::new(debug_buffer.clone())));
    errpolicy::debug(format_args!("{} items queued", 12));

    assert_eq!(debug_buffer.contents(), "12 items queued\n");
    assert!(capture.buffer.is_empty());
}

#[test]
fn test_test_reports_through_closure_and_panic_reporter() {
    let _capture = Capture::new();
    let mut failures = Vec::new();

    errpolicy::test(Some(TestError("TestTest")), &mut |err: TestError| {
        failures.push(err)
    });
    errpolicy::test(Ok::<(), TestError>(()), &mut PanicReporter);

    assert_eq!(failures, [TestError("TestTest")]);

    let result = catch_unwind(AssertUnwindSafe(|| {
        errpolicy::test(Some(TestError("broken")), &mut PanicReporter)
    }));
    assert!(result.is_err());
}

#[test]
fn test_install_after_first_use_fails() {
    let _capture = Capture::new();

    let err = Config::new()
        .panic_on_warn(true)
        .install()
        .expect_err("the global policy is already in use");
    assert_eq!(
        err.to_string(),
        "the global error policy is already installed"
    );
    assert!(err.0.panic_on_warn());
    assert!(!errpolicy::global().panic_on_warn());
}
