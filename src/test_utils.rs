//! Test helpers shared by unit and integration tests.
//!
//! Tests open with [`init_test_logging`] and a [`test_phase!`] marker,
//! assert with [`assert_with_log!`] so the expected and actual values land
//! in the log next to the failure, and close with [`test_complete!`].
//!
//! Log output is filtered through `RUST_LOG` (default `debug` for this
//! crate) and captured by the test harness.

use std::fmt::Debug;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "eventual_reduce=debug";

/// Installs the test subscriber once per process.
///
/// Safe to call from every test; later calls do nothing. A subscriber
/// installed elsewhere wins.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

#[doc(hidden)]
pub fn log_phase(name: &str) {
    tracing::info!(phase = name, "test phase started");
}

#[doc(hidden)]
pub fn log_complete(name: &str) {
    tracing::info!(test = name, "test completed");
}

#[doc(hidden)]
pub fn log_assertion(passed: bool, message: &str, expected: &dyn Debug, actual: &dyn Debug) {
    if passed {
        tracing::debug!(assertion = message, ?expected, ?actual, "assertion passed");
    } else {
        tracing::error!(assertion = message, ?expected, ?actual, "assertion failed");
    }
}

/// Logs the start of a named test phase.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        $crate::test_utils::log_phase($name)
    };
}

/// Logs the successful end of a test.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        $crate::test_utils::log_complete($name)
    };
}

/// Asserts `cond`, logging the expected and actual values either way.
///
/// ```
/// eventual_reduce::assert_with_log!(1 + 1 == 2, "arithmetic", 2, 1 + 1);
/// ```
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $message:expr, $expected:expr, $actual:expr $(,)?) => {{
        let passed: bool = $cond;
        let expected = &$expected;
        let actual = &$actual;
        $crate::test_utils::log_assertion(passed, $message, expected, actual);
        assert!(passed, "{}: expected {:?}, got {:?}", $message, expected, actual);
    }};
}
