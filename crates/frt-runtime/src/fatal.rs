use std::io::Write as _;
use std::panic::AssertUnwindSafe;

use crate::error::BootstrapError;

/// Reports `err` on stderr and aborts.
///
/// Called only from C-ABI entry points; no runtime error channel exists yet
/// when bootstrap fails, so stderr is written directly.
pub(crate) fn crash(err: &BootstrapError) -> ! {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "\nfatal Fortran runtime error: {err}");
    let _ = stderr.flush();
    std::process::abort()
}

/// Runs the body of an exported routine. Errors and panics never cross the
/// C boundary: both end in [`crash`].
pub(crate) fn guard<T>(entry: &'static str, f: impl FnOnce() -> Result<T, BootstrapError>) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(v)) => v,
        Ok(Err(err)) => crash(&err),
        Err(_) => crash(&BootstrapError::Panicked { entry }),
    }
}
