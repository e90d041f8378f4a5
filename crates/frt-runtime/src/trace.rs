use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_enabled(on: bool) {
    ENABLED.store(on, Ordering::Relaxed);
}

pub(crate) fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Bootstrap tracing on stderr, switched on by `FRT_TRACE`.
macro_rules! rt_trace {
    ($($arg:tt)*) => {
        if $crate::trace::enabled() {
            eprintln!("frt: {}", format_args!($($arg)*));
        }
    };
}
