use std::ffi::{c_char, c_int};

use crate::environment::ExecutionEnvironment;
use crate::error::BootstrapError;
use crate::{fatal, state, trace};

/// Runtime bootstrap, called once by the compiled program's startup stub
/// before any other runtime routine.
///
/// `argv` holds `argc` C strings (the slot at `argv[argc]` is not read).
/// `envp` is a null-terminated list of `KEY=VALUE` strings; a null `envp`
/// makes the runtime copy the live process environment instead. Nothing
/// passed in is retained after return.
///
/// Aborts with a diagnostic on a negative `argc`, a null `argv` with
/// nonzero `argc`, a null argument, or a second call.
#[export_name = "_FortranAProgramStart"]
pub unsafe extern "C" fn program_start(
    argc: c_int,
    argv: *const *const c_char,
    envp: *const *const c_char,
) {
    fatal::guard("ProgramStart", || start(argc, argv, envp).map(|_| ()))
}

unsafe fn start(
    argc: c_int,
    argv: *const *const c_char,
    envp: *const *const c_char,
) -> Result<&'static ExecutionEnvironment, BootstrapError> {
    if state::try_environment().is_some() {
        return Err(BootstrapError::AlreadyStarted);
    }

    let env = state::install(ExecutionEnvironment::from_raw(argc, argv, envp)?)?;

    trace::set_enabled(env.config().trace);
    rt_trace!(
        "ProgramStart: {} argument(s), {} variable(s) ({})",
        env.arguments().len(),
        env.variables().count(),
        env.source().as_str()
    );
    rt_trace!("ProgramStart: {:?}", env.config());
    Ok(env)
}
