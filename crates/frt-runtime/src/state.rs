use once_cell::sync::OnceCell;

use crate::environment::ExecutionEnvironment;
use crate::error::BootstrapError;
use crate::fatal;

static ENVIRONMENT: OnceCell<ExecutionEnvironment> = OnceCell::new();

/// Publishes the environment. Only the first call succeeds.
pub(crate) fn install(
    env: ExecutionEnvironment,
) -> Result<&'static ExecutionEnvironment, BootstrapError> {
    ENVIRONMENT
        .try_insert(env)
        .map_err(|_| BootstrapError::AlreadyStarted)
}

/// The environment for an exported routine named `entry`.
pub(crate) fn require(entry: &'static str) -> Result<&'static ExecutionEnvironment, BootstrapError> {
    ENVIRONMENT
        .get()
        .ok_or(BootstrapError::NotStarted { entry })
}

/// The process-wide environment, or `None` before `ProgramStart`.
pub fn try_environment() -> Option<&'static ExecutionEnvironment> {
    ENVIRONMENT.get()
}

/// The process-wide environment. Aborts the process if `ProgramStart` has
/// not run.
pub fn environment() -> &'static ExecutionEnvironment {
    match require("environment") {
        Ok(env) => env,
        Err(err) => fatal::crash(&err),
    }
}
