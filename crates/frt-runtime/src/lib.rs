//! Process bootstrap for the Fortran runtime support library.
//!
//! A compiled program's startup stub calls [`program_start`] (exported as
//! `_FortranAProgramStart`) exactly once, before any other runtime routine.
//! That call copies the invocation arguments and environment into a single
//! [`ExecutionEnvironment`], derives the [`RuntimeConfig`] from it and
//! publishes it process-wide. Everything else in the runtime reads that
//! state through [`environment`] or the C-ABI intrinsics in [`command`].
//!
//! Precondition violations (bad `argc`/`argv`, a second start, use before
//! start) print a diagnostic on stderr and abort the process.

#![allow(clippy::missing_safety_doc)]

#[macro_use]
mod trace;

mod boundary;
pub mod command;
pub mod config;
mod environment;
mod error;
mod fatal;
mod start;
mod state;

pub use config::{Conversion, RuntimeConfig};
pub use environment::{EnvironmentSource, ExecutionEnvironment};
pub use error::BootstrapError;
pub use start::program_start;
pub use state::{environment, try_environment};
