use std::fmt;

/// A precondition the startup stub or compiled program failed to meet.
///
/// None of these are recoverable: the runtime reports them and aborts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    NegativeArgumentCount(i32),
    NullArgumentVector { argc: usize },
    NullArgument { index: usize },
    AlreadyStarted,
    NotStarted { entry: &'static str },
    Panicked { entry: &'static str },
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::NegativeArgumentCount(argc) => {
                write!(f, "ProgramStart: negative argument count {argc}")
            }
            BootstrapError::NullArgumentVector { argc } => write!(
                f,
                "ProgramStart: argument vector is null but argument count is {argc}"
            ),
            BootstrapError::NullArgument { index } => {
                write!(f, "ProgramStart: argument {index} is a null pointer")
            }
            BootstrapError::AlreadyStarted => f.write_str("ProgramStart called more than once"),
            BootstrapError::NotStarted { entry } => {
                write!(f, "{entry} called before ProgramStart")
            }
            BootstrapError::Panicked { entry } => write!(f, "internal error in {entry}"),
        }
    }
}

impl std::error::Error for BootstrapError {}
