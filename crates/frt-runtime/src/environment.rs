use std::ffi::{c_char, c_int};

use crate::boundary;
use crate::config::RuntimeConfig;
use crate::error::BootstrapError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnvironmentSource {
    /// Copied from the `envp` passed to `ProgramStart`.
    Captured,
    /// `envp` was null; copied from the live process environment.
    Inherited,
}

impl EnvironmentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            EnvironmentSource::Captured => "captured",
            EnvironmentSource::Inherited => "inherited",
        }
    }
}

/// Everything the runtime keeps from process startup.
///
/// Owns its data: no pointer handed to `ProgramStart` outlives the call.
#[derive(Clone, Debug)]
pub struct ExecutionEnvironment {
    arguments: Vec<Vec<u8>>,
    variables: Vec<(Vec<u8>, Vec<u8>)>,
    source: EnvironmentSource,
    config: RuntimeConfig,
}

impl ExecutionEnvironment {
    /// Builds the environment from already-owned arguments and raw
    /// `KEY=VALUE` entries. Configuration warnings go to stderr.
    pub fn new(
        arguments: Vec<Vec<u8>>,
        entries: Vec<Vec<u8>>,
        source: EnvironmentSource,
    ) -> Self {
        let variables: Vec<(Vec<u8>, Vec<u8>)> = entries
            .iter()
            .filter_map(|e| boundary::split_entry(e))
            .collect();

        let (config, warnings) = RuntimeConfig::load(|name| lookup(&variables, name.as_bytes()));
        for warning in warnings {
            eprintln!("Fortran runtime: {warning:#}; ignored");
        }

        ExecutionEnvironment {
            arguments,
            variables,
            source,
            config,
        }
    }

    /// Converts the startup stub's raw arrays.
    pub unsafe fn from_raw(
        argc: c_int,
        argv: *const *const c_char,
        envp: *const *const c_char,
    ) -> Result<Self, BootstrapError> {
        let arguments = boundary::capture_arguments(argc, argv)?;
        let (entries, source) = match boundary::capture_environment(envp) {
            Some(entries) => (entries, EnvironmentSource::Captured),
            None => (
                boundary::inherited_environment(),
                EnvironmentSource::Inherited,
            ),
        };
        Ok(Self::new(arguments, entries, source))
    }

    /// All arguments, program name first.
    pub fn arguments(&self) -> &[Vec<u8>] {
        &self.arguments
    }

    /// Argument `n`, where 0 is the program name.
    pub fn argument(&self, n: usize) -> Option<&[u8]> {
        self.arguments.get(n).map(Vec::as_slice)
    }

    /// Number of arguments after the program name (`COMMAND_ARGUMENT_COUNT`).
    pub fn argument_count(&self) -> usize {
        self.arguments.len().saturating_sub(1)
    }

    pub fn program_name(&self) -> Option<&[u8]> {
        self.argument(0)
    }

    /// Arguments joined by single blanks, as `GET_COMMAND` reports them.
    pub fn command_line(&self) -> Vec<u8> {
        self.arguments.join(&b' ')
    }

    pub fn variables(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.variables
            .iter()
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    /// First value bound to `name`.
    pub fn var(&self, name: &[u8]) -> Option<&[u8]> {
        lookup(&self.variables, name)
    }

    pub fn source(&self) -> EnvironmentSource {
        self.source
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

fn lookup<'a>(variables: &'a [(Vec<u8>, Vec<u8>)], name: &[u8]) -> Option<&'a [u8]> {
    variables
        .iter()
        .find(|(k, _)| k.as_slice() == name)
        .map(|(_, v)| v.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Conversion;

    fn bytes(items: &[&str]) -> Vec<Vec<u8>> {
        items.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    #[test]
    fn counts_exclude_program_name() {
        let env = ExecutionEnvironment::new(
            bytes(&["prog", "a", "b"]),
            vec![],
            EnvironmentSource::Captured,
        );
        assert_eq!(env.argument_count(), 2);
        assert_eq!(env.program_name(), Some(&b"prog"[..]));
        assert_eq!(env.argument(2), Some(&b"b"[..]));
        assert_eq!(env.argument(3), None);
        assert_eq!(env.command_line(), b"prog a b".to_vec());
    }

    #[test]
    fn empty_argument_list() {
        let env = ExecutionEnvironment::new(vec![], vec![], EnvironmentSource::Captured);
        assert_eq!(env.argument_count(), 0);
        assert_eq!(env.program_name(), None);
        assert!(env.command_line().is_empty());
    }

    #[test]
    fn variable_lookup_takes_first_binding() {
        let env = ExecutionEnvironment::new(
            bytes(&["prog"]),
            bytes(&["DUP=first", "NOEQ", "EMPTY=", "DUP=second"]),
            EnvironmentSource::Captured,
        );
        assert_eq!(env.var(b"DUP"), Some(&b"first"[..]));
        assert_eq!(env.var(b"EMPTY"), Some(&b""[..]));
        assert_eq!(env.var(b"NOEQ"), None);
        assert_eq!(env.variables().count(), 3);
    }

    #[test]
    fn config_comes_from_captured_entries() {
        let env = ExecutionEnvironment::new(
            bytes(&["prog"]),
            bytes(&["FORT_CONVERT=SWAP", "FORT_FMT_RECL=200"]),
            EnvironmentSource::Captured,
        );
        assert_eq!(env.config().conversion, Conversion::Swap);
        assert_eq!(env.config().list_directed_line_length, 200);
    }
}
