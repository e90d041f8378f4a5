//! Shared, version-pinned names for the Fortran runtime boundary.
//!
//! These constants are the single source of truth for exported symbol names,
//! configuration variables and the schema strings that appear in
//! machine-readable output.

/// Prefix applied to every symbol the runtime exports with C linkage.
pub const ENTRY_NAME_PREFIX: &str = "_FortranA";

pub const PROGRAM_START_SYMBOL: &str = "_FortranAProgramStart";
pub const ARGUMENT_COUNT_SYMBOL: &str = "_FortranAArgumentCount";
pub const ARGUMENT_LENGTH_SYMBOL: &str = "_FortranAArgumentLength";
pub const GET_COMMAND_ARGUMENT_SYMBOL: &str = "_FortranAGetCommandArgument";
pub const GET_COMMAND_SYMBOL: &str = "_FortranAGetCommand";
pub const ENV_VARIABLE_LENGTH_SYMBOL: &str = "_FortranAEnvVariableLength";
pub const GET_ENV_VARIABLE_SYMBOL: &str = "_FortranAGetEnvVariable";

pub const FRT_PROBE_REPORT_SCHEMA_VERSION: &str = "frt.probe.report@0.1.0";

// Runtime configuration variables, read once from the captured environment.
pub const ENV_FMT_RECL: &str = "FORT_FMT_RECL";
pub const ENV_CONVERT: &str = "FORT_CONVERT";
pub const ENV_NO_STOP_MESSAGE: &str = "NO_STOP_MESSAGE";
pub const ENV_DEFAULT_UTF8: &str = "DEFAULT_UTF8";
pub const ENV_CHECK_POINTER_DEALLOCATION: &str = "FORT_CHECK_POINTER_DEALLOCATION";
pub const ENV_TRUNCATE_STREAM: &str = "FORT_TRUNCATE_STREAM";
pub const ENV_TRACE: &str = "FRT_TRACE";

// GET_COMMAND_ARGUMENT / GET_COMMAND / GET_ENVIRONMENT_VARIABLE status values.
pub const STAT_OK: i32 = 0;
pub const STAT_VALUE_TOO_SHORT: i32 = -1;
pub const STAT_MISSING_ARGUMENT: i32 = 1;
pub const STAT_MISSING_ENV_VAR: i32 = 1;

/// Applies the entry-name convention to a bare runtime routine name.
pub fn rt_name(name: &str) -> String {
    format!("{ENTRY_NAME_PREFIX}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_names_follow_entry_name_convention() {
        let pairs = [
            ("ProgramStart", PROGRAM_START_SYMBOL),
            ("ArgumentCount", ARGUMENT_COUNT_SYMBOL),
            ("ArgumentLength", ARGUMENT_LENGTH_SYMBOL),
            ("GetCommandArgument", GET_COMMAND_ARGUMENT_SYMBOL),
            ("GetCommand", GET_COMMAND_SYMBOL),
            ("EnvVariableLength", ENV_VARIABLE_LENGTH_SYMBOL),
            ("GetEnvVariable", GET_ENV_VARIABLE_SYMBOL),
        ];
        for (bare, symbol) in pairs {
            assert_eq!(rt_name(bare), symbol);
        }
    }
}
