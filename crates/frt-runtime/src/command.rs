//! C-ABI intrinsics that read back what `ProgramStart` captured:
//! `COMMAND_ARGUMENT_COUNT`, `GET_COMMAND_ARGUMENT`, `GET_COMMAND` and
//! `GET_ENVIRONMENT_VARIABLE`.
//!
//! Character results follow Fortran rules: the value is copied into the
//! caller's buffer and padded with blanks; if it does not fit it is truncated
//! and the status is `STAT_VALUE_TOO_SHORT`. A null value pointer is a
//! length-only query. A null length pointer skips the length.

use std::ffi::c_char;

use frt_contracts::{STAT_MISSING_ARGUMENT, STAT_MISSING_ENV_VAR, STAT_OK, STAT_VALUE_TOO_SHORT};

use crate::{fatal, state};

unsafe fn value_buffer<'a>(ptr: *mut c_char, len: usize) -> Option<&'a mut [u8]> {
    if ptr.is_null() {
        None
    } else {
        Some(std::slice::from_raw_parts_mut(ptr.cast::<u8>(), len))
    }
}

unsafe fn name_slice<'a>(ptr: *const c_char, len: usize) -> &'a [u8] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(ptr.cast::<u8>(), len)
    }
}

unsafe fn store_length(length: *mut i64, n: usize) {
    if !length.is_null() {
        *length = i64::try_from(n).unwrap_or(i64::MAX);
    }
}

fn copy_padded(src: &[u8], dst: Option<&mut [u8]>) -> i32 {
    let Some(dst) = dst else {
        return STAT_OK;
    };
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src[..n]);
    dst[n..].fill(b' ');
    if src.len() > dst.len() {
        STAT_VALUE_TOO_SHORT
    } else {
        STAT_OK
    }
}

fn trim_trailing_blanks(name: &[u8]) -> &[u8] {
    let end = name.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
    &name[..end]
}

fn env_name(name: &[u8], trim_name: i32) -> &[u8] {
    if trim_name != 0 {
        trim_trailing_blanks(name)
    } else {
        name
    }
}

fn usize_index(n: i32) -> Option<usize> {
    usize::try_from(n).ok()
}

/// `COMMAND_ARGUMENT_COUNT()`: arguments after the program name.
#[export_name = "_FortranAArgumentCount"]
pub extern "C" fn argument_count() -> i32 {
    fatal::guard("ArgumentCount", || {
        let env = state::require("ArgumentCount")?;
        Ok(i32::try_from(env.argument_count()).unwrap_or(i32::MAX))
    })
}

/// Byte length of argument `n`, or 0 when there is no such argument.
#[export_name = "_FortranAArgumentLength"]
pub extern "C" fn argument_length(n: i32) -> i64 {
    fatal::guard("ArgumentLength", || {
        let env = state::require("ArgumentLength")?;
        let len = usize_index(n)
            .and_then(|n| env.argument(n))
            .map_or(0, <[u8]>::len);
        Ok(i64::try_from(len).unwrap_or(i64::MAX))
    })
}

/// `GET_COMMAND_ARGUMENT(n, value, length, status)`.
///
/// Returns `STAT_MISSING_ARGUMENT` with a blank value and zero length when
/// `n` is negative or past the last argument.
#[export_name = "_FortranAGetCommandArgument"]
pub unsafe extern "C" fn get_command_argument(
    n: i32,
    value: *mut c_char,
    value_len: usize,
    length: *mut i64,
) -> i32 {
    fatal::guard("GetCommandArgument", || {
        let env = state::require("GetCommandArgument")?;
        let mut value = value_buffer(value, value_len);

        let Some(arg) = usize_index(n).and_then(|n| env.argument(n)) else {
            if let Some(v) = value.as_deref_mut() {
                v.fill(b' ');
            }
            store_length(length, 0);
            return Ok(STAT_MISSING_ARGUMENT);
        };

        store_length(length, arg.len());
        Ok(copy_padded(arg, value))
    })
}

/// `GET_COMMAND(command, length, status)`.
#[export_name = "_FortranAGetCommand"]
pub unsafe extern "C" fn get_command(value: *mut c_char, value_len: usize, length: *mut i64) -> i32 {
    fatal::guard("GetCommand", || {
        let env = state::require("GetCommand")?;
        let line = env.command_line();
        store_length(length, line.len());
        Ok(copy_padded(&line, value_buffer(value, value_len)))
    })
}

/// Length of the value of environment variable `name`, 0 when unset.
#[export_name = "_FortranAEnvVariableLength"]
pub unsafe extern "C" fn env_variable_length(
    name: *const c_char,
    name_len: usize,
    trim_name: i32,
) -> i64 {
    fatal::guard("EnvVariableLength", || {
        let env = state::require("EnvVariableLength")?;
        let name = env_name(name_slice(name, name_len), trim_name);
        let len = if name.is_empty() {
            0
        } else {
            env.var(name).map_or(0, <[u8]>::len)
        };
        Ok(i64::try_from(len).unwrap_or(i64::MAX))
    })
}

/// `GET_ENVIRONMENT_VARIABLE(name, value, length, status, trim_name)`.
///
/// With `trim_name` nonzero, trailing blanks in `name` are not significant.
/// An empty name is never set.
#[export_name = "_FortranAGetEnvVariable"]
pub unsafe extern "C" fn get_env_variable(
    name: *const c_char,
    name_len: usize,
    value: *mut c_char,
    value_len: usize,
    length: *mut i64,
    trim_name: i32,
) -> i32 {
    fatal::guard("GetEnvVariable", || {
        let env = state::require("GetEnvVariable")?;
        let name = env_name(name_slice(name, name_len), trim_name);
        let mut value = value_buffer(value, value_len);

        let found = if name.is_empty() { None } else { env.var(name) };
        let Some(found) = found else {
            if let Some(v) = value.as_deref_mut() {
                v.fill(b' ');
            }
            store_length(length, 0);
            return Ok(STAT_MISSING_ENV_VAR);
        };

        store_length(length, found.len());
        Ok(copy_padded(found, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_pads_with_blanks() {
        let mut buf = [b'x'; 6];
        assert_eq!(copy_padded(b"abc", Some(&mut buf)), STAT_OK);
        assert_eq!(&buf, b"abc   ");
    }

    #[test]
    fn copy_truncates_and_reports() {
        let mut buf = [0u8; 2];
        assert_eq!(copy_padded(b"abc", Some(&mut buf)), STAT_VALUE_TOO_SHORT);
        assert_eq!(&buf, b"ab");
    }

    #[test]
    fn copy_exact_fit_is_ok() {
        let mut buf = [0u8; 3];
        assert_eq!(copy_padded(b"abc", Some(&mut buf)), STAT_OK);
        assert_eq!(&buf, b"abc");
    }

    #[test]
    fn length_only_query_never_truncates() {
        assert_eq!(copy_padded(b"abcdef", None), STAT_OK);
    }

    #[test]
    fn trim_name_drops_trailing_blanks_only() {
        assert_eq!(trim_trailing_blanks(b"HOME   "), b"HOME");
        assert_eq!(trim_trailing_blanks(b" HOME"), b" HOME");
        assert_eq!(trim_trailing_blanks(b"    "), b"");
        assert_eq!(env_name(b"HOME  ", 0), b"HOME  ");
        assert_eq!(env_name(b"HOME  ", 1), b"HOME");
    }

    #[test]
    fn negative_index_is_not_an_argument() {
        assert_eq!(usize_index(-1), None);
        assert_eq!(usize_index(0), Some(0));
    }
}
