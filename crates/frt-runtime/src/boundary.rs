use std::ffi::{c_char, c_int, CStr, OsStr};

use crate::error::BootstrapError;

/// Copies `argv[0..argc]` into owned byte strings.
///
/// Exactly `argc` slots are read; the conventional null at `argv[argc]` is
/// never dereferenced.
pub(crate) unsafe fn capture_arguments(
    argc: c_int,
    argv: *const *const c_char,
) -> Result<Vec<Vec<u8>>, BootstrapError> {
    let count = usize::try_from(argc).map_err(|_| BootstrapError::NegativeArgumentCount(argc))?;
    if count == 0 {
        return Ok(Vec::new());
    }
    if argv.is_null() {
        return Err(BootstrapError::NullArgumentVector { argc: count });
    }

    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let arg = *argv.add(index);
        if arg.is_null() {
            return Err(BootstrapError::NullArgument { index });
        }
        out.push(CStr::from_ptr(arg).to_bytes().to_vec());
    }
    Ok(out)
}

/// Copies `envp` up to (not past) its first null slot. `None` if `envp`
/// itself is null.
pub(crate) unsafe fn capture_environment(envp: *const *const c_char) -> Option<Vec<Vec<u8>>> {
    if envp.is_null() {
        return None;
    }

    let mut out = Vec::new();
    let mut cursor = envp;
    loop {
        let entry = *cursor;
        if entry.is_null() {
            break;
        }
        out.push(CStr::from_ptr(entry).to_bytes().to_vec());
        cursor = cursor.add(1);
    }
    Some(out)
}

/// `KEY=VALUE` entries of the live process environment, for a null `envp`.
pub(crate) fn inherited_environment() -> Vec<Vec<u8>> {
    std::env::vars_os()
        .map(|(k, v)| {
            let mut entry = os_bytes(&k);
            entry.push(b'=');
            entry.extend_from_slice(&os_bytes(&v));
            entry
        })
        .collect()
}

#[cfg(unix)]
fn os_bytes(s: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt as _;
    s.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_bytes(s: &OsStr) -> Vec<u8> {
    s.to_string_lossy().into_owned().into_bytes()
}

/// Splits at the first `=`. Entries with no `=` or an empty name are not
/// variables.
pub(crate) fn split_entry(entry: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
    let eq = entry.iter().position(|&b| b == b'=')?;
    if eq == 0 {
        return None;
    }
    Some((entry[..eq].to_vec(), entry[eq + 1..].to_vec()))
}
