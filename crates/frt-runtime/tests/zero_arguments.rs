use std::ffi::c_char;
use std::ptr;

use frt_contracts::{STAT_MISSING_ARGUMENT, STAT_OK};
use frt_runtime::command::{argument_count, get_command, get_command_argument};
use frt_runtime::program_start;

#[test]
fn zero_arguments_with_null_argv_and_empty_environment() {
    let envp: [*const c_char; 1] = [ptr::null()];
    unsafe { program_start(0, ptr::null(), envp.as_ptr()) };

    assert_eq!(argument_count(), 0);

    let mut buf = [b'x'; 3];
    let mut len = -1i64;
    let stat = unsafe { get_command_argument(0, buf.as_mut_ptr().cast(), buf.len(), &mut len) };
    assert_eq!(stat, STAT_MISSING_ARGUMENT);
    assert_eq!(&buf, b"   ");
    assert_eq!(len, 0);

    let mut len = -1i64;
    let stat = unsafe { get_command(buf.as_mut_ptr().cast(), buf.len(), &mut len) };
    assert_eq!(stat, STAT_OK);
    assert_eq!(len, 0);

    let env = frt_runtime::environment();
    assert!(env.arguments().is_empty());
    assert_eq!(env.variables().count(), 0);
}
