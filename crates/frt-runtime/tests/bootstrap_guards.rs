//! Precondition violations abort the process, so each case re-runs this
//! test binary as a child limited to one test and inspects how it died.

use std::ffi::{c_char, CString};
use std::process::{Command, Output};
use std::ptr;

use frt_runtime::command::argument_count;
use frt_runtime::program_start;

const CHILD_ENV: &str = "FRT_GUARD_TEST_CHILD";

fn in_child() -> bool {
    std::env::var_os(CHILD_ENV).is_some()
}

fn run_child(test_name: &str) -> Output {
    let exe = std::env::current_exe().expect("current test exe");
    Command::new(exe)
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("spawn child test")
}

fn assert_aborted(out: &Output, message: &str) {
    assert!(!out.status.success(), "child exited cleanly: {:?}", out.status);
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        assert_eq!(out.status.signal(), Some(6), "expected SIGABRT: {:?}", out.status);
    }
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains(&format!("fatal Fortran runtime error: {message}")),
        "stderr={stderr}"
    );
}

unsafe fn start_with(args: &[&str]) {
    let owned: Vec<CString> = args.iter().map(|s| CString::new(*s).unwrap()).collect();
    let mut argv: Vec<*const c_char> = owned.iter().map(|s| s.as_ptr()).collect();
    argv.push(ptr::null());
    let envp: [*const c_char; 1] = [ptr::null()];
    program_start(args.len() as i32, argv.as_ptr(), envp.as_ptr());
}

#[test]
fn second_program_start_aborts() {
    if in_child() {
        unsafe {
            start_with(&["prog"]);
            start_with(&["prog", "again"]);
        }
        return;
    }
    let out = run_child("second_program_start_aborts");
    assert_aborted(&out, "ProgramStart called more than once");
}

#[test]
fn runtime_use_before_program_start_aborts() {
    if in_child() {
        let _ = argument_count();
        return;
    }
    let out = run_child("runtime_use_before_program_start_aborts");
    assert_aborted(&out, "ArgumentCount called before ProgramStart");
}

#[test]
fn environment_accessor_before_program_start_aborts() {
    if in_child() {
        let _ = frt_runtime::environment();
        return;
    }
    assert!(frt_runtime::try_environment().is_none());
    let out = run_child("environment_accessor_before_program_start_aborts");
    assert_aborted(&out, "environment called before ProgramStart");
}

#[test]
fn negative_argc_aborts() {
    if in_child() {
        let envp: [*const c_char; 1] = [ptr::null()];
        unsafe { program_start(-1, ptr::null(), envp.as_ptr()) };
        return;
    }
    let out = run_child("negative_argc_aborts");
    assert_aborted(&out, "ProgramStart: negative argument count -1");
}

#[test]
fn null_argv_with_nonzero_argc_aborts() {
    if in_child() {
        let envp: [*const c_char; 1] = [ptr::null()];
        unsafe { program_start(2, ptr::null(), envp.as_ptr()) };
        return;
    }
    let out = run_child("null_argv_with_nonzero_argc_aborts");
    assert_aborted(
        &out,
        "ProgramStart: argument vector is null but argument count is 2",
    );
}

#[test]
fn null_argument_entry_aborts() {
    if in_child() {
        let prog = CString::new("prog").unwrap();
        let argv = [prog.as_ptr(), ptr::null(), ptr::null()];
        let envp: [*const c_char; 1] = [ptr::null()];
        unsafe { program_start(2, argv.as_ptr(), envp.as_ptr()) };
        return;
    }
    let out = run_child("null_argument_entry_aborts");
    assert_aborted(&out, "ProgramStart: argument 1 is a null pointer");
}
