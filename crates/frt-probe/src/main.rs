//! Stand-in for a compiled program's startup stub.
//!
//! Hands this process's own argv/envp to `_FortranAProgramStart` through C
//! linkage, reads everything back through the runtime's C-ABI intrinsics and
//! prints a JSON report on stdout.

use std::ffi::{c_char, c_int, CString, OsString};
use std::process::ExitCode;
use std::ptr;

use anyhow::{Context, Result};
use frt_contracts::FRT_PROBE_REPORT_SCHEMA_VERSION;
use serde::Serialize;

const ENV_PROBE_LOOKUP: &str = "FRT_PROBE_LOOKUP";
const ENV_PROBE_NULL_ENVP: &str = "FRT_PROBE_NULL_ENVP";

extern "C" {
    #[link_name = "_FortranAProgramStart"]
    fn program_start(argc: c_int, argv: *const *const c_char, envp: *const *const c_char);
    #[link_name = "_FortranAArgumentCount"]
    fn argument_count() -> i32;
    #[link_name = "_FortranAArgumentLength"]
    fn argument_length(n: i32) -> i64;
    #[link_name = "_FortranAGetCommandArgument"]
    fn get_command_argument(n: i32, value: *mut c_char, value_len: usize, length: *mut i64) -> i32;
    #[link_name = "_FortranAGetCommand"]
    fn get_command(value: *mut c_char, value_len: usize, length: *mut i64) -> i32;
    #[link_name = "_FortranAEnvVariableLength"]
    fn env_variable_length(name: *const c_char, name_len: usize, trim_name: i32) -> i64;
    #[link_name = "_FortranAGetEnvVariable"]
    fn get_env_variable(
        name: *const c_char,
        name_len: usize,
        value: *mut c_char,
        value_len: usize,
        length: *mut i64,
        trim_name: i32,
    ) -> i32;
}

#[derive(Serialize)]
struct ValueReport {
    status: i32,
    length: i64,
    value: String,
}

#[derive(Serialize)]
struct LookupReport {
    name: String,
    #[serde(flatten)]
    result: ValueReport,
}

#[derive(Serialize)]
struct ConfigReport {
    list_directed_line_length: u32,
    conversion: &'static str,
    no_stop_message: bool,
    default_utf8: bool,
    check_pointer_deallocation: bool,
    truncate_stream: bool,
    trace: bool,
}

#[derive(Serialize)]
struct ProbeReport {
    schema_version: &'static str,
    environment_source: &'static str,
    argument_count: i32,
    arguments: Vec<ValueReport>,
    command: ValueReport,
    lookups: Vec<LookupReport>,
    config: ConfigReport,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let args = std::env::args_os()
        .map(c_string)
        .collect::<Result<Vec<_>>>()
        .context("collect argv")?;
    let vars = std::env::vars_os()
        .map(|(k, v)| {
            let mut entry = k;
            entry.push("=");
            entry.push(v);
            c_string(entry)
        })
        .collect::<Result<Vec<_>>>()
        .context("collect envp")?;

    let mut argv: Vec<*const c_char> = args.iter().map(|s| s.as_ptr()).collect();
    argv.push(ptr::null());
    let mut envp: Vec<*const c_char> = vars.iter().map(|s| s.as_ptr()).collect();
    envp.push(ptr::null());

    let argc = c_int::try_from(args.len()).context("too many arguments")?;
    let envp_ptr = if std::env::var_os(ENV_PROBE_NULL_ENVP).is_some() {
        ptr::null()
    } else {
        envp.as_ptr()
    };
    unsafe { program_start(argc, argv.as_ptr(), envp_ptr) };
    drop(argv);
    drop(envp);
    drop(args);
    drop(vars);

    let report = collect_report();
    println!("{}", serde_json::to_string(&report)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(unix)]
fn c_string(s: OsString) -> Result<CString> {
    use std::os::unix::ffi::OsStringExt as _;
    CString::new(s.into_vec()).context("nul byte in OS string")
}

#[cfg(not(unix))]
fn c_string(s: OsString) -> Result<CString> {
    CString::new(s.to_string_lossy().into_owned()).context("nul byte in OS string")
}

fn lossy(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).into_owned()
}

fn report_argument(n: i32) -> ValueReport {
    let cap = usize::try_from(unsafe { argument_length(n) }).unwrap_or(0);
    let mut buf = vec![0u8; cap];
    let mut length = 0i64;
    let status = unsafe { get_command_argument(n, buf.as_mut_ptr().cast(), buf.len(), &mut length) };
    ValueReport {
        status,
        length,
        value: lossy(&buf),
    }
}

fn report_command() -> ValueReport {
    let mut length = 0i64;
    unsafe { get_command(ptr::null_mut(), 0, &mut length) };
    let mut buf = vec![0u8; usize::try_from(length).unwrap_or(0)];
    let status = unsafe { get_command(buf.as_mut_ptr().cast(), buf.len(), &mut length) };
    ValueReport {
        status,
        length,
        value: lossy(&buf),
    }
}

fn report_lookup(name: &str) -> LookupReport {
    let cap = usize::try_from(unsafe { env_variable_length(name.as_ptr().cast(), name.len(), 1) })
        .unwrap_or(0);
    let mut buf = vec![0u8; cap];
    let mut length = 0i64;
    let status = unsafe {
        get_env_variable(
            name.as_ptr().cast(),
            name.len(),
            buf.as_mut_ptr().cast(),
            buf.len(),
            &mut length,
            1,
        )
    };
    LookupReport {
        name: name.to_string(),
        result: ValueReport {
            status,
            length,
            value: lossy(&buf),
        },
    }
}

fn collect_report() -> ProbeReport {
    let count = unsafe { argument_count() };
    let arguments = (0..=count).map(report_argument).collect();

    let lookups = std::env::var(ENV_PROBE_LOOKUP)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(report_lookup)
        .collect();

    let env = frt_runtime::environment();
    let config = env.config();

    ProbeReport {
        schema_version: FRT_PROBE_REPORT_SCHEMA_VERSION,
        environment_source: env.source().as_str(),
        argument_count: count,
        arguments,
        command: report_command(),
        lookups,
        config: ConfigReport {
            list_directed_line_length: config.list_directed_line_length,
            conversion: config.conversion.as_str(),
            no_stop_message: config.no_stop_message,
            default_utf8: config.default_utf8,
            check_pointer_deallocation: config.check_pointer_deallocation,
            truncate_stream: config.truncate_stream,
            trace: config.trace,
        },
    }
}
