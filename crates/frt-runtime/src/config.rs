//! Runtime settings read once from the captured environment.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use frt_contracts::{
    ENV_CHECK_POINTER_DEALLOCATION, ENV_CONVERT, ENV_DEFAULT_UTF8, ENV_FMT_RECL,
    ENV_NO_STOP_MESSAGE, ENV_TRACE, ENV_TRUNCATE_STREAM,
};

pub const DEFAULT_LIST_DIRECTED_LINE_LENGTH: u32 = 79;

/// Byte order applied to unformatted I/O (`FORT_CONVERT`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Conversion {
    #[default]
    Unknown,
    Native,
    LittleEndian,
    BigEndian,
    Swap,
}

impl Conversion {
    pub fn as_str(self) -> &'static str {
        match self {
            Conversion::Unknown => "UNKNOWN",
            Conversion::Native => "NATIVE",
            Conversion::LittleEndian => "LITTLE_ENDIAN",
            Conversion::BigEndian => "BIG_ENDIAN",
            Conversion::Swap => "SWAP",
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ConversionParseError {
    value: String,
}

impl fmt::Display for ConversionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid conversion {:?} (expected one of: NATIVE, LITTLE_ENDIAN, BIG_ENDIAN, SWAP, UNKNOWN)",
            self.value
        )
    }
}

impl std::error::Error for ConversionParseError {}

impl FromStr for Conversion {
    type Err = ConversionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_uppercase();
        match s.as_str() {
            "UNKNOWN" => Ok(Conversion::Unknown),
            "NATIVE" => Ok(Conversion::Native),
            "LITTLE_ENDIAN" => Ok(Conversion::LittleEndian),
            "BIG_ENDIAN" => Ok(Conversion::BigEndian),
            "SWAP" => Ok(Conversion::Swap),
            _ => Err(ConversionParseError { value: s }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub list_directed_line_length: u32,
    pub conversion: Conversion,
    pub no_stop_message: bool,
    pub default_utf8: bool,
    pub check_pointer_deallocation: bool,
    pub truncate_stream: bool,
    pub trace: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            list_directed_line_length: DEFAULT_LIST_DIRECTED_LINE_LENGTH,
            conversion: Conversion::Unknown,
            no_stop_message: false,
            default_utf8: false,
            check_pointer_deallocation: true,
            truncate_stream: true,
            trace: false,
        }
    }
}

fn parse_int_env(name: &str, raw: &str) -> anyhow::Result<i64> {
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("{name}={raw:?} is not an integer"))
}

fn parse_flag_env(name: &str, raw: &str) -> anyhow::Result<bool> {
    Ok(parse_int_env(name, raw)? != 0)
}

fn parse_line_length_env(name: &str, raw: &str) -> anyhow::Result<u32> {
    let n = parse_int_env(name, raw)?;
    match u32::try_from(n) {
        Ok(n) if n > 0 => Ok(n),
        _ => anyhow::bail!("{name}={raw:?} must be a positive record length"),
    }
}

fn parse_conversion_env(name: &str, raw: &str) -> anyhow::Result<Conversion> {
    Conversion::from_str(raw).with_context(|| format!("{name}={raw:?}"))
}

fn parse_bool_env(name: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        other => anyhow::bail!(
            "{name}={other:?} is invalid (expected one of: 1, 0, true, false, yes, no)"
        ),
    }
}

fn read_setting<'a, T>(
    lookup: &impl Fn(&str) -> Option<&'a [u8]>,
    name: &str,
    parse: fn(&str, &str) -> anyhow::Result<T>,
) -> anyhow::Result<Option<T>> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let raw = std::str::from_utf8(raw).with_context(|| format!("{name} is not valid UTF-8"))?;
    Ok(Some(parse(name, raw)?))
}

impl RuntimeConfig {
    /// Builds the configuration from `lookup`, which returns the value of an
    /// environment variable by name.
    ///
    /// Invalid values leave the default in place and are returned as
    /// warnings; they never fail startup.
    pub fn load<'a>(lookup: impl Fn(&str) -> Option<&'a [u8]>) -> (Self, Vec<anyhow::Error>) {
        let mut config = RuntimeConfig::default();
        let mut warnings = Vec::new();

        macro_rules! apply {
            ($name:expr, $parse:expr, $field:ident) => {
                match read_setting(&lookup, $name, $parse) {
                    Ok(Some(v)) => config.$field = v,
                    Ok(None) => {}
                    Err(err) => warnings.push(err),
                }
            };
        }

        apply!(ENV_FMT_RECL, parse_line_length_env, list_directed_line_length);
        apply!(ENV_CONVERT, parse_conversion_env, conversion);
        apply!(ENV_NO_STOP_MESSAGE, parse_flag_env, no_stop_message);
        apply!(ENV_DEFAULT_UTF8, parse_flag_env, default_utf8);
        apply!(
            ENV_CHECK_POINTER_DEALLOCATION,
            parse_flag_env,
            check_pointer_deallocation
        );
        apply!(ENV_TRUNCATE_STREAM, parse_flag_env, truncate_stream);
        apply!(ENV_TRACE, parse_bool_env, trace);

        (config, warnings)
    }
}
