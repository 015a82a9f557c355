//! Command-line flag lookup shared by the viewer and the headless generator

use std::str::FromStr;

use crate::core::{Error, Result};

/// Value following `flag`, if present
pub fn flag_str<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Parse the value following `flag`. A missing flag is `Ok(None)`; a value
/// that does not parse is a config error.
pub fn parse_flag<T: FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    flag_str(args, flag)
        .map(|s| s.parse().map_err(|_| Error::Config(format!("invalid {} value: {}", flag, s))))
        .transpose()
}
