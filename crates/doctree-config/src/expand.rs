//! `${VAR}` expansion in configuration strings.

use std::borrow::Cow;
use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` in `value`.
///
/// Strings without `${` are returned as they are.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, lookup)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            var: e.var_name,
            source: e.cause,
        })
}

fn lookup(var: &str) -> Result<Option<String>, VarError> {
    std::env::var(var).map(Some)
}
