//! Operator environment variable lookups
//!
//! The reconciliation layer that drives this crate is configured through
//! its pod environment. Lookups require the variable to be both set and
//! non-empty; anything else is an [`Error::Environment`](crate::Error::Environment).

use crate::error::Error;
use crate::Result;

/// Environment variable carrying the operator's own name.
pub const OPERATOR_NAME_ENV: &str = "OPERATOR_NAME";

/// Environment variable naming the namespace the operator watches.
pub const WATCH_NAMESPACE_ENV: &str = "WATCH_NAMESPACE";

/// Environment variable naming the namespace the operator runs in.
pub const OPERATOR_NAMESPACE_ENV: &str = "MY_POD_NAMESPACE";

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) => Err(Error::environment(format!(
            "environment variable {name} is empty"
        ))),
        Err(_) => Err(Error::environment(format!(
            "environment variable {name} is not set"
        ))),
    }
}

/// The operator's name, from [`OPERATOR_NAME_ENV`].
pub fn operator_name() -> Result<String> {
    required_env(OPERATOR_NAME_ENV)
}

/// The watched namespace, from [`WATCH_NAMESPACE_ENV`].
pub fn watch_namespace() -> Result<String> {
    required_env(WATCH_NAMESPACE_ENV)
}

/// The namespace the operator pod runs in, from [`OPERATOR_NAMESPACE_ENV`].
pub fn operator_namespace() -> Result<String> {
    required_env(OPERATOR_NAMESPACE_ENV)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name; tests run in parallel and the
    // process environment is shared.

    #[test]
    fn a_set_variable_is_returned() {
        std::env::set_var("ZKMETA_TEST_SET", "bookkeeper-operator");
        assert_eq!(required_env("ZKMETA_TEST_SET").unwrap(), "bookkeeper-operator");
    }

    #[test]
    fn an_unset_variable_is_an_error() {
        let err = required_env("ZKMETA_TEST_UNSET").unwrap_err();
        assert!(err.to_string().contains("is not set"));
        assert!(matches!(err, crate::Error::Environment(_)));
    }

    #[test]
    fn an_empty_variable_is_an_error() {
        std::env::set_var("ZKMETA_TEST_EMPTY", "");
        let err = required_env("ZKMETA_TEST_EMPTY").unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }
}
