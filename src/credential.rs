//! Resolution of the API credential.
//!
//! The credential is read once at startup from the process environment,
//! which may first be populated from a `.env` file.  A missing or empty value
//! is fatal: [`resolve_or_remediate`] hands back the guidance to print and the
//! binary exits before the chat loop starts.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable holding the OpenAI API key.
pub const API_KEY_VARIABLE: &str = "OPENAI_API_KEY";

/// The default `.env` file consulted at startup.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// The secret token that authorizes calls to the completion service.
///
/// Never empty.  The `Debug` form is redacted so the key does not end up in
/// logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Wraps a secret, rejecting the empty string.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    /// The raw secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential(****)")
    }
}

/// Resolves the credential named `variable` through `lookup`.
///
/// `lookup` stands in for the environment so resolution can be exercised
/// without mutating process state.
pub fn resolve_with<F>(variable: &str, lookup: F) -> Result<SessionCredential>
where
    F: FnOnce(&str) -> Option<String>,
{
    lookup(variable)
        .and_then(SessionCredential::new)
        .ok_or_else(|| Error::missing_credential(variable))
}

/// Resolves the credential through `lookup`, or returns the [`remediation`]
/// lines to show the operator when it is missing or empty.
pub fn resolve_or_remediate<F>(
    variable: &str,
    lookup: F,
) -> std::result::Result<SessionCredential, Vec<String>>
where
    F: FnOnce(&str) -> Option<String>,
{
    resolve_with(variable, lookup).map_err(|err| {
        tracing::debug!(error = %err, "no usable credential");
        remediation(variable)
    })
}

/// Loads `KEY=value` pairs from `path` into the process environment.
///
/// Variables that are already set keep their values.  Returns whether a file
/// was loaded; a missing file is not an error.
#[cfg(feature = "dotenv")]
pub fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded environment file");
            Ok(true)
        }
        Err(err) if err.not_found() => Ok(false),
        Err(err) => Err(Error::input(format!(
            "could not load {}: {err}",
            path.display()
        ))),
    }
}

/// Loads `KEY=value` pairs from `path` into the process environment.
///
/// Built without the `dotenv` feature, so no file is ever loaded.
#[cfg(not(feature = "dotenv"))]
pub fn load_env_file(path: &Path) -> Result<bool> {
    tracing::debug!(path = %path.display(), "built without dotenv support; skipping");
    Ok(false)
}

/// Operator-facing guidance printed when the credential is missing.
pub fn remediation(variable: &str) -> Vec<String> {
    vec![
        format!("Error: {}", Error::missing_credential(variable)),
        "Please check the following:".to_string(),
        "1. You have a .env file in the directory you run parley-chat from.".to_string(),
        format!("2. The .env file contains: {variable}='your_actual_api_key'"),
        "3. parley was built with the `dotenv` feature (enabled by default).".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_present_value() {
        let credential = resolve_with(API_KEY_VARIABLE, |name| {
            assert_eq!(name, "OPENAI_API_KEY");
            Some("sk-test".to_string())
        })
        .unwrap();
        assert_eq!(credential.expose(), "sk-test");
    }

    #[test]
    fn absent_value_is_missing() {
        let err = resolve_with(API_KEY_VARIABLE, |_| None).unwrap_err();
        assert!(matches!(err, Error::MissingCredential { ref variable } if variable == "OPENAI_API_KEY"));
    }

    #[test]
    fn empty_value_is_missing() {
        assert!(resolve_with(API_KEY_VARIABLE, |_| Some(String::new())).is_err());
    }

    #[test]
    fn only_the_empty_string_is_rejected() {
        let credential = resolve_with(API_KEY_VARIABLE, |_| Some("   ".to_string())).unwrap();
        assert_eq!(credential.expose(), "   ");
        assert!(SessionCredential::new(" sk-padded ").is_some());
    }

    #[test]
    fn missing_credential_yields_remediation() {
        let lines = resolve_or_remediate(API_KEY_VARIABLE, |_| None).unwrap_err();
        assert_eq!(lines, remediation(API_KEY_VARIABLE));

        let lines = resolve_or_remediate(API_KEY_VARIABLE, |_| Some(String::new())).unwrap_err();
        assert_eq!(lines.len(), 5);

        let credential =
            resolve_or_remediate(API_KEY_VARIABLE, |_| Some("sk-test".to_string())).unwrap();
        assert_eq!(credential.expose(), "sk-test");
    }

    #[test]
    fn debug_is_redacted() {
        let credential = SessionCredential::new("sk-very-secret").unwrap();
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("sk-very-secret"));
    }

    #[test]
    fn remediation_names_three_steps() {
        let lines = remediation("OPENAI_API_KEY");
        assert_eq!(
            lines[0],
            "Error: The OPENAI_API_KEY environment variable was not found."
        );
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("1. "));
        assert_eq!(
            lines[3],
            "2. The .env file contains: OPENAI_API_KEY='your_actual_api_key'"
        );
        assert!(lines[4].starts_with("3. "));
    }

    #[cfg(feature = "dotenv")]
    #[test]
    fn missing_env_file_is_not_an_error() {
        let path = std::env::temp_dir().join("parley-no-such-dir/.env");
        assert!(!load_env_file(&path).unwrap());
    }

    #[cfg(feature = "dotenv")]
    #[test]
    fn env_file_populates_environment() {
        use std::io::Write;

        let dir = std::env::temp_dir().join(format!("parley-env-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "PARLEY_TEST_ENV_FILE_KEY='sk-from-file'").unwrap();
        drop(file);

        assert!(load_env_file(&path).unwrap());
        let credential =
            resolve_with("PARLEY_TEST_ENV_FILE_KEY", |name| std::env::var(name).ok()).unwrap();
        assert_eq!(credential.expose(), "sk-from-file");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
