use std::collections::BTreeSet;

use crate::request::ConfigurationError;

/// Default environment variable holding the translation service key.
pub const LANGUAGE_API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

/// Default environment variable holding the completion service key.
pub const COMPLETION_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// A single credential and the variable it is expected in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Name reported when the value is missing.
    pub name: String,
    pub value: Option<String>,
}

impl Credential {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value: value.filter(|v| !v.trim().is_empty()),
        }
    }

    /// Reads the credential from the environment, falling back to an inline value.
    pub fn from_env_or(name: impl Into<String>, fallback: Option<String>) -> Self {
        let name = name.into();
        let value = std::env::var(&name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or(fallback);
        Self::new(name, value)
    }

    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// Both service credentials, checked together before any request goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub language: Credential,
    pub completion: Credential,
}

impl Credentials {
    pub const fn new(language: Credential, completion: Credential) -> Self {
        Self {
            language,
            completion,
        }
    }

    /// Fails if any required credential is absent. Has no side effects.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let missing_keys: BTreeSet<String> = [&self.language, &self.completion]
            .into_iter()
            .filter(|c| !c.is_set())
            .map(|c| c.name.clone())
            .collect();

        if missing_keys.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError { missing_keys })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn both_set() -> Credentials {
        Credentials::new(
            Credential::new("LANG_KEY", Some("lang-secret".into())),
            Credential::new("LLM_KEY", Some("llm-secret".into())),
        )
    }

    #[test]
    fn test_validate_all_present() {
        assert!(both_set().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_missing_key() {
        let creds = Credentials::new(
            Credential::new("LANG_KEY", None),
            Credential::new("LLM_KEY", None),
        );

        let err = creds.validate().unwrap_err();
        assert_eq!(
            err.missing_keys.into_iter().collect::<Vec<_>>(),
            vec!["LANG_KEY".to_string(), "LLM_KEY".to_string()]
        );
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut creds = both_set();
        creds.completion = Credential::new("LLM_KEY", Some("   ".into()));

        let err = creds.validate().unwrap_err();
        assert!(err.missing_keys.contains("LLM_KEY"));
        assert!(!err.missing_keys.contains("LANG_KEY"));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let creds = Credentials::new(
            Credential::new("LANG_KEY", None),
            Credential::new("LLM_KEY", Some("x".into())),
        );
        assert_eq!(creds.validate(), creds.validate());
    }

    #[test]
    #[serial]
    fn test_from_env_prefers_environment() {
        // SAFETY: serialised with other env-mutating tests
        unsafe {
            std::env::set_var("LINGUA_TEST_CREDENTIAL", "from-env");
        }

        let cred = Credential::from_env_or("LINGUA_TEST_CREDENTIAL", Some("inline".into()));
        assert_eq!(cred.value(), "from-env");

        // SAFETY: cleanup
        unsafe {
            std::env::remove_var("LINGUA_TEST_CREDENTIAL");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_falls_back_to_inline() {
        // SAFETY: serialised with other env-mutating tests
        unsafe {
            std::env::remove_var("LINGUA_TEST_CREDENTIAL_MISSING");
        }

        let cred = Credential::from_env_or("LINGUA_TEST_CREDENTIAL_MISSING", Some("inline".into()));
        assert_eq!(cred.value(), "inline");

        let cred = Credential::from_env_or("LINGUA_TEST_CREDENTIAL_MISSING", None);
        assert!(!cred.is_set());
    }
}
