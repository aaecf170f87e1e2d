//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory conventions over OS-specific locations so the
//! config file lives in the same place on Linux and macOS.

use anyhow::{Result, anyhow};
use std::path::PathBuf;

const APP_DIR: &str = "lingua";

/// Returns the configuration directory for lingua.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/lingua` if `XDG_CONFIG_HOME` is set and non-empty
/// 2. `~/.config/lingua` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("Failed to determine home directory"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_honours_xdg() {
        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        // SAFETY: serialised with other env-mutating tests
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/tmp/xdg-test");
        }

        assert_eq!(config_dir().unwrap(), PathBuf::from("/tmp/xdg-test/lingua"));

        // SAFETY: restore previous value
        unsafe {
            match previous {
                Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_ignores_empty_xdg() {
        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        // SAFETY: serialised with other env-mutating tests
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "");
        }

        let dir = config_dir().unwrap();
        assert!(dir.ends_with(".config/lingua"));

        // SAFETY: restore previous value
        unsafe {
            match previous {
                Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }
}
