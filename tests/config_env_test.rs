//! Configuration precedence through environment variables.
//!
//! These tests mutate the process environment, so they live in their own
//! test binary and take a shared lock.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use workforce_access::{AppConfig, CONFIG_ENV, Error, STORAGE_DIR_ENV};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the lock and restores both variables on drop.
struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn acquire() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(STORAGE_DIR_ENV);
        Self { _lock: lock }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(STORAGE_DIR_ENV);
    }
}

#[test]
fn no_env_and_no_flags_gives_defaults() {
    let _env = EnvGuard::acquire();
    assert_eq!(AppConfig::resolve(None, None).unwrap(), AppConfig::default());
}

#[test]
fn env_config_file_is_loaded() {
    let _env = EnvGuard::acquire();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workforce.toml");
    std::fs::write(&path, "storage_key = \"from-env\"\nstorage_dir = \"env-dir\"\n").unwrap();
    std::env::set_var(CONFIG_ENV, &path);

    let config = AppConfig::resolve(None, None).unwrap();
    assert_eq!(config.storage_key, "from-env");
    assert_eq!(config.storage_dir, PathBuf::from("env-dir"));
}

#[test]
fn env_storage_dir_overrides_file_value() {
    let _env = EnvGuard::acquire();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workforce.toml");
    std::fs::write(&path, "storage_dir = \"file-dir\"\n").unwrap();
    std::env::set_var(STORAGE_DIR_ENV, "env-dir");

    let config = AppConfig::resolve(Some(path), None).unwrap();
    assert_eq!(config.storage_dir, PathBuf::from("env-dir"));
}

#[test]
fn cli_values_win_over_env() {
    let _env = EnvGuard::acquire();
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join("env.toml");
    let cli_file = dir.path().join("cli.toml");
    std::fs::write(&env_file, "storage_key = \"from-env\"\n").unwrap();
    std::fs::write(&cli_file, "storage_key = \"from-cli\"\n").unwrap();
    std::env::set_var(CONFIG_ENV, &env_file);
    std::env::set_var(STORAGE_DIR_ENV, "env-dir");

    let config = AppConfig::resolve(Some(cli_file), Some(PathBuf::from("cli-dir"))).unwrap();
    assert_eq!(config.storage_key, "from-cli");
    assert_eq!(config.storage_dir, PathBuf::from("cli-dir"));
}

#[test]
fn missing_env_config_file_is_an_error() {
    let _env = EnvGuard::acquire();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(CONFIG_ENV, dir.path().join("absent.toml"));

    let err = AppConfig::resolve(None, None).unwrap_err();
    assert!(matches!(err, Error::Config(msg) if msg.contains("absent.toml")));
}
