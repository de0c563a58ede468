
use crate::app::App;

use andr_config::Config;

use std::env;
use std::path::Path;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// App whose session and pin files live in `dir`.
pub(crate) fn app_in(dir: &Path, config: Config) -> App {
    App::new(config, dir.join("session.json"), dir.join("pins.json"))
}

/// App with default config whose files live in a fresh temp dir.
pub(crate) fn app_in_temp_dir() -> (TempDir, App) {
    let temp = TempDir::new().unwrap();
    let app = app_in(temp.path(), Config::default());
    (temp, app)
}
