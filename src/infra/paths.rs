// src/infra/paths.rs — Path management
//
// All paths respect the TABIJI_HOME environment variable for isolation.
// When unset, config lives under ~/.tabiji/.

use std::path::PathBuf;

/// Returns the TABIJI_HOME override, if set.
fn tabiji_home() -> Option<PathBuf> {
    std::env::var_os("TABIJI_HOME").map(PathBuf::from)
}

/// Configuration directory: $TABIJI_HOME/ or ~/.tabiji/
pub fn config_dir() -> PathBuf {
    if let Some(home) = tabiji_home() {
        return home;
    }
    dirs_home().join(".tabiji")
}

/// Home directory
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .to_path_buf()
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
