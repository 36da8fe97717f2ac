use std::path::PathBuf;

/// Environment variable that relocates the command centre's state directory
pub const ROOT_ENV: &str = "COMMAND_CENTRE_ROOT";

/// Returns the directory holding config, session and log files.
///
/// Defaults to `.command-centre` in the working directory unless
/// `COMMAND_CENTRE_ROOT` points somewhere else.
pub fn centre_root() -> PathBuf {
    if let Ok(root) = std::env::var(ROOT_ENV)
        && !root.is_empty()
    {
        PathBuf::from(root)
    } else {
        PathBuf::from(".command-centre")
    }
}

/// Path of the YAML config file
pub fn config_path() -> PathBuf {
    centre_root().join("config.yaml")
}

/// Path of the log file used while the interactive screen owns the terminal
pub fn log_path() -> PathBuf {
    centre_root().join("command-centre.log")
}
