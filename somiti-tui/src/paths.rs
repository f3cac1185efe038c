//! Platform-specific directory paths.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "somiti";
const APPLICATION: &str = "somiti-tui";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the data directory for persistent application data.
///
/// - Linux: `$XDG_DATA_HOME/somiti-tui` or `~/.local/share/somiti-tui`
/// - macOS: `~/Library/Application Support/org.somiti.somiti-tui`
/// - Windows: `C:\Users\<User>\AppData\Roaming\somiti\somiti-tui\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the path to the log file.
pub fn log_file() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("somiti-tui.log"))
}
