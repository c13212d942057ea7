pub const DEFAULT_ENV_FILE: &str = "environment.yml";
pub const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.txt";
pub const DEFAULT_BACKUP_DIR: &str = "backups";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "master";

pub const PROJECT_CONFIG_FILE: &str = "devkit.ini";
pub const GLOBAL_CONFIG_DIR: &str = "devkit";
pub const GLOBAL_CONFIG_FILE: &str = "config.ini";

/// Marker `conda info --envs` puts next to the active environment
pub const ACTIVE_ENV_MARKER: &str = "*";
