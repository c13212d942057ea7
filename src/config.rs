//! # devkit configuration
//!
//! Every operation runs against an explicit [`ToolConfig`] instead of reading the working
//! directory, the active conda environment or `PATH` from the ambient process state.
//!
//! The configuration is assembled from ini files, in increasing precedence:
//!
//! 1. Global config, at `$DEVKIT_GLOBAL_CONFIG` if set, otherwise `<config dir>/devkit/config.ini`
//! 2. Project config, at `<working dir>/devkit.ini`
//!
//! Command line flags are applied on top by the binary.
//!
//! ```ini
//! [core]
//! path = /opt/conda/bin:/usr/bin:/bin
//!
//! [conda]
//! env = analysis
//! output = environment.yml
//!
//! [git]
//! remote = origin
//! branch = master
//!
//! [pip]
//! requirements = requirements.txt
//!
//! [backup]
//! dir = backups
//! exclude = target, *.log
//!
//! [tools]
//! pip = pip3
//! ```

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use ini::Ini;

use crate::constants;

/// Environment variable overriding the location of the global config file
pub const GLOBAL_CONFIG_ENV: &str = "DEVKIT_GLOBAL_CONFIG";

/// Program names for the wrapped tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Programs {
    pub conda: String,
    pub git: String,
    pub pip: String,
    pub cp: String,
}

impl Default for Programs {
    fn default() -> Self {
        Self {
            conda: "conda".to_string(),
            git: "git".to_string(),
            pip: "pip".to_string(),
            cp: "cp".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Directory every command runs in, and the root of the project that gets backed up
    pub working_dir: PathBuf,
    /// Conda environment to export. `None` means "whatever is active"
    pub env_name: Option<String>,
    /// Replaces `PATH` for spawned programs when set
    pub search_path: Option<OsString>,

    pub env_file: PathBuf,
    pub remote: String,
    pub branch: String,
    pub requirements_file: PathBuf,
    pub backup_dir: PathBuf,
    /// Glob patterns matched against top-level entry names skipped by backups
    pub backup_exclude: Vec<String>,

    pub programs: Programs,
}

impl ToolConfig {
    /// Defaults for a project rooted at `working_dir`, without reading any file.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            env_name: None,
            search_path: None,
            env_file: PathBuf::from(constants::DEFAULT_ENV_FILE),
            remote: constants::DEFAULT_REMOTE.to_string(),
            branch: constants::DEFAULT_BRANCH.to_string(),
            requirements_file: PathBuf::from(constants::DEFAULT_REQUIREMENTS_FILE),
            backup_dir: PathBuf::from(constants::DEFAULT_BACKUP_DIR),
            backup_exclude: Vec::new(),
            programs: Programs::default(),
        }
    }

    /// Load the global and project config files for `working_dir`.
    pub fn load(working_dir: impl AsRef<Path>) -> crate::Result<Self> {
        let global_path = global_config_path();
        Self::load_from(working_dir, global_path.as_deref())
    }

    /// Same as [`ToolConfig::load`] with an explicit global config file.
    pub fn load_from(
        working_dir: impl AsRef<Path>,
        global_path: Option<&Path>,
    ) -> crate::Result<Self> {
        let working_dir = dunce::canonicalize(working_dir.as_ref()).with_context(|| {
            format!(
                "Working directory {} is not accessible",
                working_dir.as_ref().display()
            )
        })?;

        let mut config = ToolConfig::new(&working_dir);

        if let Some(global_path) = global_path {
            config.apply_file(global_path)?;
        }
        config.apply_file(&working_dir.join(constants::PROJECT_CONFIG_FILE))?;

        Ok(config)
    }

    /// Resolve `path` against the working directory unless it is already absolute.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    fn apply_file(&mut self, path: &Path) -> crate::Result<()> {
        if !path.is_file() {
            log::debug!("config file {} does not exist, skipping", path.display());
            return Ok(());
        }

        let ini = Ini::load_from_file(path)
            .map_err(|e| anyhow!("Malformed config file {}: {}", path.display(), e))?;
        log::info!("loaded config from {}", path.display());

        self.apply_ini(&ini);
        Ok(())
    }

    fn apply_ini(&mut self, ini: &Ini) {
        let get = |section: &str, key: &str| {
            ini.get_from(Some(section), key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = get("core", "path") {
            self.search_path = Some(OsString::from(path));
        }
        if let Some(env) = get("conda", "env") {
            self.env_name = Some(env.to_string());
        }
        if let Some(output) = get("conda", "output") {
            self.env_file = PathBuf::from(output);
        }
        if let Some(remote) = get("git", "remote") {
            self.remote = remote.to_string();
        }
        if let Some(branch) = get("git", "branch") {
            self.branch = branch.to_string();
        }
        if let Some(requirements) = get("pip", "requirements") {
            self.requirements_file = PathBuf::from(requirements);
        }
        if let Some(dir) = get("backup", "dir") {
            self.backup_dir = PathBuf::from(dir);
        }
        if let Some(exclude) = get("backup", "exclude") {
            self.backup_exclude = exclude
                .split(',')
                .map(str::trim)
                .filter(|pattern| !pattern.is_empty())
                .map(str::to_string)
                .collect();
        }

        let programs = &mut self.programs;
        for (key, slot) in [
            ("conda", &mut programs.conda),
            ("git", &mut programs.git),
            ("pip", &mut programs.pip),
            ("cp", &mut programs.cp),
        ] {
            if let Some(program) = get("tools", key) {
                *slot = program.to_string();
            }
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(GLOBAL_CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|dir| {
        dir.join(constants::GLOBAL_CONFIG_DIR)
            .join(constants::GLOBAL_CONFIG_FILE)
    })
}
