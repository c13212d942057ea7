use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;

use crate::{
    error::ToolError,
    ops::Context,
    process::{run_checked, CommandRunner, CommandSpec},
};

/// Copy the project tree into `backup_dir` with a single `cp -r`.
///
/// The backup directory is created if needed, so repeated backups into the same place simply
/// overwrite the previous copy. It is never copied into itself. Returns the backup directory.
pub fn backup_project<R: CommandRunner>(
    ctx: &Context<R>,
    backup_dir: Option<&Path>,
) -> crate::Result<PathBuf, ToolError> {
    let config = ctx.config();
    let backup_dir = config.resolve(backup_dir.unwrap_or(config.backup_dir.as_path()));

    fs::create_dir_all(&backup_dir).map_err(|source| ToolError::Io {
        action: "creating backup directory",
        path: backup_dir.clone(),
        source,
    })?;

    let backup_dir = canonicalize(&backup_dir)?;
    let root = canonicalize(&config.working_dir)?;
    if backup_dir == root {
        return Err(ToolError::BackupIsProject { backup_dir });
    }
    let excludes = compile_excludes(&config.backup_exclude);

    let entries = project_entries(&root, &backup_dir, &excludes)?;
    if entries.is_empty() {
        println!("Nothing to back up in '{}'.", root.display());
        return Ok(backup_dir);
    }

    let spec = CommandSpec::new(&config.programs.cp)
        .args(["-r", "--"])
        .args(&entries)
        .arg(&backup_dir);
    run_checked(ctx.runner(), "backing up project", &spec)?;

    println!("Project backed up to '{}'.", backup_dir.display());
    Ok(backup_dir)
}

fn canonicalize(path: &Path) -> crate::Result<PathBuf, ToolError> {
    dunce::canonicalize(path).map_err(|source| ToolError::Io {
        action: "resolving backup paths",
        path: path.to_path_buf(),
        source,
    })
}

fn compile_excludes(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|pattern| match Pattern::new(pattern) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                log::warn!("ignoring invalid backup exclude pattern {:?}: {}", pattern, e);
                None
            }
        })
        .collect()
}

/// Top-level entry names of `root` that go into the backup, sorted.
fn project_entries(
    root: &Path,
    backup_dir: &Path,
    excludes: &[Pattern],
) -> crate::Result<Vec<OsString>, ToolError> {
    let io_err = |source: std::io::Error| ToolError::Io {
        action: "reading project directory",
        path: root.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(root).map_err(io_err)? {
        let name = entry.map_err(io_err)?.file_name();
        let path = root.join(&name);

        if path == backup_dir {
            continue;
        }

        // An excluded entry is never copied, so it may hold the backup directory
        let lossy = name.to_string_lossy();
        if excludes.iter().any(|pattern| pattern.matches(&lossy)) {
            log::debug!("excluding {} from backup", path.display());
            continue;
        }

        if backup_dir.starts_with(&path) {
            return Err(ToolError::NestedBackup {
                backup_dir: backup_dir.to_path_buf(),
                entry: path,
            });
        }

        entries.push(name);
    }

    entries.sort();
    Ok(entries)
}
