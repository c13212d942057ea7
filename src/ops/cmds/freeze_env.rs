use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    constants,
    error::ToolError,
    ops::Context,
    process::{run_checked, CommandRunner, CommandSpec},
};

/// How `conda env export` is told which environment to export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSelector {
    Name(String),
    /// Environments created with `--prefix` have no name, only a location
    Prefix(PathBuf),
}

impl fmt::Display for EnvSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvSelector::Name(name) => write!(f, "{}", name),
            EnvSelector::Prefix(prefix) => write!(f, "{}", prefix.display()),
        }
    }
}

/// Export a conda environment definition into `output_file`.
///
/// Without an environment name (neither passed nor configured), the active environment is
/// looked up in `conda info --envs` first. A failed export may leave a partially written file
/// behind. Returns the path the definition was written to.
pub fn freeze_conda_environment<R: CommandRunner>(
    ctx: &Context<R>,
    env_name: Option<&str>,
    output_file: Option<&Path>,
) -> crate::Result<PathBuf, ToolError> {
    let config = ctx.config();
    let output_file = config.resolve(output_file.unwrap_or(config.env_file.as_path()));

    let explicit = env_name
        .filter(|name| !name.is_empty())
        .or(config.env_name.as_deref())
        .filter(|name| !name.is_empty());
    let selector = match explicit {
        Some(name) => EnvSelector::Name(name.to_string()),
        None => resolve_active_environment(ctx)?,
    };

    println!(
        "Exporting conda environment '{}' to '{}'...",
        selector,
        output_file.display()
    );

    let selector_args: [OsString; 2] = match &selector {
        EnvSelector::Name(name) => ["--name".into(), name.into()],
        EnvSelector::Prefix(prefix) => ["--prefix".into(), prefix.as_os_str().to_os_string()],
    };
    let spec = CommandSpec::new(&config.programs.conda)
        .args(["env", "export"])
        .args(selector_args)
        .stdout_to(&output_file);
    run_checked(ctx.runner(), "exporting conda environment", &spec)?;

    println!("Environment saved to '{}'.", output_file.display());
    Ok(output_file)
}

fn resolve_active_environment<R: CommandRunner>(
    ctx: &Context<R>,
) -> crate::Result<EnvSelector, ToolError> {
    let spec = CommandSpec::new(&ctx.config().programs.conda)
        .args(["info", "--envs"])
        .capture();
    let listing = run_checked(ctx.runner(), "listing conda environments", &spec)?;

    let selector =
        parse_active_environment(&listing.stdout).ok_or(ToolError::NoActiveEnvironment)?;
    log::debug!("active conda environment is {:?}", selector);
    Ok(selector)
}

/// Pick the environment marked active from `conda info --envs` output.
///
/// ```text
/// # conda environments:
/// #
/// base                     /opt/conda
/// analysis              *  /opt/conda/envs/analysis
/// ```
pub fn parse_active_environment(listing: &str) -> Option<EnvSelector> {
    for line in listing.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if !tokens.contains(&constants::ACTIVE_ENV_MARKER) {
            continue;
        }

        // An unnamed environment is listed as `*  /path/to/prefix`
        if tokens[0] == constants::ACTIVE_ENV_MARKER {
            let prefix = line[constants::ACTIVE_ENV_MARKER.len()..].trim();
            if prefix.is_empty() {
                return None;
            }
            return Some(EnvSelector::Prefix(PathBuf::from(prefix)));
        }

        return Some(EnvSelector::Name(tokens[0].to_string()));
    }

    None
}
