use std::path::{Path, PathBuf};

use crate::{
    error::ToolError,
    ops::Context,
    process::{run_checked, CommandRunner, CommandSpec},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(PathBuf),
    /// The requirements file does not exist, nothing was run
    MissingFile(PathBuf),
}

/// Install the packages listed in a requirements file with `pip install -r`.
///
/// A missing requirements file is not an error: a message is printed and pip is never spawned.
pub fn install_requirements<R: CommandRunner>(
    ctx: &Context<R>,
    requirements_file: Option<&Path>,
) -> crate::Result<InstallOutcome, ToolError> {
    let config = ctx.config();
    let requirements_file =
        config.resolve(requirements_file.unwrap_or(config.requirements_file.as_path()));

    if !requirements_file.exists() {
        println!(
            "Requirements file '{}' not found.",
            requirements_file.display()
        );
        return Ok(InstallOutcome::MissingFile(requirements_file));
    }

    println!(
        "Installing dependencies from '{}'...",
        requirements_file.display()
    );
    let spec = CommandSpec::new(&config.programs.pip)
        .args(["install", "-r"])
        .arg(&requirements_file);
    run_checked(ctx.runner(), "installing dependencies", &spec)?;

    println!("Dependencies installed successfully.");
    Ok(InstallOutcome::Installed(requirements_file))
}
