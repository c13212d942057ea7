use std::{ffi::OsString, path::PathBuf};

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
pub struct DevkitCli {
    /// Run as if devkit was started in <WORK_DIR>
    #[arg(short = 'C', long, global = true)]
    pub work_dir: Option<PathBuf>,

    /// Search path for the wrapped programs, replacing PATH
    #[arg(long, global = true)]
    pub search_path: Option<OsString>,

    #[command(subcommand)]
    pub command: Option<DevkitCommand>,
}

#[derive(Subcommand, Clone)]
pub enum DevkitCommand {
    /// Export a conda environment definition to a YAML file
    FreezeEnv(FreezeEnvArgs),
    /// Push to the configured remote branch, setting it as upstream
    Push,
    /// Pull the configured remote branch into the working tree
    Pull,
    /// Install dependencies from a requirements file with pip
    Install(InstallArgs),
    /// Show the git status of the working tree
    Status,
    /// Copy the project tree into a backup directory
    Backup(BackupArgs),
    /// List the available operations
    Functions,
}

#[derive(Args, Clone)]
pub struct FreezeEnvArgs {
    /// Environment to export, defaults to the active one
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// File to write the environment definition to
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct InstallArgs {
    /// Requirements file, defaults to requirements.txt
    pub requirements_file: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct BackupArgs {
    /// Backup directory, defaults to backups
    pub backup_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        DevkitCli::command().debug_assert();
    }

    #[test]
    fn test_no_command_means_functions() {
        let cli = DevkitCli::try_parse_from(["devkit"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_functions_is_a_regular_command() {
        let cli = DevkitCli::try_parse_from(["devkit", "functions"]).unwrap();
        assert!(matches!(cli.command, Some(DevkitCommand::Functions)));
    }

    #[test]
    fn test_parse_freeze_env() {
        let cli =
            DevkitCli::try_parse_from(["devkit", "-C", "/tmp/project", "freeze-env", "-n", "ml"])
                .unwrap();

        assert_eq!(Some(PathBuf::from("/tmp/project")), cli.work_dir);
        match cli.command {
            Some(DevkitCommand::FreezeEnv(args)) => {
                assert_eq!(Some("ml".to_string()), args.name);
                assert_eq!(None, args.output);
            }
            _ => panic!("expected freeze-env"),
        }
    }

    #[test]
    fn test_parse_backup_with_global_flag_after_command() {
        let cli = DevkitCli::try_parse_from([
            "devkit",
            "backup",
            "snapshots",
            "--search-path",
            "/usr/bin",
        ])
        .unwrap();

        assert_eq!(Some(OsString::from("/usr/bin")), cli.search_path);
        match cli.command {
            Some(DevkitCommand::Backup(args)) => {
                assert_eq!(Some(PathBuf::from("snapshots")), args.backup_dir)
            }
            _ => panic!("expected backup"),
        }
    }
}
