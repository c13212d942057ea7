use clap::Parser;
use devkit::{
    cli::{self, DevkitCommand},
    config::ToolConfig,
    error::ToolError,
    ops::{cmds, Context},
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::DevkitCli::parse();

    if let Err(e) = run(cli) {
        println!("error: {:#}", e);
        let code = e.downcast_ref::<ToolError>().map_or(1, ToolError::exit_code);
        std::process::exit(code);
    }
}

fn run(cli: cli::DevkitCli) -> devkit::Result<()> {
    let Some(command) = cli.command else {
        cmds::show_help();
        return Ok(());
    };

    let work_dir = match cli.work_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let mut config = ToolConfig::load(work_dir)?;
    if let Some(search_path) = cli.search_path {
        config.search_path = Some(search_path);
    }
    log::debug!("running with {:?}", config);

    let ctx = Context::new(config);

    match command {
        DevkitCommand::FreezeEnv(cli::FreezeEnvArgs { name, output }) => {
            cmds::freeze_conda_environment(&ctx, name.as_deref(), output.as_deref())?;
        }
        DevkitCommand::Push => cmds::git_push_master(&ctx)?,
        DevkitCommand::Pull => cmds::git_pull(&ctx)?,
        DevkitCommand::Install(cli::InstallArgs { requirements_file }) => {
            cmds::install_requirements(&ctx, requirements_file.as_deref())?;
        }
        DevkitCommand::Status => cmds::git_status(&ctx)?,
        DevkitCommand::Backup(cli::BackupArgs { backup_dir }) => {
            cmds::backup_project(&ctx, backup_dir.as_deref())?;
        }
        DevkitCommand::Functions => cmds::show_help(),
    }

    Ok(())
}
