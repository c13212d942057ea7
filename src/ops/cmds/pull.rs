use crate::{
    error::ToolError,
    ops::Context,
    process::{run_checked, CommandRunner, CommandSpec},
};

pub fn git_pull<R: CommandRunner>(ctx: &Context<R>) -> crate::Result<(), ToolError> {
    let config = ctx.config();

    println!("Updating repository with 'git pull'...");
    let spec = CommandSpec::new(&config.programs.git).args([
        "pull",
        config.remote.as_str(),
        config.branch.as_str(),
    ]);
    run_checked(ctx.runner(), "git pull", &spec)?;

    println!("Repository updated successfully.");
    Ok(())
}
