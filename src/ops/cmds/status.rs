use crate::{
    error::ToolError,
    ops::Context,
    process::{run_checked, CommandRunner, CommandSpec},
};

/// Show `git status`. The status text goes straight to the terminal.
pub fn git_status<R: CommandRunner>(ctx: &Context<R>) -> crate::Result<(), ToolError> {
    println!("Showing current git status...");
    let spec = CommandSpec::new(&ctx.config().programs.git).arg("status");
    run_checked(ctx.runner(), "git status", &spec)?;
    Ok(())
}
