use crate::{
    error::ToolError,
    ops::Context,
    process::{run_checked, CommandRunner, CommandSpec},
};

/// `git push -u <remote> <branch>`, which also records the remote branch as upstream.
pub fn git_push_master<R: CommandRunner>(ctx: &Context<R>) -> crate::Result<(), ToolError> {
    let config = ctx.config();

    println!("Pushing to '{}/{}' with 'git push'...", config.remote, config.branch);
    let spec = CommandSpec::new(&config.programs.git).args([
        "push",
        "-u",
        config.remote.as_str(),
        config.branch.as_str(),
    ]);
    run_checked(ctx.runner(), "git push", &spec)?;

    println!("Repository pushed successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::{config::ToolConfig, process::testing::RecordingRunner};

    #[test]
    fn test_push_sets_upstream() {
        let dir = tempdir().unwrap();
        let ctx = Context::with_runner(ToolConfig::new(dir.path()), RecordingRunner::new());

        git_push_master(&ctx).unwrap();

        assert_eq!(
            vec!["git push -u origin master".to_string()],
            ctx.runner().command_lines()
        );
    }

    #[test]
    fn test_push_uses_configured_remote_and_branch() {
        let dir = tempdir().unwrap();
        let mut config = ToolConfig::new(dir.path());
        config.remote = "upstream".to_string();
        config.branch = "main".to_string();
        let ctx = Context::with_runner(config, RecordingRunner::new());

        git_push_master(&ctx).unwrap();

        assert_eq!(
            vec!["git push -u upstream main".to_string()],
            ctx.runner().command_lines()
        );
    }

    #[test]
    fn test_rejected_push_fails() {
        let dir = tempdir().unwrap();
        let ctx = Context::with_runner(
            ToolConfig::new(dir.path()),
            RecordingRunner::new().reply(1, ""),
        );

        let err = git_push_master(&ctx).unwrap_err();
        assert_eq!(
            "git push: `git push -u origin master` exited with status 1",
            err.to_string()
        );
        assert_eq!(1, err.exit_code());
    }
}
