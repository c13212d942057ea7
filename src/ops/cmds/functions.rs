const HELP_TEXT: &str = "
Available operations:
- freeze-env [--name <env>] [--output <file>]: Export a conda environment to environment.yml.
- pull: Run a git pull from origin/master.
- push: Run a git push to origin/master, setting the upstream branch.
- install [<file>]: Install dependencies from requirements.txt.
- status: Show the git status.
- backup [<dir>]: Back up the current project into backups/.
";

pub fn help_text() -> &'static str {
    HELP_TEXT
}

/// Print the static list of operations. Never spawns anything.
pub fn show_help() {
    println!("{}", HELP_TEXT);
}
