//! This module spawns the external programs wrapped by devkit.
//!
//! Commands are described by a [`CommandSpec`] (program plus a structured argument list) and
//! handed to a [`CommandRunner`]. No shell is involved, so paths and environment names are never
//! re-interpreted.

use std::{
    ffi::{OsStr, OsString},
    fmt, fs, io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use thiserror::Error;

use crate::{config::ToolConfig, error::ToolError};

/// Where the standard output of a spawned program goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stdout {
    /// Shared with the current process
    Inherit,
    /// Collected and returned in [`Completed::stdout`]
    Capture,
    /// Written to the given file, which is created or truncated first
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub stdout: Stdout,
}

impl CommandSpec {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            stdout: Stdout::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    pub fn capture(mut self) -> Self {
        self.stdout = Stdout::Capture;
        self
    }

    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Stdout::File(path.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Outcome of a program that ran to completion, successfully or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    /// `None` when the program was killed by a signal
    pub code: Option<i32>,
    /// Empty unless the spec asked for [`Stdout::Capture`]
    pub stdout: String,
}

impl Completed {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error(transparent)]
    Launch(io::Error),

    #[error("cannot write output to {}", .path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs a [`CommandSpec`] synchronously, blocking until the program exits.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<Completed, SpawnError>;
}

/// [`SystemRunner`] spawns real processes inside the configured working directory.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    working_dir: PathBuf,
    search_path: Option<OsString>,
}

impl SystemRunner {
    pub fn new(working_dir: impl Into<PathBuf>, search_path: Option<OsString>) -> Self {
        Self {
            working_dir: working_dir.into(),
            search_path,
        }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(&config.working_dir, config.search_path.clone())
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<Completed, SpawnError> {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args).current_dir(&self.working_dir);

        // The child resolves the program against this PATH as well
        if let Some(search_path) = &self.search_path {
            command.env("PATH", search_path);
        }

        log::debug!("running `{}` in {}", spec, self.working_dir.display());

        match &spec.stdout {
            Stdout::Inherit => {
                let status = command.status().map_err(SpawnError::Launch)?;
                Ok(Completed {
                    code: status.code(),
                    stdout: String::new(),
                })
            }
            Stdout::File(path) => {
                let file = fs::File::create(path).map_err(|source| SpawnError::Redirect {
                    path: path.clone(),
                    source,
                })?;
                let status = command
                    .stdout(Stdio::from(file))
                    .status()
                    .map_err(SpawnError::Launch)?;
                Ok(Completed {
                    code: status.code(),
                    stdout: String::new(),
                })
            }
            Stdout::Capture => {
                let output = command
                    .stdout(Stdio::piped())
                    .stderr(Stdio::inherit())
                    .output()
                    .map_err(SpawnError::Launch)?;
                Ok(Completed {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                })
            }
        }
    }
}

/// Run `spec` and turn anything but a zero exit status into a [`ToolError`] tagged with `action`.
pub fn run_checked(
    runner: &impl CommandRunner,
    action: &'static str,
    spec: &CommandSpec,
) -> crate::Result<Completed, ToolError> {
    let completed = runner.run(spec).map_err(|err| match err {
        SpawnError::Launch(source) => ToolError::Spawn {
            action,
            command: spec.to_string(),
            source,
        },
        SpawnError::Redirect { path, source } => ToolError::Io {
            action,
            path,
            source,
        },
    })?;

    if !completed.success() {
        log::debug!("`{}` exited with {:?}", spec, completed.code);
        return Err(ToolError::Exited {
            action,
            command: spec.to_string(),
            code: completed.code,
        });
    }

    Ok(completed)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        cell::RefCell,
        collections::VecDeque,
        fs,
    };

    use super::{CommandRunner, CommandSpec, Completed, SpawnError, Stdout};

    /// Records every spec it is asked to run and replays scripted results in order.
    /// Once the script runs out, every command succeeds with empty output.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        calls: RefCell<Vec<CommandSpec>>,
        replies: RefCell<VecDeque<Completed>>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, code: i32, stdout: &str) -> Self {
            self.replies.borrow_mut().push_back(Completed {
                code: Some(code),
                stdout: stdout.to_string(),
            });
            self
        }

        pub fn calls(&self) -> Vec<CommandSpec> {
            self.calls.borrow().clone()
        }

        pub fn command_lines(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|spec| spec.to_string()).collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, spec: &CommandSpec) -> Result<Completed, SpawnError> {
            self.calls.borrow_mut().push(spec.clone());

            let reply = self.replies.borrow_mut().pop_front().unwrap_or(Completed {
                code: Some(0),
                stdout: String::new(),
            });

            match &spec.stdout {
                Stdout::Capture => Ok(reply),
                Stdout::File(path) => {
                    fs::write(path, &reply.stdout).map_err(|source| SpawnError::Redirect {
                        path: path.clone(),
                        source,
                    })?;
                    Ok(Completed {
                        code: reply.code,
                        stdout: String::new(),
                    })
                }
                Stdout::Inherit => Ok(Completed {
                    code: reply.code,
                    stdout: String::new(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingRunner;
    use super::*;

    #[test]
    fn test_spec_display() {
        let spec = CommandSpec::new("git").args(["push", "-u", "origin", "master"]);
        assert_eq!("git push -u origin master", spec.to_string());
        assert_eq!(Stdout::Inherit, spec.stdout);
    }

    #[test]
    fn test_run_checked_reports_non_zero_exit() {
        let runner = RecordingRunner::new().reply(2, "");
        let spec = CommandSpec::new("git").arg("status");

        let err = run_checked(&runner, "git status", &spec).unwrap_err();
        match err {
            ToolError::Exited { code, command, .. } => {
                assert_eq!(Some(2), code);
                assert_eq!("git status", command);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_run_checked_passes_captured_stdout() {
        let runner = RecordingRunner::new().reply(0, "hello\n");
        let spec = CommandSpec::new("echo").arg("hello").capture();

        let completed = run_checked(&runner, "echo", &spec).unwrap();
        assert_eq!("hello\n", completed.stdout);
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new(dir.path(), None);
        let spec = CommandSpec::new("devkit-definitely-not-a-real-program");

        let err = run_checked(&runner, "probe", &spec).unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
        assert_eq!(1, err.exit_code());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_redirects_stdout_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        let runner = SystemRunner::new(dir.path(), None);
        let spec = CommandSpec::new("echo").arg("exported").stdout_to(&out);

        run_checked(&runner, "echo", &spec).unwrap();
        assert_eq!("exported\n", fs::read_to_string(out).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_uses_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new(dir.path(), None);
        let spec = CommandSpec::new("pwd").capture();

        let completed = run_checked(&runner, "pwd", &spec).unwrap();
        let reported = dunce::canonicalize(completed.stdout.trim()).unwrap();
        assert_eq!(dunce::canonicalize(dir.path()).unwrap(), reported);
        assert_eq!(dir.path(), runner.working_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new(dir.path(), None);
        let spec = CommandSpec::new("false");

        let err = run_checked(&runner, "false", &spec).unwrap_err();
        assert!(matches!(err, ToolError::Exited { code: Some(1), .. }));
    }
}
