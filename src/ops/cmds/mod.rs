mod backup;
mod freeze_env;
mod functions;
mod install;
mod pull;
mod push;
mod status;

pub use backup::backup_project;
pub use freeze_env::{freeze_conda_environment, parse_active_environment, EnvSelector};
pub use functions::{help_text, show_help};
pub use install::{install_requirements, InstallOutcome};
pub use pull::git_pull;
pub use push::git_push_master;
pub use status::git_status;
