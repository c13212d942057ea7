//! This module provides the actual implementations of the devkit operations.
//!
//! Each operation wraps exactly one external program (the conda export may additionally list
//! environments first) and runs it synchronously through the [`CommandRunner`] held by a
//! [`Context`].

pub mod cmds;

use crate::{
    config::ToolConfig,
    process::{CommandRunner, SystemRunner},
};

/// [`Context`] bundles the configuration an operation runs against with the runner that spawns
/// its commands.
#[derive(Debug)]
pub struct Context<R = SystemRunner> {
    config: ToolConfig,
    runner: R,
}

impl Context<SystemRunner> {
    pub fn new(config: ToolConfig) -> Self {
        let runner = SystemRunner::from_config(&config);
        Self { config, runner }
    }
}

impl<R: CommandRunner> Context<R> {
    pub fn with_runner(config: ToolConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}
