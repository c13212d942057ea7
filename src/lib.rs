pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod ops;
pub mod process;

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
