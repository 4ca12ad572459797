pub mod cli;
pub mod config;
pub mod registry;
pub mod session;
