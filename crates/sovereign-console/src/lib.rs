//! Agent configuration console: the configuration record, the simulated run
//! panel, and the runner invocation it previews.

pub mod command;
pub mod config;
pub mod model;
pub mod parser;
pub mod render;
pub mod runner;
pub mod template;
