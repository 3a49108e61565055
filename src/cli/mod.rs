pub mod commands;

pub use commands::{Cli, OutputFormat, run};
