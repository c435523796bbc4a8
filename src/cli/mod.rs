pub mod commands;
pub mod ask;
pub mod serve;
pub mod validate;

pub use commands::{Cli, Commands};
