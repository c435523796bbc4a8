pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm;
pub mod nlu;
pub mod speech;
pub mod utils;
