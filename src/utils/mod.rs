pub mod truncation;

pub use truncation::{truncate_chars, truncate_for_log, truncate_for_response};
