pub mod types;

pub use types::VoiceError;
