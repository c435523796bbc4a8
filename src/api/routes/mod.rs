pub mod analytics;
pub mod generate;
pub mod health;
pub mod nlu;
pub mod transcribe;
pub mod tts;
