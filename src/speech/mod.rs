pub mod transcriber;

pub use transcriber::{decode_audio, Transcriber, FALLBACK_TRANSCRIPT, STT_INTERNAL_ERROR, STT_UPSTREAM_ERROR};
