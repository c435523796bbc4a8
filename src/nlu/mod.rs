pub mod classifier;

pub use classifier::{Classification, IntentClassifier, CANDIDATE_LABELS};
