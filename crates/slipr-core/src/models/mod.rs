//! Data models shared across the pipeline.

pub mod bank;
pub mod config;
pub mod record;
pub mod transcript;

pub use bank::Bank;
pub use record::SlipRecord;
pub use transcript::Transcript;
