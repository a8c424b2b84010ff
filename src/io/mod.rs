//! File output for sizing results.

pub mod export;
