//! Shared types for the tirea Na'vi morphology analyzer.
//!
//! # Architecture
//!
//! - [`analysis`] -- The analysis record produced by the matcher, with the
//!   comparison helpers used for phrase templates
//! - [`lenition`] -- Initial consonant mutation and cluster safety checks
//! - [`character`] -- Punctuation and vowel classification

pub mod analysis;
pub mod character;
pub mod lenition;

pub use analysis::Analysis;
