//! # scriptbox
//!
//! Shared library behind two small command-line tools:
//! - `file-combiner` aggregates directory contents into one fenced-block
//!   text file, filtered through glob exclusion patterns
//! - `music-manager` interactively edits ID3 tags and renumbers the
//!   3-digit prefixes of MP3 files

pub mod combine;
pub mod error;
pub mod exclude;
pub mod logger;
pub mod music;
pub mod prompt;
pub mod renumber;

pub use error::{Error, Result};
