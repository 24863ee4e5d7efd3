//! ccfilter - repetition-aware filter for device communication logs
//!
//! Takes the chatty status lines a device link produces (every request and
//! response echoed, often the same poll many times per second), categorizes
//! each line by prefix, and collapses repeated lines or short repeating groups
//! of lines into periodic "repeated N times" notices.

pub mod cli;
pub mod config;
pub mod error;
pub mod filtering;

pub use error::{CcFilterError, Result};
pub use filtering::{Category, Decision, LineProcessor, ProcessedLine};
