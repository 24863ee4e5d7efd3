// Shared types for the line processor
use serde::Serialize;

use crate::filtering::category::{Category, ColorId};

/// What the processor decided to do with a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Show the line unchanged
    Pass,
    /// Replace the line with a repetition summary
    Summary {
        /// Cycle length of the window that detected the repetition
        window: usize,
        /// Repetition count reported by that window
        count: u32,
    },
    /// Show nothing
    Suppress,
}

/// Result of processing one raw line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedLine {
    /// Text to display, `None` when suppressed
    pub text: Option<String>,
    pub decision: Decision,
    /// Category of the raw input line, computed regardless of the decision
    pub category: Category,
    /// Display color for `category` under the current display flags
    pub color: ColorId,
}

impl ProcessedLine {
    pub fn is_visible(&self) -> bool {
        self.text.is_some()
    }
}

/// Counters accumulated by a processor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessorStats {
    /// Lines received
    pub lines: u64,
    /// Lines shown unchanged
    pub passed: u64,
    /// Lines replaced by a summary
    pub summarized: u64,
    /// Lines withheld
    pub suppressed: u64,
}

impl ProcessorStats {
    pub(crate) fn record(&mut self, decision: &Decision) {
        self.lines += 1;
        match decision {
            Decision::Pass => self.passed += 1,
            Decision::Summary { .. } => self.summarized += 1,
            Decision::Suppress => self.suppressed += 1,
        }
    }

    /// Fraction of lines withheld, 0.0 when nothing was processed
    pub fn suppression_ratio(&self) -> f64 {
        if self.lines == 0 {
            return 0.0;
        }
        self.suppressed as f64 / self.lines as f64
    }
}

/// Summary text replacing a repeated line or group of lines
pub fn summary_text(window: usize, count: u32) -> String {
    if window == 1 {
        format!("- The last message was repeated {} times total", count)
    } else {
        format!(
            "- The last {} messages were repeated {} times total",
            window, count
        )
    }
}
