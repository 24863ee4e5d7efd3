// Repetition-aware line filtering for device communication logs
//
// Every raw line is categorized by prefix, pushed into one repetition window
// per configured cycle length, and then shown, summarized or suppressed.

mod category;
mod shared;
mod types;
mod window;

pub use category::{
    classify, display_color, Category, ColorId, PrefixRule, CATEGORY_RULES, DEFAULT_COLOR,
};
pub use shared::{SharedProcessor, StreamRegistry};
pub use types::{summary_text, Decision, ProcessedLine, ProcessorStats};
pub use window::RepetitionWindow;

use crate::config::{Config, DisplayConfig, SuppressionConfig};

/// Per-stream classification state
///
/// Owns one repetition window per cycle length plus the last announced
/// repetition count. Construct one per independent log stream.
#[derive(Debug, Clone)]
pub struct LineProcessor {
    display: DisplayConfig,

    /// Counts at or below this are shown verbatim
    threshold: u32,

    /// Summaries are emitted on multiples of this; 0 disables them
    step: u32,

    /// Windows in the order they are consulted (smallest cycle first)
    windows: Vec<RepetitionWindow>,

    /// Count of the last emitted summary, 0 when no streak is active
    last_repeat_count: u32,

    stats: ProcessorStats,
}

impl LineProcessor {
    /// Create a processor from suppression parameters and display flags
    pub fn new(suppression: &SuppressionConfig, display: DisplayConfig) -> Self {
        Self {
            display,
            threshold: suppression.threshold,
            step: suppression.step,
            windows: suppression
                .window_sizes
                .iter()
                .map(|&size| RepetitionWindow::new(size))
                .collect(),
            last_repeat_count: 0,
            stats: ProcessorStats::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.suppression, config.display)
    }

    /// Process one raw line
    ///
    /// The line is pushed into every window, even when a smaller window
    /// already decides the outcome, so all windows keep tracking the stream.
    pub fn process_line(&mut self, line: &str) -> ProcessedLine {
        let category = classify(line);
        let color = display_color(category, &self.display);

        let counts: Vec<(usize, u32)> = self
            .windows
            .iter_mut()
            .map(|window| (window.capacity(), window.push(line)))
            .collect();

        let decision = self.decide(&counts);
        self.stats.record(&decision);

        let text = match decision {
            Decision::Pass => Some(line.to_string()),
            Decision::Summary { window, count } => {
                tracing::debug!(window, count, "Repetition summary emitted");
                Some(summary_text(window, count))
            }
            Decision::Suppress => {
                tracing::trace!(%category, "Repeated line suppressed");
                None
            }
        };

        ProcessedLine {
            text,
            decision,
            category,
            color,
        }
    }

    /// Process one raw line and return the text to display, if any
    ///
    /// Styling is left to the display layer: the returned text is the same
    /// whether or not `styled` is set. Use [`process_line`](Self::process_line)
    /// for the category and color.
    pub fn process(&mut self, line: &str, styled: bool) -> Option<String> {
        let processed = self.process_line(line);
        if styled {
            tracing::trace!(color = %processed.color, "Styled output requested");
        }
        processed.text
    }

    /// Process a batch of lines, returning only the displayable ones
    pub fn filter_lines<I, S>(&mut self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.process_line(line.as_ref()).text)
            .collect()
    }

    /// First window whose count exceeds the threshold decides; larger windows are not consulted
    fn decide(&mut self, counts: &[(usize, u32)]) -> Decision {
        for &(window, count) in counts {
            if count > self.threshold {
                let on_step = self.step != 0 && count % self.step == 0;
                if on_step && count != self.last_repeat_count {
                    self.last_repeat_count = count;
                    return Decision::Summary { window, count };
                }
                return Decision::Suppress;
            }
        }

        if self.last_repeat_count != 0 {
            tracing::debug!(
                last_count = self.last_repeat_count,
                "Repetition streak ended"
            );
        }
        self.last_repeat_count = 0;
        Decision::Pass
    }

    /// Count of the last emitted summary (0 outside a streak)
    pub fn last_repeat_count(&self) -> u32 {
        self.last_repeat_count
    }

    pub fn stats(&self) -> ProcessorStats {
        self.stats
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Cycle lengths tracked, in the order they are consulted
    pub fn window_sizes(&self) -> Vec<usize> {
        self.windows.iter().map(|w| w.capacity()).collect()
    }

    /// Forget all repetition history and counters
    pub fn reset(&mut self) {
        self.windows.iter_mut().for_each(RepetitionWindow::reset);
        self.last_repeat_count = 0;
        self.stats = ProcessorStats::default();
        tracing::debug!("Line processor reset");
    }
}

impl Default for LineProcessor {
    fn default() -> Self {
        Self::new(&SuppressionConfig::default(), DisplayConfig::default())
    }
}
