//! Progress reporting while a request is in flight

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use persevan_application::TurnOutcome;
use persevan_domain::ConsoleMode;
use std::time::Duration;

/// Spinner shown during the reasoning phase of a request.
///
/// Hidden spinners (`quiet` or non-interactive runs) accept the same
/// calls and draw nothing.
pub struct ReasoningSpinner {
    bar: ProgressBar,
}

impl ReasoningSpinner {
    pub fn new(mode: ConsoleMode, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(Self::spinner_style());
        bar.set_prefix("Reasoning phase");
        bar.set_message(format!("({})", mode.directive_label()));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Note that cancellation was requested but has not settled yet
    pub fn cancelling(&self) {
        self.bar.set_message(format!("{}", "cancelling...".yellow()));
    }

    /// Stop the spinner, leaving a one-line status behind.
    pub fn finish(self, outcome: TurnOutcome) {
        let status = match outcome {
            TurnOutcome::Answered => format!("{} reply received", "v".green()),
            TurnOutcome::EmptyFallback => format!("{} empty reply", "!".yellow()),
            TurnOutcome::Failed => format!("{} request failed", "x".red()),
            TurnOutcome::TimedOut => format!("{} request timed out", "x".red()),
            TurnOutcome::Cancelled => format!("{} cancelled", "x".yellow()),
        };
        self.bar.finish_with_message(status);
    }

    /// Remove the spinner without a status line
    pub fn clear(self) {
        self.bar.finish_and_clear();
    }
}
