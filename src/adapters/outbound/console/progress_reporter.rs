use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::time::Duration;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Writes to stderr so it doesn't interfere with the inventory on stdout.
/// Long waits on the scanning service are shown with an indicatif spinner.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    const TICK: Duration = Duration::from_millis(120);

    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StderrProgressReporter {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{}", message);
    }

    fn report_waiting(&self, message: &str) {
        let mut slot = self.spinner.borrow_mut();
        let spinner = slot.get_or_insert_with(|| {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("   {spinner:.green} {msg}") {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Self::TICK);
            spinner
        });
        spinner.set_message(message.to_string());
    }

    fn report_warning(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{}", message.yellow());
    }

    fn report_completion(&self, message: &str) {
        self.clear_spinner();
        eprintln!();
        eprintln!("{}", message.green());
    }
}
