use indicatif::ProgressBar;

use crate::consts::PROGRESS_INTERVAL;

/// Line counter that reports every [PROGRESS_INTERVAL] lines on a spinner.
pub(crate) struct LineProgress {
    bar: ProgressBar,
    unit: &'static str,
}

impl LineProgress {
    pub(crate) fn new(quiet: bool, unit: &'static str) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        LineProgress { bar, unit }
    }

    pub(crate) fn tick(&self, line_number: usize) {
        if line_number % PROGRESS_INTERVAL == 0 {
            self.bar
                .set_message(format!("{} {} parsed", line_number, self.unit));
            self.bar.tick();
        }
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
