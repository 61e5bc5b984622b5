use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Batch progress bar; a no-op when progress is disabled.
pub struct Progress {
    bar: Option<ProgressBar>,
}

fn bar_template(columns: Option<usize>) -> &'static str {
    match columns {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    #[must_use]
    pub const fn hidden() -> Self {
        Self { bar: None }
    }

    /// A bar over `total` theories, shown only when the UI allows progress.
    #[must_use]
    pub fn bar(total: u64, message: &str) -> Self {
        let prefs = ui::prefs();
        if !prefs.progress {
            return Self::hidden();
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(bar_template(prefs.term_width))
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wider_terminals_show_counts() {
        assert!(bar_template(Some(120)).contains("{pos}/{len}"));
        assert!(bar_template(Some(90)).contains("{pos}/{len}"));
        assert!(bar_template(None).contains("{percent}%"));
    }

    #[test]
    fn hidden_progress_ignores_updates() {
        let progress = Progress::hidden();
        progress.set_message("t1");
        progress.inc(1);
        progress.finish_clear();
        assert!(progress.bar.is_none());
    }
}
