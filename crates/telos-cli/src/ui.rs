use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};

/// Terminal preferences resolved once from the global flags.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLUMNS").ok().as_deref(),
    ));
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

fn resolve(
    flags: &GlobalFlags,
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
    columns: Option<&str>,
) -> UiPrefs {
    let table = flags.format == OutputFormat::Table;
    let table_color = match flags.color {
        ColorMode::Always => table,
        ColorMode::Never => false,
        ColorMode::Auto => table && stdout_tty && !no_color && !flags.quiet,
    };

    // bars draw on stderr, so they never corrupt piped JSON
    let progress = match flags.progress {
        ProgressMode::On => !flags.quiet,
        ProgressMode::Off => false,
        ProgressMode::Auto => stderr_tty && !flags.quiet,
    };

    let term_width = columns
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color,
        progress,
        term_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat, color: ColorMode, progress: ProgressMode) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet: false,
            color,
            progress,
            config: None,
        }
    }

    #[test]
    fn auto_color_needs_a_table_on_a_terminal() {
        let table = flags(OutputFormat::Table, ColorMode::Auto, ProgressMode::Auto);
        assert!(resolve(&table, true, true, false, None).table_color);
        assert!(!resolve(&table, false, true, false, None).table_color);
        assert!(!resolve(&table, true, true, true, None).table_color);

        let json = flags(OutputFormat::Json, ColorMode::Always, ProgressMode::Auto);
        assert!(!resolve(&json, true, true, false, None).table_color);
    }

    #[test]
    fn quiet_disables_progress_even_when_forced() {
        let mut quiet = flags(OutputFormat::Json, ColorMode::Auto, ProgressMode::On);
        assert!(resolve(&quiet, false, false, false, None).progress);
        quiet.quiet = true;
        assert!(!resolve(&quiet, true, true, false, None).progress);
    }

    #[test]
    fn narrow_or_invalid_columns_are_ignored() {
        let table = flags(OutputFormat::Table, ColorMode::Never, ProgressMode::Off);
        assert_eq!(resolve(&table, true, true, false, Some("120")).term_width, Some(120));
        assert_eq!(resolve(&table, true, true, false, Some("20")).term_width, None);
        assert_eq!(resolve(&table, true, true, false, Some("wide")).term_width, None);
    }
}
