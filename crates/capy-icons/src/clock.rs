//! Clock and locale source.

use chrono::Datelike;

const FALLBACK_LOCALE: &str = "en-US";

/// Source of the calendar day and the current locale.
pub trait Clock: Send + Sync {
    /// Day of month, 1-based.
    fn day_of_month(&self) -> u32;

    /// Current locale as a canonical language-region tag.
    fn locale(&self) -> String;

    /// Zero-based day of month, used to index override tables.
    fn day_index(&self) -> usize {
        self.day_of_month().saturating_sub(1) as usize
    }
}

/// Local wall clock and POSIX locale environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn day_of_month(&self) -> u32 {
        chrono::Local::now().day()
    }

    fn locale(&self) -> String {
        let raw = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_default();

        canonical_locale(&raw)
    }
}

/// Normalise a POSIX locale ("en_US.UTF-8@euro") to "en-US".
pub fn canonical_locale(raw: &str) -> String {
    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "C" || base == "POSIX" {
        return FALLBACK_LOCALE.to_string();
    }

    base.replace('_', "-")
}
