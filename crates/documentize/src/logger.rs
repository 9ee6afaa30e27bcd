//! User-facing reporting.
//!
//! Internal tracing goes straight to the `log` facade. Messages meant for the
//! person running the preprocessor (skipped files, unresolved symbols) go
//! through a [`Reporter`] so hosts can redirect or capture them.

use log::Level;

/// The log target used by [`LogReporter`].
pub const REPORT_TARGET: &str = "documentize";

/// A sink for user-facing messages.
pub trait Reporter {
    fn report(&self, level: Level, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, level: Level, message: &str) {
        (**self).report(level, message);
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&self, level: Level, message: &str) {
        (**self).report(level, message);
    }
}

/// Forwards every message to the `log` facade under [`REPORT_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, level: Level, message: &str) {
        log::log!(target: REPORT_TARGET, level, "{message}");
    }
}

/// Reporter front end that drops `info` and `warn` messages unless verbose.
#[derive(Clone, Copy)]
pub struct Logger<'r> {
    reporter: &'r dyn Reporter,
    verbose: bool,
}

impl<'r> Logger<'r> {
    pub fn new(reporter: &'r dyn Reporter, verbose: bool) -> Self {
        Self { reporter, verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(Level::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.emit(Level::Warn, message.as_ref());
    }

    fn emit(&self, level: Level, message: &str) {
        if self.verbose {
            self.reporter.report(level, message);
        }
    }
}
