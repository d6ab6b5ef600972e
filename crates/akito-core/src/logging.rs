//! Logging setup: env_logger, optionally routed through indicatif

use indicatif::MultiProgress;

/// Default log level for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Warnings and errors only (progress bars show activity)
    Quiet,
    Normal,
    Debug,
}

impl Verbosity {
    fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => "info",
            Self::Debug => "debug",
        }
    }
}

/// Short level tag, colored for terminals.
fn level_tag(level: log::Level, color: bool) -> String {
    let (ansi, label) = match level {
        log::Level::Error => ("\x1b[31m", "ERROR"),
        log::Level::Warn => ("\x1b[33m", "WARN "),
        log::Level::Info => ("\x1b[32m", "INFO "),
        log::Level::Debug => ("\x1b[36m", "DEBUG"),
        log::Level::Trace => ("\x1b[35m", "TRACE"),
    };
    if color {
        format!("[{ansi}{label}\x1b[0m]")
    } else {
        format!("[{label}]")
    }
}

/// Logger that prints through `MultiProgress` so lines don't tear progress bars.
pub struct IndicatifLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
}

impl IndicatifLogger {
    pub fn new(inner: env_logger::Logger, multi: MultiProgress) -> Self {
        Self { inner, multi }
    }
}

impl log::Log for IndicatifLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.inner.enabled(record.metadata()) {
            return;
        }
        let line = format!("{} {}", level_tag(record.level(), true), record.args());
        self.multi.suspend(|| eprintln!("{line}"));
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Initialize logging. `RUST_LOG` overrides `verbosity`.
///
/// With `multi` (TTY mode) log lines go through the progress bars;
/// otherwise plain uncolored lines are written to stderr.
pub fn init_logging(verbosity: Verbosity, multi: Option<&MultiProgress>) {
    use std::io::Write;

    let env = env_logger::Env::default().default_filter_or(verbosity.filter());

    match multi {
        Some(multi) => {
            let logger = env_logger::Builder::from_env(env).build();
            let max_level = logger.filter();
            if log::set_boxed_logger(Box::new(IndicatifLogger::new(logger, multi.clone()))).is_ok()
            {
                log::set_max_level(max_level);
            }
        }
        None => {
            let _ = env_logger::Builder::from_env(env)
                .format(|buf, record| {
                    writeln!(buf, "{} {}", level_tag(record.level(), false), record.args())
                })
                .try_init();
        }
    }
}
