//! Logging bootstrap for the timeline core.
//!
//! # Responsibility
//! - Start rolling file logs once per process for the hosting binary.
//! - Route panics into the same log before the default hook runs.
//!
//! # Invariants
//! - Repeating `init_logging` with the same settings is a no-op.
//! - Switching level or directory after start is rejected.
//! - Log lines carry ids and counts only, never record names or event text.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "timeaxis";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

#[derive(Debug)]
pub enum LoggingError {
    InvalidLevel(String),
    InvalidDir(String),
    Start(String),
    /// Logging already runs with different settings.
    Reconfigure(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(raw) => {
                write!(f, "unsupported log level `{raw}`; expected off|error|warn|info|debug|trace")
            }
            Self::InvalidDir(message) => write!(f, "invalid log directory: {message}"),
            Self::Start(message) => write!(f, "failed to start logger: {message}"),
            Self::Reconfigure(message) => write!(f, "logging already started: {message}"),
        }
    }
}

impl std::error::Error for LoggingError {}

struct ActiveLogger {
    level: LevelFilter,
    dir: PathBuf,
    _handle: LoggerHandle,
}

impl ActiveLogger {
    fn ensure_matches(&self, level: LevelFilter, dir: &Path) -> Result<(), LoggingError> {
        if self.dir != dir {
            return Err(LoggingError::Reconfigure(format!(
                "writing to `{}`, not `{}`",
                self.dir.display(),
                dir.display()
            )));
        }
        if self.level != level {
            return Err(LoggingError::Reconfigure(format!(
                "level is `{}`, not `{}`",
                self.level, level
            )));
        }
        Ok(())
    }
}

/// Starts file logging at `level` under `log_dir`.
///
/// Relative directories are resolved against the working directory.
///
/// # Errors
/// - `InvalidLevel` / `InvalidDir` for unusable arguments.
/// - `Start` when the directory or the logger backend cannot be set up.
/// - `Reconfigure` when a previous call used other settings.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    let dir = resolve_log_dir(log_dir.as_ref())?;

    ACTIVE
        .get_or_try_init(|| start(level, &dir))?
        .ensure_matches(level, &dir)
}

/// Active `(level, directory)`, or `None` before `init_logging` succeeded.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    ACTIVE.get().map(|active| (active.level, active.dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
    raw.trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::InvalidLevel(raw.trim().to_string()))
}

fn resolve_log_dir(dir: &Path) -> Result<PathBuf, LoggingError> {
    if dir.as_os_str().is_empty() {
        return Err(LoggingError::InvalidDir("path is empty".to_string()));
    }
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|err| LoggingError::InvalidDir(format!("no working directory: {err}")))?;
    Ok(cwd.join(dir))
}

fn start(level: LevelFilter, dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(dir)
        .map_err(|err| LoggingError::Start(format!("create `{}`: {err}", dir.display())))?;

    let filter = LogSpecification::builder().default(level).build();
    let handle = Logger::with(filter)
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Start(err.to_string()))?;

    PANIC_HOOK.get_or_init(install_panic_hook);

    info!(
        "event=logging_start module=logging status=ok os={} version={} level={} dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level,
        dir.display()
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        error!(
            "event=panic module=logging status=error location={} payload={}",
            location,
            single_line(panic_text(info.payload()), PANIC_PAYLOAD_LIMIT)
        );
        previous(info);
    }));
}

fn panic_text(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Joins lines and cuts `text` to `limit` chars, marking the cut with `...`.
fn single_line(text: &str, limit: usize) -> String {
    let mut line: String = text
        .chars()
        .take(limit)
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
        .collect();
    if text.chars().nth(limit).is_some() {
        line.push_str("...");
    }
    line
}
