//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `timeaxis_core` linkage with deterministic output.
//! - With a database path, load the store, chart every record and print
//!   both layouts. Charting works on a snapshot and never writes.
//!
//! Usage: `timeaxis_cli [--log-dir DIR] [DB_PATH] [VIEWPORT_WIDTH]`

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use timeaxis_core::db::open_db;
use timeaxis_core::store::reduce;
use timeaxis_core::{
    current_year, default_log_level, init_logging, Command, LayoutMode, RecordStore,
    RecordsState, SelectorCache, SlotRepository, SqliteSlotRepository, StoreConfig,
    TimelineConfig, TimelineView,
};

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    log_dir: Option<PathBuf>,
    db_path: Option<String>,
    viewport_width: Option<f64>,
}

fn main() -> ExitCode {
    println!("timeaxis_core ping={}", timeaxis_core::ping());
    println!("timeaxis_core version={}", timeaxis_core::core_version());

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = &args.log_dir {
        if let Err(message) = start_logging(dir) {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    }

    let Some(db_path) = args.db_path else {
        return ExitCode::SUCCESS;
    };
    let viewport_width = args
        .viewport_width
        .unwrap_or(TimelineConfig::default().viewport_width);

    match run(&db_path, viewport_width) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut positional = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--log-dir" {
            let dir = args.next().ok_or("--log-dir needs a directory")?;
            parsed.log_dir = Some(PathBuf::from(dir));
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    parsed.db_path = positional.next();
    parsed.viewport_width = positional
        .next()
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|err| format!("invalid viewport width `{raw}`: {err}"))
        })
        .transpose()?;
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument `{extra}`"));
    }
    Ok(parsed)
}

fn start_logging(dir: &Path) -> Result<(), String> {
    init_logging(default_log_level(), dir).map_err(|err| err.to_string())?;
    println!("logging level={} dir={}", default_log_level(), dir.display());
    Ok(())
}

/// Marks every loaded record selected on a detached snapshot.
fn chart_everything<S: SlotRepository>(store: &RecordStore<S>) -> Result<RecordsState, String> {
    let snapshot = store.snapshot();
    let ids = snapshot.records().iter().map(|record| record.id).collect();
    reduce(&snapshot, Command::RestoreSelection(ids)).map_err(|err| err.notice().message)
}

fn run(db_path: &str, viewport_width: f64) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| format!("open failed: {err}"))?;
    let mut store = RecordStore::new(SqliteSlotRepository::new(&conn), StoreConfig::default())
        .map_err(|err| err.notice().message)?;
    store.load().map_err(|err| err.notice().message)?;

    let charted = chart_everything(&store)?;
    let mut cache = SelectorCache::new();
    let view = cache.view(&charted, current_year());
    let mut timeline = TimelineView::new(TimelineConfig {
        viewport_width,
        ..TimelineConfig::default()
    })
    .map_err(|err| err.to_string())?;

    println!("{}", view.history_range());
    for mode in [LayoutMode::Chronicle, LayoutMode::AlignLeft] {
        let layout = timeline.set_mode(mode, &view);
        println!("mode={mode} rows={} events={}", layout.rows.len(), layout.events.len());
        for row in &layout.rows {
            println!(
                "  {} x1={:.1} x2={:.1} y={:.0}",
                row.label.text, row.start_x, row.end_x, row.top_y
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{chart_everything, parse_args, start_logging, CliArgs};
    use std::path::PathBuf;
    use timeaxis_core::db::open_db_in_memory;
    use timeaxis_core::{logging_status, RecordStore, SlotRepository, SqliteSlotRepository};

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_arguments_means_ping_only() {
        assert_eq!(parse_args(args(&[])).unwrap(), CliArgs::default());
    }

    #[test]
    fn log_dir_flag_may_appear_anywhere() {
        let parsed = parse_args(args(&["app.db", "--log-dir", "/tmp/logs", "900"])).unwrap();
        assert_eq!(parsed.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(parsed.db_path.as_deref(), Some("app.db"));
        assert_eq!(parsed.viewport_width, Some(900.0));
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(parse_args(args(&["--log-dir"])).is_err());
        assert!(parse_args(args(&["app.db", "wide"]))
            .unwrap_err()
            .contains("invalid viewport width"));
        assert!(parse_args(args(&["app.db", "900", "extra"])).is_err());
    }

    #[test]
    fn log_dir_starts_file_logging() {
        let dir = tempfile::tempdir().unwrap();
        start_logging(dir.path()).unwrap();
        let (_, active) = logging_status().unwrap();
        assert_eq!(active, dir.path());
    }

    #[test]
    fn charting_selects_everything_without_writing_selection() {
        let conn = open_db_in_memory().unwrap();
        let slots = SqliteSlotRepository::new(&conn);
        let mut store = RecordStore::with_defaults(&slots);
        let loaded = store.load().unwrap().len();

        let charted = chart_everything(&store).unwrap();
        assert_eq!(charted.selected_ids().len(), loaded);
        assert!(store.snapshot().selected_ids().is_empty());

        let selection_slot = store.config().selection_slot.clone();
        assert!(slots.read_slot(&selection_slot).unwrap().is_none());
        assert!(slots
            .read_slot(&store.config().records_slot)
            .unwrap()
            .is_none());
    }
}
