use std::io::Write;
use std::path::PathBuf;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::eval::Verdict;
use crate::request::EventRequest;

/// ~/.local/share/permit-gate, if HOME is set.
fn log_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    let dir = std::path::Path::new(&home).join(".local/share/permit-gate");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

fn open_append(name: &str) -> Option<std::fs::File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir()?.join(name))
        .ok()
}

/// Route `log` output to ~/.local/share/permit-gate/permit-gate.log.
/// Best-effort: stdout carries the verdict, so nothing is written there and
/// a logger that cannot be installed is skipped.
pub fn init(level: LevelFilter) {
    let Some(file) = open_append("permit-gate.log") else {
        return;
    };
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = WriteLogger::init(level, config, file);
}

/// Append a decision record to ~/.local/share/permit-gate/decisions.log.
/// Best-effort: failures are silently ignored (logging must never block a
/// decision).
pub fn log_verdict(request: &EventRequest, verdict: &Verdict) {
    let Some(mut file) = open_append("decisions.log") else {
        return;
    };

    let venue = request
        .venue_id
        .as_deref()
        .unwrap_or(request.location.as_str());
    let venue_truncated: String = venue.chars().take(80).collect();
    let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    let _ = writeln!(
        file,
        "{ts}\t{disposition}\t{venue}\t{date}\t{reason}",
        disposition = verdict.disposition.as_str(),
        venue = venue_truncated,
        date = request.start_date.as_deref().unwrap_or("-"),
        reason = verdict.reason(),
    );
}
