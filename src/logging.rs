//! JSON-lines file logger for the `log` facade.
//!
//! The game owns the terminal, so records go to a file: one JSON object per
//! line with `ts` (ms since the Unix epoch), `level`, `target` and `msg`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LogLine<'a> {
    ts: u64,
    level: &'a str,
    target: &'a str,
    msg: String,
}

pub struct JsonLinesLogger {
    level: LevelFilter,
    out: Mutex<Box<dyn Write + Send>>,
}

impl JsonLinesLogger {
    pub fn new(out: Box<dyn Write + Send>, level: LevelFilter) -> Self {
        Self {
            level,
            out: Mutex::new(out),
        }
    }

    /// Logger appending to `path` (created if missing)
    pub fn to_file(path: &Path, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        Ok(Self::new(Box::new(file), level))
    }

    fn encode(record: &Record) -> Option<Vec<u8>> {
        let line = LogLine {
            ts: now_ms(),
            level: record.level().as_str(),
            target: record.target(),
            msg: record.args().to_string(),
        };
        let mut buf = serde_json::to_vec(&line).ok()?;
        buf.push(b'\n');
        Some(buf)
    }
}

impl Log for JsonLinesLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(buf) = Self::encode(record) else {
            return;
        };
        // A poisoned lock or failed write only loses the log line.
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_all(&buf);
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Install the file logger as the global `log` backend.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let logger = JsonLinesLogger::to_file(path, level)?;
    log::set_boxed_logger(Box::new(logger)).map_err(|e| anyhow!("logger already set: {}", e))?;
    log::set_max_level(level);
    Ok(())
}
