//! Progress logging for the conversion pipeline.
//!
//! A process-wide sink writes entries to stderr, either as prefixed text
//! lines or as one JSON object per line. Stdout is left free for the
//! generated script.
//!
//! The pipeline announces each [`Stage`] with [`log_stage`]; every entry
//! logged afterwards is tagged with that stage until the next one begins.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Text-mode marker printed before the message.
    fn marker(self) -> &'static str {
        match self {
            LogLevel::Info => "",
            LogLevel::Success => "✓",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }
}

/// Conversion step an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Read,
    Infer,
    Generate,
    Write,
}

impl Stage {
    fn banner(self) -> &'static str {
        match self {
            Stage::Read => "📖 Reading",
            Stage::Infer => "🔎 Inferring",
            Stage::Generate => "⚙️  Generating",
            Stage::Write => "💾 Writing",
        }
    }
}

/// One line of progress output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    pub message: String,
    /// 0 for stage banners, 1 for their details, 2 for list items
    #[serde(default)]
    pub depth: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            stage: None,
            message: message.into(),
            depth: 1,
        }
    }

    pub fn nested(mut self) -> Self {
        self.depth += 1;
        self
    }
}

/// How entries are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default)]
struct LogState {
    format: LogFormat,
    quiet: bool,
    stage: Option<Stage>,
}

/// Global log sink
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Writes log entries to stderr according to its configuration
pub struct Logger {
    state: Mutex<LogState>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LogState::default()),
        }
    }

    /// Set output format and whether non-error entries are dropped
    pub fn configure(&self, format: LogFormat, quiet: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.format = format;
            state.quiet = quiet;
        }
    }

    fn enter(&self, stage: Stage) {
        if let Ok(mut state) = self.state.lock() {
            state.stage = Some(stage);
        }
    }

    /// Tag the entry with the current stage and write it to stderr
    pub fn log(&self, mut entry: LogEntry) {
        let state = self.state.lock().map(|s| *s).unwrap_or_default();
        entry.stage = entry.stage.or(state.stage);
        if let Some(line) = render(&entry, state.format, state.quiet) {
            eprintln!("{}", line);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Format an entry, or `None` if it is filtered out.
fn render(entry: &LogEntry, format: LogFormat, quiet: bool) -> Option<String> {
    if quiet && entry.level != LogLevel::Error {
        return None;
    }

    match format {
        LogFormat::Text => {
            let indent = "   ".repeat(entry.depth as usize);
            let marker = entry.level.marker();
            if marker.is_empty() {
                Some(format!("{}{}", indent, entry.message))
            } else {
                Some(format!("{}{} {}", indent, marker, entry.message))
            }
        }
        LogFormat::Json => serde_json::to_string(entry).ok(),
    }
}

fn stage_entry(stage: Stage, subject: &str) -> LogEntry {
    let mut entry = LogEntry::new(LogLevel::Info, format!("{} {}...", stage.banner(), subject));
    entry.stage = Some(stage);
    entry.depth = 0;
    entry
}

/// Start a pipeline stage: prints its banner and tags what follows.
pub fn log_stage(stage: Stage, subject: impl AsRef<str>) {
    LOGGER.enter(stage);
    LOGGER.log(stage_entry(stage, subject.as_ref()));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Success, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Warning, msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Error, msg));
}

/// Log one item of a list announced by the previous entry.
pub fn log_item(level: LogLevel, msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(level, msg).nested());
}
