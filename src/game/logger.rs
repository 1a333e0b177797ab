//! Match logger
//!
//! Messages are printed to stdout, captured into an in-memory buffer, or
//! both, depending on the output mode. Capture lets tests and the simulator
//! inspect what a match would have printed without scraping stdout.

use crate::game::GameEvent;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;
use std::str::FromStr;

/// Verbosity level for match output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output during the match
    Silent = 0,
    /// Minimal - only the match outcome
    Minimal = 1,
    /// Normal - turns, plays and combat (default)
    #[default]
    Normal = 2,
    /// Verbose - every phase change and AI decision
    Verbose = 3,
}

impl FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!("Invalid verbosity level: {s}")),
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g., "game_event", "ai_choice")
    pub category: Option<String>,
}

/// Read-only access to captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl Deref for LogGuard<'_> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Logger that only captures, for tests and batch simulation
    pub fn capturing(verbosity: VerbosityLevel) -> Self {
        let mut logger = Self::with_verbosity(verbosity);
        logger.output_mode = OutputMode::Memory;
        logger
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Captured entries, in order
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Print buffered entries the current verbosity allows, then clear
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                Self::print(entry.level, &entry.message);
            }
        }
        self.clear_logs();
    }

    fn print(level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{message}");
        } else {
            println!("  {message}");
        }
    }

    /// Whether a message at `level` would be printed or captured
    ///
    /// Callers check this before formatting anything expensive.
    pub fn enabled(&self, level: VerbosityLevel) -> bool {
        level != VerbosityLevel::Silent && (level <= self.verbosity || self.is_capturing())
    }

    pub fn log(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        if !self.enabled(level) {
            return;
        }
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);

        if should_capture {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        }

        if should_output && level <= self.verbosity {
            Self::print(level, message);
        }
    }

    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message, None);
    }

    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message, None);
    }

    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message, None);
    }

    /// Log an engine event
    ///
    /// The match result is Minimal; everything else is Normal. In JSON mode
    /// the event's serialized form is logged instead of its text.
    pub fn event(&self, event: &GameEvent) {
        let level = match event {
            GameEvent::GameOver { .. } => VerbosityLevel::Minimal,
            _ => VerbosityLevel::Normal,
        };
        if !self.enabled(level) {
            return;
        }
        let message = match self.output_format {
            OutputFormat::Text => event.to_string(),
            OutputFormat::Json => serde_json::to_string(event).unwrap_or_else(|_| event.to_string()),
        };
        self.log(level, &message, Some("game_event"));
    }

    pub fn events<'e>(&self, events: impl IntoIterator<Item = &'e GameEvent>) {
        for event in events {
            self.event(event);
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_format", &self.output_format)
            .field("output_mode", &self.output_mode)
            .field("buffered", &self.log_buffer.borrow().len())
            .finish()
    }
}

// Settings are cloned; captured entries are not.
impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_format: self.output_format,
            output_mode: self.output_mode,
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert_eq!(logger.output_mode(), OutputMode::Stdout);
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_capture_keeps_all_levels() {
        let logger = GameLogger::capturing(VerbosityLevel::Minimal);
        logger.minimal("result");
        logger.normal("turn");
        logger.verbose("detail");
        logger.silent_is_dropped();

        let logs = logger.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].level, VerbosityLevel::Minimal);
        assert_eq!(logs[2].message, "detail");
    }

    #[test]
    fn test_event_categories() {
        let logger = GameLogger::capturing(VerbosityLevel::Normal);
        logger.event(&GameEvent::DeckEmpty {
            player: "Alice".to_string(),
        });
        logger.event(&GameEvent::GameOver {
            winner: Some("Alice".to_string()),
        });

        let logs = logger.logs();
        assert_eq!(logs[0].category.as_deref(), Some("game_event"));
        assert_eq!(logs[0].message, "Alice has no more cards to draw");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
    }

    #[test]
    fn test_enabled_levels() {
        let quiet = GameLogger::with_verbosity(VerbosityLevel::Minimal);
        assert!(quiet.enabled(VerbosityLevel::Minimal));
        assert!(!quiet.enabled(VerbosityLevel::Normal));
        assert!(!quiet.enabled(VerbosityLevel::Silent));

        let silent = GameLogger::with_verbosity(VerbosityLevel::Silent);
        assert!(!silent.enabled(VerbosityLevel::Minimal));

        // Capture keeps every level except Silent
        let capture = GameLogger::capturing(VerbosityLevel::Silent);
        assert!(capture.enabled(VerbosityLevel::Verbose));
        assert!(!capture.enabled(VerbosityLevel::Silent));
    }

    #[test]
    fn test_filtered_event_is_skipped() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Minimal);
        logger.set_output_mode(OutputMode::Memory);
        logger.set_verbosity(VerbosityLevel::Silent);
        logger.event(&GameEvent::DeckEmpty {
            player: "Bot".to_string(),
        });
        // Memory mode still captures
        assert_eq!(logger.logs().len(), 1);

        let stdout_only = GameLogger::with_verbosity(VerbosityLevel::Silent);
        stdout_only.event(&GameEvent::GameOver { winner: None });
        assert!(stdout_only.logs().is_empty());
    }

    #[test]
    fn test_json_format() {
        let mut logger = GameLogger::capturing(VerbosityLevel::Normal);
        logger.set_output_format(OutputFormat::Json);
        logger.event(&GameEvent::DeckEmpty {
            player: "Bot".to_string(),
        });
        let value: serde_json::Value = serde_json::from_str(&logger.logs()[0].message).unwrap();
        assert_eq!(value["type"], "deck_empty");
    }

    #[test]
    fn test_clear_and_clone() {
        let mut logger = GameLogger::capturing(VerbosityLevel::Verbose);
        logger.normal("one");
        let copy = logger.clone();
        assert!(copy.logs().is_empty());
        assert_eq!(copy.output_mode(), OutputMode::Memory);
        logger.clear_logs();
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_verbosity_parse() {
        assert_eq!("verbose".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Verbose));
        assert_eq!("0".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Silent));
        assert!("loud".parse::<VerbosityLevel>().is_err());
    }

    impl GameLogger {
        fn silent_is_dropped(&self) {
            self.log(VerbosityLevel::Silent, "never", None);
        }
    }
}
