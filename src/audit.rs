//! Blacklist audit logging
//!
//! Every denied action produces one [`AuditEntry`]. Entries go to an
//! [`AuditSink`]; the default [`AuditLogger`] echoes them to the console
//! through `tracing` and appends them as JSONL to a size-rotated file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::config::AuditConfig;
use crate::item::ItemId;
use crate::rules::ActionKind;

/// Tracing target for console echo of audit records
pub const AUDIT_TARGET: &str = "worldprotect::blacklist";

/// Log level for audit entries. Only denied actions are audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Blocked,
}

/// An audit log entry
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the decision
    pub timestamp: DateTime<Utc>,

    /// Always BLOCKED
    pub level: LogLevel,

    /// Actor that attempted the action
    pub actor: String,

    /// Block or item the rule is attached to
    pub item: ItemId,

    /// Kind of action attempted
    pub action: ActionKind,

    /// Always "deny"
    pub decision: &'static str,

    /// Reason for the decision
    pub reason: String,
}

impl AuditEntry {
    /// Create an audit entry for a denied action
    pub fn denied(actor: &str, item: ItemId, action: ActionKind, reason: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level: LogLevel::Blocked,
            actor: actor.to_string(),
            item,
            action,
            decision: "deny",
            reason: reason.into(),
        }
    }

    /// One-line human readable form
    pub fn summary(&self) -> String {
        format!(
            "{} tried {} on item {}: {}",
            self.actor, self.action, self.item, self.decision
        )
    }
}

/// Destination for audit entries
pub trait AuditSink: Send + Sync {
    /// Record one entry
    fn write(&self, entry: &AuditEntry) -> Result<(), std::io::Error>;
}

/// Discards every entry
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudit;

impl AuditSink for NullAudit {
    fn write(&self, _entry: &AuditEntry) -> Result<(), std::io::Error> {
        Ok(())
    }
}

/// Keeps entries in memory
#[derive(Debug, Default)]
pub struct MemoryAudit {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded entries
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all recorded entries
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl AuditSink for MemoryAudit {
    fn write(&self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
        Ok(())
    }
}

/// JSONL file that rolls over once it reaches a size limit.
///
/// Rolled files are named `<path>.1` (newest) up to `<path>.<count - 1>`.
struct RotatingFile {
    path: PathBuf,
    limit: u64,
    count: u32,
    writer: BufWriter<File>,
    written: u64,
}

impl RotatingFile {
    fn open(path: &Path, limit: u64, count: u32) -> Result<Self, std::io::Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            limit,
            count,
            writer: BufWriter::new(file),
            written,
        })
    }

    fn rolled(&self, n: u32) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> Result<(), std::io::Error> {
        self.writer.flush()?;

        if self.count > 1 {
            let oldest = self.rolled(self.count - 1);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for n in (1..self.count - 1).rev() {
                let from = self.rolled(n);
                if from.exists() {
                    fs::rename(&from, self.rolled(n + 1))?;
                }
            }
            match fs::rename(&self.path, self.rolled(1)) {
                Ok(()) => {}
                // Active file removed underneath us; start a fresh one
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.writer = BufWriter::new(file);
        self.written = 0;
        Ok(())
    }

    fn append(&mut self, line: &str) -> Result<(), std::io::Error> {
        let len = line.len() as u64 + 1;
        if self.limit > 0 && self.written > 0 && self.written + len > self.limit {
            self.rotate()?;
        }

        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        self.written += len;
        Ok(())
    }
}

/// Audit logger
pub struct AuditLogger {
    console: bool,
    file: Option<Mutex<RotatingFile>>,
}

impl AuditLogger {
    /// Create a logger from the audit configuration.
    ///
    /// A log file that cannot be opened is reported and skipped.
    pub fn new(config: &AuditConfig) -> Self {
        let file = config.file_path().and_then(|path| {
            match RotatingFile::open(&path, config.file_limit, config.file_count) {
                Ok(file) => Some(Mutex::new(file)),
                Err(e) => {
                    tracing::warn!(
                        "Could not open blacklist log file {}: {}",
                        path.display(),
                        e
                    );
                    None
                }
            }
        });

        Self {
            console: config.console,
            file,
        }
    }

    /// Log entries to the console only
    pub fn console() -> Self {
        Self {
            console: true,
            file: None,
        }
    }

    /// Check if file logging is enabled
    pub fn is_file_enabled(&self) -> bool {
        self.file.is_some()
    }
}

impl AuditSink for AuditLogger {
    fn write(&self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if self.console {
            tracing::info!(
                target: AUDIT_TARGET,
                actor = %entry.actor,
                item = entry.item.0,
                action = %entry.action,
                decision = entry.decision,
                "{}",
                entry.summary()
            );
        }

        if let Some(ref file) = self.file {
            let json = serde_json::to_string(entry)?;
            file.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .append(&json)?;
        }
        Ok(())
    }
}

/// Create a disabled logger
impl Default for AuditLogger {
    fn default() -> Self {
        Self {
            console: false,
            file: None,
        }
    }
}
