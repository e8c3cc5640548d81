//! Decision Journal - Append-only JSONL storage
//!
//! Every assessment, challenge and settlement of a session lands here, one
//! JSON object per line. Lines are never rewritten.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{SessionError, SessionResult};
use crate::event::SessionEvent;

/// Append-only journal of session events
///
/// File-backed journals also keep the events of the current process in
/// memory so `events()` never re-reads the file.
pub struct DecisionJournal {
    path: Option<PathBuf>,
    file: Option<File>,
    events: Vec<SessionEvent>,
}

impl DecisionJournal {
    /// Open (or create) a journal file in append mode
    pub fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path: Some(path),
            file: Some(file),
            events: Vec::new(),
        })
    }

    /// A journal that only keeps events in memory
    pub fn in_memory() -> Self {
        Self {
            path: None,
            file: None,
            events: Vec::new(),
        }
    }

    /// Append an event
    pub fn append(&mut self, event: SessionEvent) -> SessionResult<()> {
        let json = serde_json::to_string(&event)?;
        if let Some(ref mut file) = self.file {
            writeln!(file, "{}", json)?;
            file.flush()?;
        }
        self.events.push(event);
        Ok(())
    }

    /// Events appended through this handle, oldest first
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Every event in the backing file, including earlier sessions.
    /// In-memory journals return their buffered events.
    pub fn read_all(&self) -> SessionResult<Vec<SessionEvent>> {
        let Some(path) = &self.path else {
            return Ok(self.events.clone());
        };

        let reader = BufReader::new(File::open(path)?);
        let mut events = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event = serde_json::from_str(&line)
                .map_err(|e| SessionError::Journal(format!("line {}: {}", i + 1, e)))?;
            events.push(event);
        }
        Ok(events)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_in_memory(&self) -> bool {
        self.file.is_none()
    }
}

impl Default for DecisionJournal {
    fn default() -> Self {
        Self::in_memory()
    }
}
