// Error taxonomy shared by the store, the capture pipeline and the hotkey listener

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the project file.
///
/// Never surfaced to the UI: loading degrades to the default state and
/// saving keeps the in-memory state, both with a log line.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize projects: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures sampling a pixel. Aborts the current capture cycle only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("point ({x}, {y}) is not on any display")]
    OffScreen { x: i32, y: i32 },

    #[error("capture returned {0} channel(s), need at least 3")]
    MissingChannels(usize),

    #[error("screen capture unavailable: {0}")]
    Unavailable(String),
}

/// Rejected store or session operations. State is unchanged when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("project name is empty")]
    EmptyProjectName,

    #[error("project already exists: {0}")]
    DuplicateProject(String),

    #[error("project not found: {0}")]
    UnknownProject(String),

    #[error("no project selected")]
    NoProjectSelected,

    #[error("color index {index} out of range for {project} ({len} colors)")]
    IndexOutOfRange {
        project: String,
        index: usize,
        len: usize,
    },
}

/// Failures parsing or registering the global hotkey.
#[derive(Error, Debug)]
pub enum HotkeyError {
    #[error("invalid hotkey {0:?}")]
    Parse(String),

    #[error("hotkey registration failed: {0}")]
    Registration(String),

    #[error("hotkey listener is already running")]
    AlreadyListening,

    #[error("failed to spawn listener thread: {0}")]
    Spawn(#[source] std::io::Error),
}
