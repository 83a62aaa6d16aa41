use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque transcription task id issued by the speech API's prepare call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric task status as reported by the speech API. `9` is the only
/// terminal success code; every unrecognized code is carried as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TaskStatus {
    Queued,
    Running,
    Complete,
    Pending(i64),
}

impl TaskStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Complete)
    }

    pub fn code(&self) -> i64 {
        (*self).into()
    }
}

impl From<i64> for TaskStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => TaskStatus::Queued,
            3 => TaskStatus::Running,
            9 => TaskStatus::Complete,
            other => TaskStatus::Pending(other),
        }
    }
}

impl From<TaskStatus> for i64 {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Queued => 0,
            TaskStatus::Running => 3,
            TaskStatus::Complete => 9,
            TaskStatus::Pending(code) => code,
        }
    }
}

/// One getProgress poll result: a human-readable description plus the
/// numeric status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    #[serde(default)]
    pub desc: String,
    pub status: TaskStatus,
}
