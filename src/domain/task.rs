use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{MemberId, ProjectId, ValidationError, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid task ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskName(String);

impl TaskName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        match name.chars().count() {
            x if x < 1 => Err(ValidationError::new(String::from(
                "Task name cannot be empty",
            ))),
            x if x > 255 => Err(ValidationError::new(String::from(
                "Max name length is 255 characters",
            ))),
            _ => Ok(Self(name.to_owned())),
        }
    }
}

impl AsRef<String> for TaskName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum TaskStatus {
    Backlog,
    ToDo,
    InProgress,
    InReview,
    Closed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::ToDo => "ToDo",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::InReview => "InReview",
            TaskStatus::Closed => "Closed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Backlog" => Ok(TaskStatus::Backlog),
            "ToDo" => Ok(TaskStatus::ToDo),
            "InProgress" => Ok(TaskStatus::InProgress),
            "InReview" => Ok(TaskStatus::InReview),
            "Closed" => Ok(TaskStatus::Closed),
            _ => Err(ValidationError::new(format!("Invalid status: {s}"))),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sparse integer rank controlling manual ordering within a status column.
/// New tasks land a fixed step above the column maximum, leaving room for
/// fractional reinsertion during drag-and-drop. The scheme degrades after
/// many fine-grained reorders between two neighbours; renormalization is
/// deliberately absent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub struct Position(i64);

const POSITION_STEP: i64 = 1000;
const POSITION_MIN: i64 = 1000;
const POSITION_MAX: i64 = 1_000_000;

impl Position {
    /// Trusted constructor for ranks this system already persisted.
    /// Creation can legitimately push a column past the bulk-update
    /// ceiling, so round-trips must not re-validate.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Bounds-checked parse used for client-supplied positions in bulk
    /// reorders.
    pub fn parse(value: i64) -> Result<Self, ValidationError> {
        match value {
            v if v < POSITION_MIN => Err(ValidationError::new(format!(
                "Position must be at least {POSITION_MIN}"
            ))),
            v if v > POSITION_MAX => Err(ValidationError::new(format!(
                "Position must be at most {POSITION_MAX}"
            ))),
            v => Ok(Self(v)),
        }
    }

    /// Rank for a task appended after the current column maximum, or the
    /// first rank for an empty column. Not bounds-checked: long-lived
    /// columns may legitimately grow past the bulk-update ceiling.
    pub fn after(highest: Option<Position>) -> Self {
        match highest {
            Some(Position(value)) => Self(value + POSITION_STEP),
            None => Self(POSITION_STEP),
        }
    }

    pub fn value_of(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub name: TaskName,
    pub status: TaskStatus,
    pub assignee_id: MemberId,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub position: Position,
    pub created_at: DateTime<Utc>,
}

impl Task {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        name: TaskName,
        status: TaskStatus,
        assignee_id: MemberId,
        description: Option<String>,
        due_date: DateTime<Utc>,
        position: Position,
    ) -> Self {
        Self {
            id: TaskId::default(),
            workspace_id,
            project_id,
            name,
            status,
            assignee_id,
            description,
            due_date,
            position,
            created_at: Utc::now(),
        }
    }
}
