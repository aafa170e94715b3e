use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task has not been completed yet. The default for new tasks.
    Pending,
    /// Task is done.
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Input structure for creating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// The initial status of the task. Defaults to `pending` when omitted.
    pub status: Option<TaskStatus>,
}

/// Partial-update payload for a task. Every field is optional; only the
/// supplied fields are applied.
///
/// `description` uses a double `Option` so that an absent key (leave as is)
/// is distinguishable from an explicit `null` (clear the description).
#[derive(Debug, Deserialize, Validate, Default)]
pub struct TaskUpdate {
    /// New title, if present. Same length bounds as on creation.
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    /// `None`: leave unchanged. `Some(None)`: clear. `Some(Some(s))`: replace.
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 1000))]
    pub description: Option<Option<String>>,

    /// New status, if present.
    pub status: Option<TaskStatus>,
}

/// Deserializes a field that was present in the JSON body, keeping the outer
/// `Some` even when the value itself is `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// The current status of the task.
    pub status: TaskStatus,
    /// Identifier of the user who owns the task. Immutable.
    pub user_id: i32,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` instance from `TaskInput` and the owner's `user_id`.
    /// Sets `created_at` and `updated_at` to the current time, `id` to a new
    /// UUID, and the status to `pending` when none was supplied.
    pub fn new(input: TaskInput, user_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}
