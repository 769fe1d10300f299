//! Task aggregate and the draft used to create it.

use super::{TaskDomainError, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Unsaved task content submitted to the task store.
///
/// The store assigns the identifier and timestamps when it creates the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    notes: Option<String>,
}

impl TaskDraft {
    /// Creates a draft with a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the title is blank or too long.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: TaskTitle::new(title)?,
            notes: None,
        })
    }

    /// Sets free-form notes. Blank notes are dropped.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = normalize_notes(notes.into());
        self
    }

    /// Returns the draft title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the draft notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted notes, if any.
    pub notes: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Materializes a draft under a store-assigned identifier.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            notes: draft.notes,
            created_at,
            updated_at: created_at,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            notes: data.notes,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the task title.
    pub fn rename(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the task notes. Blank notes clear the field.
    pub fn set_notes(&mut self, notes: Option<String>, clock: &impl Clock) {
        self.notes = notes.and_then(normalize_notes);
        self.touch(clock);
    }

    /// Marks the task as modified at the store's write time.
    pub const fn mark_updated(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_notes(notes: String) -> Option<String> {
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;
    use rstest::rstest;

    #[rstest]
    fn from_draft_uses_single_timestamp() {
        let draft = TaskDraft::new("Buy milk")
            .expect("valid draft")
            .with_notes("  semi-skimmed  ");
        let now = Utc::now();

        let task = Task::from_draft(TaskId::new(), draft, now);

        assert_eq!(task.created_at(), task.updated_at());
        assert_eq!(task.notes(), Some("semi-skimmed"));
    }

    #[rstest]
    fn blank_notes_are_dropped() {
        let mut task = Task::from_draft(
            TaskId::new(),
            TaskDraft::new("Call plumber").expect("valid draft"),
            Utc::now(),
        );

        task.set_notes(Some("   ".to_owned()), &DefaultClock);

        assert_eq!(task.notes(), None);
    }
}
