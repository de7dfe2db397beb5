use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the priority of a todo.
/// Corresponds to the `todo_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "todo_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority. Assigned when a create request omits the field.
    #[default]
    Medium,
    /// High priority.
    High,
}

/// Input structure for creating a todo.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoCreate {
    /// What needs doing. Must be between 1 and 1000 characters.
    #[validate(length(min = 1, max = 1000))]
    pub description: String,

    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,

    /// Optional priority; missing means `Priority::Medium`.
    pub priority: Option<Priority>,
}

/// Partial-update input: every field is optional, and a field left out of the
/// request must not overwrite the stored value.
///
/// An explicit JSON `null` is indistinguishable from an absent field, so a
/// stored `due_date` cannot be cleared through update; it can only be
/// replaced with a new timestamp.
#[derive(Debug, Serialize, Deserialize, Default, Validate)]
pub struct TodoUpdate {
    #[validate(length(min = 1, max = 1000))]
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
}

/// Represents a todo entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Unique identifier (UUID v4), assigned at creation and immutable.
    pub id: Uuid,
    /// Identifier of the owning user, immutable after creation.
    pub user_id: Uuid,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    /// Completion flag. Transitions one way, from false to true.
    pub is_completed: bool,
    /// Set exactly once, when `is_completed` flips to true.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Creates a new `Todo` from create input and the owner's id.
    /// A fresh UUID is assigned and the todo starts out not completed.
    pub fn new(input: TodoCreate, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            description: input.description,
            due_date: input.due_date,
            priority: input.priority.unwrap_or_default(),
            is_completed: false,
            completed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_defaults() {
        let input = TodoCreate {
            description: "buy milk".to_string(),
            due_date: None,
            priority: None,
        };

        let user_id = Uuid::new_v4();
        let todo = Todo::new(input, user_id);
        assert_eq!(todo.user_id, user_id);
        assert_eq!(todo.description, "buy milk");
        assert_eq!(todo.priority, Priority::Medium);
        assert!(!todo.is_completed);
        assert!(todo.completed_at.is_none());
    }

    #[test]
    fn test_new_todos_get_distinct_ids() {
        let user_id = Uuid::new_v4();
        let a = Todo::new(
            TodoCreate {
                description: "one".into(),
                due_date: None,
                priority: Some(Priority::High),
            },
            user_id,
        );
        let b = Todo::new(
            TodoCreate {
                description: "two".into(),
                due_date: None,
                priority: Some(Priority::High),
            },
            user_id,
        );
        assert_ne!(a.id, b.id);
        assert_eq!(a.priority, Priority::High);
    }

    #[test]
    fn test_create_validation() {
        let valid = TodoCreate {
            description: "walk the dog".to_string(),
            due_date: Some(Utc::now()),
            priority: Some(Priority::Low),
        };
        assert!(valid.validate().is_ok());

        let empty_description = TodoCreate {
            description: "".to_string(),
            due_date: None,
            priority: None,
        };
        assert!(empty_description.validate().is_err());

        let too_long = TodoCreate {
            description: "a".repeat(1001),
            due_date: None,
            priority: None,
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_update_allows_empty_input() {
        // An update with no fields set is a valid no-op request.
        let update = TodoUpdate::default();
        assert!(update.validate().is_ok());
        assert!(update.description.is_none());
        assert!(update.due_date.is_none());
        assert!(update.priority.is_none());
    }

    #[test]
    fn test_priority_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let parsed: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
    }
}
