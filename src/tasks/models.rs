//! Task model types.

use serde::{Deserialize, Serialize};

/// A single to-do item on a day's list.
///
/// Tasks carry no identifier: a task is addressed by its position in the
/// list for its day, and that position is only meaningful until the next
/// change to the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// What needs doing. Never empty, never padded with whitespace.
    pub text: String,
    /// Whether the task has been done. Entries written without the flag
    /// read as open.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create an open task from user input.
    ///
    /// Returns `None` when the input is empty or only whitespace.
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self { text: text.to_string(), completed: false })
    }

    /// Flip the completed flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Count of completed tasks in a list.
#[must_use]
pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_text() {
        let task = Task::new("  buy milk \n").unwrap();
        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn test_new_rejects_blank() {
        assert!(Task::new("").is_none());
        assert!(Task::new("   \t\n").is_none());
    }

    #[test]
    fn test_toggle() {
        let mut task = Task::new("x").unwrap();
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }

    #[test]
    fn test_json_shape() {
        let task = Task { text: "water plants".into(), completed: true };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"text":"water plants","completed":true}"#);
    }

    #[test]
    fn test_missing_completed_reads_as_open() {
        let task: Task = serde_json::from_str(r#"{"text":"no flag"}"#).unwrap();
        assert_eq!(task, Task { text: "no flag".into(), completed: false });
    }

    #[test]
    fn test_completed_count() {
        let tasks = vec![
            Task { text: "a".into(), completed: true },
            Task { text: "b".into(), completed: false },
            Task { text: "c".into(), completed: true },
        ];
        assert_eq!(completed_count(&tasks), 2);
        assert_eq!(completed_count(&[]), 0);
    }
}
