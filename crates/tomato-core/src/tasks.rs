//! Task checklist persisted under the `tasks` key.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::storage::KvStore;

pub const TASKS_KEY: &str = "tasks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Read the list; missing or malformed data yields an empty list.
    pub fn load(store: &impl KvStore) -> Self {
        match store.get(TASKS_KEY) {
            Ok(Some(json)) => Self::parse(&json).unwrap_or_else(|e| {
                warn!("discarding malformed task list: {e}");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("cannot read task list, starting empty: {e}");
                Self::default()
            }
        }
    }

    /// Every entry must be a JSON object, not a positional array.
    fn parse(json: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let entries = value
            .as_array()
            .ok_or_else(|| serde::de::Error::custom("task list is not an array"))?;
        if !entries.iter().all(serde_json::Value::is_object) {
            return Err(serde::de::Error::custom("task entry is not an object"));
        }
        serde_json::from_value(value)
    }

    pub fn save(&self, store: &impl KvStore) -> Result<()> {
        store.set(TASKS_KEY, &serde_json::to_string(self)?)?;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    /// Append a task. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id(Utc::now().timestamp_millis().max(0) as u64);
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        self.tasks.last()
    }

    /// Flip the completed flag. Returns false for an unknown id.
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Returns false for an unknown id.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Ids are creation timestamps in milliseconds, bumped past the newest
    /// existing id so two adds in the same millisecond stay distinct.
    fn next_id(&self, candidate: u64) -> u64 {
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if candidate <= max => max
                .checked_add(1)
                .unwrap_or_else(|| self.lowest_free_id()),
            _ => candidate,
        }
    }

    fn lowest_free_id(&self) -> u64 {
        (1..)
            .find(|id| self.get(*id).is_none())
            .unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
