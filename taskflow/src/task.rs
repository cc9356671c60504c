pub mod web;

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Task {
    id: u32,
    text: String,
    completed: bool,
}

impl Task {
    pub fn new(id: u32, text: String, completed: bool) -> Self {
        Self {
            id,
            text,
            completed,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the task text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the task is completed.
    pub fn completed(&self) -> bool {
        self.completed
    }
}

/// Counts derived from the full task collection, never from a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Custom error type for task store operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskStoreError {
    /// No task with the given ID exists in the store.
    #[error("task with ID {0} not found")]
    TaskNotFound(u32),
}

/// In-memory task collection. Lives for the process lifetime; nothing is
/// persisted.
///
/// IDs come from a private monotonic counter: never decremented, never reused
/// even after a delete. Display order is insertion order (new tasks append).
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u32,
}

impl TaskStore {
    /// Creates an empty store whose first assigned ID is 1.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a store pre-loaded with the demo tasks, with the ID counter
    /// seeded above them.
    pub fn with_demo_tasks() -> Self {
        let tasks = vec![
            Task::new(1, "Review PR #42: Login Refactor".to_string(), false),
            Task::new(2, "Update dependency versions".to_string(), true),
            Task::new(3, "Draft system architecture diagram".to_string(), false),
        ];
        let next_id = tasks.len() as u32 + 1;
        Self { tasks, next_id }
    }

    /// Appends a new task with the next ID and returns a copy of it.
    pub fn create(&mut self, text: String) -> Task {
        let task = Task::new(self.next_id, text, false);
        self.next_id += 1;
        self.tasks.push(task.clone());
        task
    }

    /// Looks up a task by its ID.
    pub fn find(&self, id: u32) -> Result<&Task, TaskStoreError> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or(TaskStoreError::TaskNotFound(id))
    }

    /// Flips the completed flag of a task and returns the updated copy.
    pub fn toggle(&mut self, id: u32) -> Result<Task, TaskStoreError> {
        let task = self.find_mut(id)?;
        task.completed = !task.completed;
        Ok(task.clone())
    }

    /// Replaces the text of a task and returns the updated copy.
    pub fn rename(&mut self, id: u32, text: String) -> Result<Task, TaskStoreError> {
        let task = self.find_mut(id)?;
        task.text = text;
        Ok(task.clone())
    }

    /// Removes a task and returns it. The ID is never handed out again.
    pub fn delete(&mut self, id: u32) -> Result<Task, TaskStoreError> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskStoreError::TaskNotFound(id))?;
        Ok(self.tasks.remove(position))
    }

    /// Returns all tasks in display order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Case-insensitive substring search over task text. An empty query
    /// returns the full collection; display order is preserved either way.
    pub fn search(&self, query: &str) -> Vec<Task> {
        let query = query.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.text.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Computes the stats aggregate over the full collection.
    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskStats {
            total,
            completed,
            pending: total - completed,
        }
    }

    fn find_mut(&mut self, id: u32) -> Result<&mut Task, TaskStoreError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskStoreError::TaskNotFound(id))
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
