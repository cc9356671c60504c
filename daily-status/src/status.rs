use chrono::{Days, NaiveDate};
use rand::Rng;

pub mod web;

/// Demo project vocabulary offered by the creation form and used by the seed
/// generator. The set is open in principle; creation only checks presence.
pub const PROJECTS: [&str; 5] = [
    "QB Sales Tracker",
    "Internal HRMS",
    "Client Portal A",
    "Legacy Migration",
    "AI Research",
];

/// Demo activity vocabulary.
pub const ACTIVITIES: [&str; 6] = [
    "Coding",
    "Meetings",
    "Code Review",
    "Documentation",
    "Testing",
    "Debugging",
];

/// Minute values the creation form offers. Canonical for validation; the
/// seed generator intentionally emits only 0 and 30.
pub const MINUTE_CHOICES: [u8; 4] = [0, 15, 30, 45];

const SEED_DESCRIPTIONS: [&str; 6] = [
    "Fixed critical bug in login flow",
    "Daily standup and sprint planning",
    "Refactored API middleware",
    "Wrote unit tests for new module",
    "Client call regarding requirements",
    "Optimized database queries",
];

/// One logged activity. Entries are immutable after creation.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct StatusEntry {
    id: u32,
    date: NaiveDate,
    project: String,
    activity: String,
    hours: u8,
    minutes: u8,
    description: String,
}

impl StatusEntry {
    /// Returns the ID of the entry.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the calendar date the activity took place.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the project the activity belongs to.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the activity type.
    pub fn activity(&self) -> &str {
        &self.activity
    }

    /// Returns the whole hours spent.
    pub fn hours(&self) -> u8 {
        self.hours
    }

    /// Returns the minutes spent on top of the hours.
    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Returns the free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the date formatted for display (DD/MM/YYYY).
    pub fn date_display(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

/// Creation fields for a status entry; the store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewStatusEntry {
    pub date: NaiveDate,
    pub project: String,
    pub activity: String,
    pub hours: u8,
    pub minutes: u8,
    pub description: String,
}

/// In-memory history of status entries. Lives for the process lifetime.
///
/// New entries are prepended, so display order is most-recent-action-first.
/// The seed set is sorted by date descending instead — display ordering is a
/// presentation layering, not a storage invariant. IDs come from a private
/// monotonic counter and are never reused.
#[derive(Debug)]
pub struct StatusStore {
    entries: Vec<StatusEntry>,
    next_id: u32,
}

impl StatusStore {
    /// Creates an empty store whose first assigned ID is 1.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a store pre-loaded with `count` generated demo entries over
    /// the last 30 days, sorted by date descending, with the ID counter
    /// seeded above them.
    pub fn seeded(count: usize) -> Self {
        let mut rng = rand::rng();
        let today = chrono::Local::now().date_naive();

        let mut entries: Vec<StatusEntry> = (0..count)
            .map(|i| StatusEntry {
                id: i as u32 + 1,
                date: today - Days::new(rng.random_range(0..30)),
                project: PROJECTS[rng.random_range(0..PROJECTS.len())].to_string(),
                activity: ACTIVITIES[rng.random_range(0..ACTIVITIES.len())].to_string(),
                hours: rng.random_range(1..=8),
                minutes: if rng.random_bool(0.5) { 30 } else { 0 },
                description: SEED_DESCRIPTIONS[rng.random_range(0..SEED_DESCRIPTIONS.len())]
                    .to_string(),
            })
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            entries,
            next_id: count as u32 + 1,
        }
    }

    /// Prepends a new entry with the next ID and returns a copy of it.
    pub fn create(&mut self, new_entry: NewStatusEntry) -> StatusEntry {
        let entry = StatusEntry {
            id: self.next_id,
            date: new_entry.date,
            project: new_entry.project,
            activity: new_entry.activity,
            hours: new_entry.hours,
            minutes: new_entry.minutes,
            description: new_entry.description,
        };
        self.next_id += 1;
        self.entries.insert(0, entry.clone());
        entry
    }

    /// Looks up an entry by its ID.
    pub fn find(&self, id: u32) -> Option<&StatusEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Returns all entries in display order.
    pub fn all(&self) -> &[StatusEntry] {
        &self.entries
    }

    /// Case-insensitive substring search over project, activity and
    /// description; an entry matches if any field contains the query. An
    /// empty query returns the full collection; display order is preserved.
    pub fn search(&self, query: &str) -> Vec<StatusEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.project.to_lowercase().contains(&query)
                    || entry.activity.to_lowercase().contains(&query)
                    || entry.description.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}
