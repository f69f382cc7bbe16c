use crate::truncate_long;
use std::{
    collections::VecDeque,
    fmt::{self, Display},
    time::Duration,
};
use time::OffsetDateTime;

/// How many executed statements the diagnostics ring remembers by default.
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// One executed statement as remembered by the diagnostics ring.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementLog {
    /// The fully rendered SQL that was handed to the driver.
    pub sql: String,
    pub started_at: OffsetDateTime,
    pub elapsed: Duration,
    /// Driver error text when the execution failed.
    pub error: Option<String>,
}

impl Display for StatementLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.elapsed, truncate_long(&self.sql))?;
        if let Some(error) = &self.error {
            write!(f, " !! {error}")?;
        }
        Ok(())
    }
}

/// Bounded FIFO log of executed statements.
///
/// Insertion beyond capacity evicts the oldest entry, so the ring never
/// outgrows the capacity it was built with.
#[derive(Debug, Clone)]
pub struct Statistics {
    entries: VecDeque<StatementLog>,
    capacity: usize,
}

impl Statistics {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, entry: StatementLog) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Most recently recorded entry.
    pub fn last(&self) -> Option<&StatementLog> {
        self.entries.back()
    }

    /// Oldest-first view of the ring.
    pub fn snapshot(&self) -> impl Iterator<Item = &StatementLog> {
        self.entries.iter()
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
