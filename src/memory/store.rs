use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of records kept
pub const DEFAULT_CAPACITY: usize = 50;

/// One remembered task execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub timestamp: DateTime<Local>,
    /// What was attempted (task description)
    pub event: String,
    /// Tool output or error text
    pub result: String,
    pub success: bool,
}

/// Aggregate view over the store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total: usize,
    pub successful: usize,
    /// Percentage in [0, 100]; 0 when the store is empty
    pub success_rate: f32,
}

/// Bounded log of recent task executions, oldest evicted first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    records: VecDeque<MemoryRecord>,
    capacity: usize,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&mut self, event: impl Into<String>, result: impl Into<String>, success: bool) {
        self.records.push_back(MemoryRecord {
            timestamp: Local::now(),
            event: event.into(),
            result: result.into(),
            success,
        });
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    /// Records whose event or result contains `keyword`, ignoring case
    pub fn query(&self, keyword: &str) -> Vec<&MemoryRecord> {
        let needle = keyword.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.event.to_lowercase().contains(&needle) || r.result.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Up to `n` most recent records, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &MemoryRecord> {
        self.records.iter().skip(self.records.len().saturating_sub(n))
    }

    pub fn stats(&self) -> MemoryStats {
        let total = self.records.len();
        let successful = self.records.iter().filter(|r| r.success).count();
        let success_rate = if total > 0 {
            successful as f32 / total as f32 * 100.0
        } else {
            0.0
        };
        MemoryStats {
            total,
            successful,
            success_rate,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
