//! Epoch-millisecond id assignment.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::Utc;

/// Hands out epoch-millisecond ids.
///
/// Ids are strictly increasing for the life of the generator and skip any
/// value already taken in the target collection, so two creates within the
/// same millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Mutex<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator::default()
    }

    /// Next id at or after the current time.
    pub fn next(&self, taken: impl IntoIterator<Item = i64>) -> i64 {
        self.next_at(Utc::now().timestamp_millis(), taken)
    }

    fn next_at(&self, now_millis: i64, taken: impl IntoIterator<Item = i64>) -> i64 {
        let taken: HashSet<i64> = taken.into_iter().collect();
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut id = now_millis.max(*last + 1);
        while taken.contains(&id) {
            id += 1;
        }

        *last = id;
        id
    }
}
