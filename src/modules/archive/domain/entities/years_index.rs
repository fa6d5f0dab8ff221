use serde::{Deserialize, Serialize};

/// How long a built years index stays valid: 24 hours.
pub const YEARS_INDEX_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Years that have audio in the archive, with the build time in epoch millis.
///
/// `years` is strictly increasing; constructors sort and dedup their input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsIndex {
    pub years: Vec<i32>,
    pub timestamp: i64,
}

impl YearsIndex {
    pub fn new(mut years: Vec<i32>, timestamp: i64) -> Self {
        years.sort_unstable();
        years.dedup();
        Self { years, timestamp }
    }

    pub fn built_now(years: Vec<i32>) -> Self {
        Self::new(years, chrono::Utc::now().timestamp_millis())
    }

    /// Older than the TTL at `now_millis`. A timestamp from the future, or one
    /// too far out to compare, counts as expired.
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        match now_millis.checked_sub(self.timestamp) {
            Some(age) => !(0..=YEARS_INDEX_TTL_MILLIS).contains(&age),
            None => true,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp_millis())
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// Copy of this index that also holds `year`, still sorted.
    pub fn with_year(&self, year: i32) -> Self {
        let mut years = self.years.clone();
        if let Err(position) = years.binary_search(&year) {
            years.insert(position, year);
        }
        Self {
            years,
            timestamp: self.timestamp,
        }
    }

    /// Closest indexed years strictly before and after `year`.
    pub fn neighbours(&self, year: i32) -> (Option<i32>, Option<i32>) {
        let split = self.years.partition_point(|&y| y < year);
        let previous = split.checked_sub(1).map(|i| self.years[i]);
        let next = self.years[split..].iter().copied().find(|&y| y > year);
        (previous, next)
    }
}
