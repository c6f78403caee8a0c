use std::collections::{BTreeMap, HashMap};
use std::ops::{Add, AddAssign};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::range::{RangeError, parse_iso_date};

/// Sparse mapping from calendar day to contribution count.
///
/// Serializes as a JSON object keyed by `yyyy-mm-dd` strings, the shape
/// contribution providers hand back.
#[derive(Debug, Clone, Default, PartialEq, Eq, From, Serialize)]
#[serde(transparent)]
pub struct ContributionActivity(BTreeMap<NaiveDate, u32>);

impl<'de> Deserialize<'de> for ContributionActivity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = BTreeMap::<String, u32>::deserialize(deserializer)?;
        entries
            .iter()
            .map(|(key, count)| Ok((parse_iso_date(key)?, *count)))
            .collect::<Result<_, RangeError>>()
            .map_err(serde::de::Error::custom)
    }
}

impl ContributionActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a map keyed by ISO date strings.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidDate` for the first key that isn't a valid `yyyy-mm-dd` date.
    pub fn from_iso_map<K: AsRef<str>>(entries: &HashMap<K, u32>) -> Result<Self, RangeError> {
        entries
            .iter()
            .map(|(key, count)| Ok((parse_iso_date(key.as_ref())?, *count)))
            .collect()
    }

    /// Count recorded for `date`, if any
    pub fn get(&self, date: &NaiveDate) -> Option<u32> {
        self.0.get(date).copied()
    }

    /// Count for `date`, zero when nothing was recorded
    pub fn count_on(&self, date: NaiveDate) -> u32 {
        self.get(&date).unwrap_or(0)
    }

    /// Adds `count` to whatever is already recorded for `date`
    pub fn insert(&mut self, date: NaiveDate, count: u32) {
        self.0
            .entry(date)
            .and_modify(|existing| *existing = existing.saturating_add(count))
            .or_insert(count);
    }

    /// Number of days with an entry
    pub fn active_days(&self) -> usize {
        self.0.len()
    }

    pub fn contribution_count(&self) -> u64 {
        self.0.values().map(|count| u64::from(*count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &u32)> {
        self.0.iter()
    }
}

impl FromIterator<(NaiveDate, u32)> for ContributionActivity {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u32)>>(iter: I) -> Self {
        let mut activity = Self::new();
        for (date, count) in iter {
            activity.insert(date, count);
        }
        activity
    }
}

impl Add for ContributionActivity {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for ContributionActivity {
    fn add_assign(&mut self, rhs: Self) {
        for (date, count) in rhs.0 {
            self.insert(date, count);
        }
    }
}
