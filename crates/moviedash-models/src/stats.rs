use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// A year together with how many entries fell into it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Mapping from release year to number of entries.
///
/// Besides the counts, the histogram remembers the order in which each year
/// was first seen. Equality only looks at the counts.
#[derive(Debug, Clone, Default)]
pub struct YearHistogram {
    counts: HashMap<i32, usize>,
    first_seen: Vec<i32>,
}

impl YearHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more entry for `year`
    pub fn increment(&mut self, year: i32) {
        match self.counts.get_mut(&year) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(year, 1);
                self.first_seen.push(year);
            }
        }
    }

    pub fn get(&self, year: i32) -> Option<usize> {
        self.counts.get(&year).copied()
    }

    /// Number of distinct years
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Years in the order they were first encountered
    pub fn iter_first_seen(&self) -> impl Iterator<Item = YearCount> + '_ {
        self.first_seen.iter().map(move |&year| YearCount {
            year,
            count: self.counts[&year],
        })
    }

    /// Years in ascending order, for display
    pub fn sorted_by_year(&self) -> Vec<YearCount> {
        let mut years: Vec<YearCount> = self.iter_first_seen().collect();
        years.sort_by_key(|yc| yc.year);
        years
    }
}

impl PartialEq for YearHistogram {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for YearHistogram {}

impl FromIterator<i32> for YearHistogram {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut histogram = YearHistogram::new();
        for year in iter {
            histogram.increment(year);
        }
        histogram
    }
}

impl Serialize for YearHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<i32, usize> = self.counts.iter().map(|(&y, &c)| (y, c)).collect();
        sorted.serialize(serializer)
    }
}

/// Summary derived from a diary snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    pub total_movies: usize,
    /// Mean of the valid ratings, `0.0` when there are none
    pub average_rating: f64,
    pub most_watched_year: Option<YearCount>,
}

impl Default for SummaryStats {
    fn default() -> Self {
        Self {
            total_movies: 0,
            average_rating: 0.0,
            most_watched_year: None,
        }
    }
}
