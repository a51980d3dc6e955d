//! Membership filtering of fetched route rows.
//!
//! # Design Decisions
//! - Both conditions are set membership, never ranges
//! - An empty set admits nothing
//! - A missing rating is never a member of any rating set
//! - Output keeps the relative order of the input

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::routes::record::RouteRecord;

/// A set of star ratings compared by exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct RatingSet {
    bits: BTreeSet<u64>,
}

impl RatingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-finite values are ignored.
    pub fn insert(&mut self, rating: f64) {
        if rating.is_finite() {
            self.bits.insert(key(rating));
        }
    }

    pub fn contains(&self, rating: Option<f64>) -> bool {
        match rating {
            Some(value) if value.is_finite() => self.bits.contains(&key(value)),
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.bits.iter().map(|bits| f64::from_bits(*bits)).collect()
    }
}

// -0.0 and 0.0 must land on the same key.
fn key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl FromIterator<f64> for RatingSet {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut set = RatingSet::new();
        for rating in iter {
            set.insert(rating);
        }
        set
    }
}

impl From<Vec<f64>> for RatingSet {
    fn from(ratings: Vec<f64>) -> Self {
        ratings.into_iter().collect()
    }
}

impl From<RatingSet> for Vec<f64> {
    fn from(set: RatingSet) -> Self {
        set.to_vec()
    }
}

/// Keep the records whose rating is in `allowed_ratings` and whose bus type
/// is in `allowed_categories`.
pub fn filter_records(
    records: &[RouteRecord],
    allowed_ratings: &RatingSet,
    allowed_categories: &HashSet<String>,
) -> Vec<RouteRecord> {
    if allowed_ratings.is_empty() || allowed_categories.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| allowed_ratings.contains(r.star_rating))
        .filter(|r| allowed_categories.contains(&r.bus_type))
        .cloned()
        .collect()
}

/// Distinct ratings in first-seen order, missing ratings excluded.
pub fn distinct_ratings(records: &[RouteRecord]) -> Vec<f64> {
    let mut seen = RatingSet::new();
    let mut out = Vec::new();
    for rating in records.iter().filter_map(|r| r.star_rating) {
        if !seen.contains(Some(rating)) {
            seen.insert(rating);
            out.push(rating);
        }
    }
    out
}

/// Distinct bus types in first-seen order.
pub fn distinct_categories(records: &[RouteRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for record in records {
        if seen.insert(record.bus_type.as_str()) {
            out.push(record.bus_type.clone());
        }
    }
    out
}
