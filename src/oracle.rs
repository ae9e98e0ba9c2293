// src/oracle.rs
//! Bias and similarity sources consumed by the ranker and the tree comparison.
//!
//! Both are opaque to this crate: distributional vectors, dictionaries or a
//! precomputed table can stand behind them. Closures work directly.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Non-negative prior importance of an item. Negative values are clamped by callers.
pub trait BiasOracle<I: ?Sized>: Sync {
    fn weight(&self, item: &I) -> f64;
}

/// Pairwise similarity; `None` when the resources cannot compare the pair.
pub trait SimilarityOracle<I: ?Sized>: Sync {
    fn similarity(&self, a: &I, b: &I) -> Option<f64>;
}

impl<I: ?Sized, F> BiasOracle<I> for F
where
    F: Fn(&I) -> f64 + Sync,
{
    fn weight(&self, item: &I) -> f64 {
        self(item)
    }
}

impl<I: ?Sized, F> SimilarityOracle<I> for F
where
    F: Fn(&I, &I) -> Option<f64> + Sync,
{
    fn similarity(&self, a: &I, b: &I) -> Option<f64> {
        self(a, b)
    }
}

/// One scored meaning pair as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityRecord {
    pub a: String,
    pub b: String,
    pub score: f64,
}

/// Symmetric in-memory similarity lookup over meaning ids.
#[derive(Debug, Clone, Default)]
pub struct SimilarityTable {
    // lower id -> higher id -> score
    scores: HashMap<String, HashMap<String, f64>>,
    len: usize,
}

impl SimilarityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a score for the unordered pair `{a, b}`, replacing any previous one.
    pub fn insert(&mut self, a: &str, b: &str, score: f64) {
        let (lo, hi) = ordered(a, b);
        let previous = self
            .scores
            .entry(lo.to_string())
            .or_default()
            .insert(hi.to_string(), score);
        if previous.is_none() {
            self.len += 1;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Parses a JSON array of `{ "a", "b", "score" }` records.
    ///
    /// # Errors
    /// Returns error on malformed JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        let records: Vec<SimilarityRecord> = serde_json::from_str(content)?;
        Ok(records.into_iter().collect())
    }
}

fn ordered<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl FromIterator<SimilarityRecord> for SimilarityTable {
    fn from_iter<T: IntoIterator<Item = SimilarityRecord>>(iter: T) -> Self {
        let mut table = Self::new();
        for r in iter {
            table.insert(&r.a, &r.b, r.score);
        }
        table
    }
}

impl SimilarityOracle<str> for SimilarityTable {
    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(1.0);
        }
        let (lo, hi) = ordered(a, b);
        self.scores.get(lo).and_then(|row| row.get(hi)).copied()
    }
}
