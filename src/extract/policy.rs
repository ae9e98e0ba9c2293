// src/extract/policy.rs
//! Choosing one candidate from a scored list.

use crate::config::SelectionKind;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy {
    /// Highest weight, first occurrence on ties.
    ArgMax,
    /// Sample from the weights sharpened by `1 / temperature`.
    SoftMax { temperature: f64 },
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::SoftMax { temperature: 1e-3 }
    }
}

impl SelectionPolicy {
    #[must_use]
    pub fn from_config(kind: SelectionKind, temperature: f64) -> Self {
        match kind {
            SelectionKind::ArgMax => Self::ArgMax,
            SelectionKind::SoftMax => Self::SoftMax { temperature },
        }
    }

    /// True when repeated calls with the same weights always pick the same index.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Self::ArgMax)
    }

    /// Index of the chosen weight, `None` for an empty list.
    pub fn select<R: Rng + ?Sized>(&self, weights: &[f64], rng: &mut R) -> Option<usize> {
        match weights.len() {
            0 => None,
            1 => Some(0),
            _ => match *self {
                Self::ArgMax => arg_max(weights),
                Self::SoftMax { temperature } => Some(soft_max(weights, temperature, rng)),
            },
        }
    }
}

fn arg_max(weights: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &w) in weights.iter().enumerate() {
        if w.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| w > b) {
            best = Some((i, w));
        }
    }
    best.map(|(i, _)| i).or(Some(0))
}

/// Inverse-CDF draw from `p_i^(1/t)` with `p` the weights on the simplex.
/// Computed relative to the largest `p` so tiny temperatures do not underflow.
#[allow(clippy::cast_precision_loss)]
fn soft_max<R: Rng + ?Sized>(weights: &[f64], temperature: f64, rng: &mut R) -> usize {
    let clean: Vec<f64> = weights
        .iter()
        .map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
        .collect();
    let total: f64 = clean.iter().sum();
    let probs: Vec<f64> = if total > 0.0 {
        clean.iter().map(|w| w / total).collect()
    } else {
        vec![1.0 / clean.len() as f64; clean.len()]
    };

    let top = probs.iter().copied().fold(0.0, f64::max);
    let sharpened: Vec<f64> = probs
        .iter()
        .map(|p| {
            if *p > 0.0 {
                ((p.ln() - top.ln()) / temperature).exp()
            } else {
                0.0
            }
        })
        .collect();
    let mass: f64 = sharpened.iter().sum();

    let draw = rng.gen::<f64>() * mass;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, s) in sharpened.iter().enumerate() {
        if *s > 0.0 {
            last_positive = i;
        }
        cumulative += s;
        if draw < cumulative {
            return i;
        }
    }
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn arg_max_prefers_first_of_ties() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let p = SelectionPolicy::ArgMax;
        assert_eq!(p.select(&[1.0, 3.0, 3.0, 2.0], &mut rng), Some(1));
        assert_eq!(p.select(&[f64::NAN, 0.5], &mut rng), Some(1));
        assert_eq!(p.select(&[7.0], &mut rng), Some(0));
        assert_eq!(p.select(&[], &mut rng), None);
    }

    #[test]
    fn cold_soft_max_almost_always_picks_the_best() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let p = SelectionPolicy::SoftMax { temperature: 1e-3 };
        let weights = [10.0, 12.0, 11.0];
        let hits = (0..500)
            .filter(|_| p.select(&weights, &mut rng) == Some(1))
            .count();
        assert_eq!(hits, 500);
    }

    #[test]
    fn warm_soft_max_explores() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let p = SelectionPolicy::SoftMax { temperature: 1.0 };
        let weights = [1.0, 1.0, 1.0, 1.0];
        let mut picked = [false; 4];
        for _ in 0..200 {
            if let Some(i) = p.select(&weights, &mut rng) {
                picked[i] = true;
            }
        }
        assert!(picked.iter().all(|p| *p));
    }

    #[test]
    fn zero_weights_are_never_sampled() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let p = SelectionPolicy::SoftMax { temperature: 1.0 };
        for _ in 0..200 {
            assert_ne!(p.select(&[0.0, 2.0, 0.0], &mut rng), Some(0));
        }
    }
}
