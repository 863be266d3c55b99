//! Reviewer selection
//!
//! Reviewers are either given explicitly or drawn at random from the
//! configured candidate pool.

use crate::config::split_list;
use crate::error::{Error, Result};
use rand::Rng;

/// Parse an explicit comma-separated reviewer list
///
/// Order is preserved and duplicates are kept.
pub fn parse_reviewers(raw: &str) -> Vec<String> {
    split_list(raw)
}

/// Draw `count` distinct reviewers uniformly at random from `pool`
///
/// Duplicate names in the pool count once. Indices are drawn with
/// replacement and repeats are rejected until `count` distinct names have
/// been collected, so every name has the same chance of selection. The
/// result order is the draw order and carries no meaning.
pub fn pick_random_reviewers<R: Rng + ?Sized>(
    pool: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    let mut candidates: Vec<&String> = Vec::with_capacity(pool.len());
    for name in pool {
        if !candidates.contains(&name) {
            candidates.push(name);
        }
    }

    if candidates.len() < count {
        return Err(Error::NotEnoughReviewers {
            required: count,
            available: candidates.len(),
        });
    }

    let mut picked: Vec<String> = Vec::with_capacity(count);
    while picked.len() < count {
        let candidate = candidates[rng.gen_range(0..candidates.len())];
        if !picked.contains(candidate) {
            picked.push(candidate.clone());
        }
    }
    Ok(picked)
}
